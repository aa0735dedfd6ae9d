use super::*;

/// Counts from the API may be absent, null, or a number.
pub(crate) fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(0),
    Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
      de::Error::invalid_value(
        Unexpected::Other("negative or fractional number"),
        &"a non-negative integer",
      )
    }),
    Some(Value::String(s)) => Err(de::Error::invalid_type(
      Unexpected::Str(&s),
      &"a non-negative integer",
    )),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"a non-negative integer",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"a non-negative integer",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"a non-negative integer",
    )),
  }
}

pub(crate) fn format_meta(likes: u64, replies: u64) -> String {
  format!("{likes} likes • {replies} replies")
}

pub(crate) fn last_segment(path: &str) -> &str {
  path.rsplit('/').next().unwrap_or(path)
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = text.chars().take(max_chars).collect::<String>();

  result.truncate(result.trim_end().len());
  result.push_str("...");

  result
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.lines() {
    let mut current = String::new();
    let mut current_width = 0;

    for word in paragraph.split_whitespace() {
      let word_width = word.chars().count();

      if current.is_empty() {
        current.push_str(word);
        current_width = word_width;
      } else if current_width + 1 + word_width <= width {
        current.push(' ');
        current.push_str(word);
        current_width += 1 + word_width;
      } else {
        lines.push(current);
        current = word.to_string();
        current_width = word_width;
      }
    }

    lines.push(current);
  }

  while lines.last().is_some_and(String::is_empty) {
    lines.pop();
  }

  lines
}
