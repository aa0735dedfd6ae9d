use super::*;

const STYLESHEET: &str = r"
comments {
  margin: 0 auto;
  padding: 2em;
  max-width: none;
  display: block;
  border-radius: 0.4em;
  background-color: var(--background-color);
  color: var(--text-color);
}
.reply-info {
  font-size: 14px;
  color: var(--text-color);
}
#show-more {
  color: var(--text-color) !important;
  margin-top: 10px;
  width: 100%;
  padding: 1em;
  font: inherit;
  box-sizing: border-box;
  background: var(--button-background-color);
  border-radius: 0.8em;
  cursor: pointer;
  border: 0;
}
.comment {
  margin-bottom: 2em;
}
.author {
  a {
    font-size: 0.9em;
    margin-bottom: 0.4em;
    display: flex;
    align-items: center;
    color: var(--link-color);
    text-decoration: none;

    img {
      margin-right: 0.4em;
      border-radius: var(--author-avatar-border-radius);
      vertical-align: middle;
    }
  }
}
.comment-text {
  color: var(--text-color);
  margin: 5px 0;
  white-space: pre-line;
}
.comment-meta {
  color: var(--comment-meta-color);
  display: block;
  margin: 1em 0 2em;
}
.replies-container {
  border-left: 1px solid var(--reply-border-color);
  margin-left: 1.6em;
  padding-left: 1.6em;
}
.error {
  color: var(--error-color);
}
a {
  color: var(--link-color);
  text-decoration: none;
}
.authorhandle {
  color: var(--comment-meta-color);
}
";

/// Values for the CSS custom properties the stylesheet reads. Any of them
/// can be overridden from the configuration file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Theme {
  pub(crate) author_avatar_border_radius: String,
  pub(crate) background_color: String,
  pub(crate) button_background_color: String,
  pub(crate) comment_meta_color: String,
  pub(crate) error_color: String,
  pub(crate) link_color: String,
  pub(crate) reply_border_color: String,
  pub(crate) text_color: String,
}

impl Default for Theme {
  fn default() -> Self {
    Self {
      author_avatar_border_radius: "100%".into(),
      background_color: "rgba(66,66,66,0.7)".into(),
      button_background_color: "#222327".into(),
      comment_meta_color: "#5E9595".into(),
      error_color: "red".into(),
      link_color: "#356cbd".into(),
      reply_border_color: "transparent".into(),
      text_color: "rgba(255, 255, 255, 0.9)".into(),
    }
  }
}

impl Theme {
  fn custom_properties(&self) -> [(&'static str, &str); 8] {
    [
      ("--background-color", self.background_color.as_str()),
      ("--text-color", self.text_color.as_str()),
      ("--link-color", self.link_color.as_str()),
      ("--comment-meta-color", self.comment_meta_color.as_str()),
      ("--error-color", self.error_color.as_str()),
      ("--reply-border-color", self.reply_border_color.as_str()),
      ("--button-background-color", self.button_background_color.as_str()),
      (
        "--author-avatar-border-radius",
        self.author_avatar_border_radius.as_str(),
      ),
    ]
  }

  /// The `<style>` element attached to every rendered widget.
  pub(crate) fn style_element(&self) -> String {
    let mut css = String::from("<style>\n:host {\n");

    for (property, value) in self.custom_properties() {
      let _ = writeln!(css, "  {property}: {value};");
    }

    css.push('}');
    css.push_str(STYLESHEET);
    css.push_str("</style>");

    css
  }

  /// Rejects values that could close the declaration or the style element.
  pub(crate) fn validate(&self) -> Result {
    for (property, value) in self.custom_properties() {
      if value.trim().is_empty() {
        bail!("theme value for `{property}` is empty");
      }

      if value.contains([';', '{', '}', '<', '>']) {
        bail!("theme value for `{property}` contains a forbidden character: {value}");
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn style_element_declares_defaults_on_host() {
    let css = Theme::default().style_element();

    assert!(css.starts_with("<style>\n:host {\n"));
    assert!(css.contains("  --background-color: rgba(66,66,66,0.7);\n"));
    assert!(css.contains("  --author-avatar-border-radius: 100%;\n"));
    assert!(css.contains(".replies-container {"));
    assert!(css.ends_with("</style>"));
  }

  #[test]
  fn overrides_replace_defaults() {
    let theme: Theme =
      serde_json::from_str(r##"{"link_color": "#ff0000"}"##).unwrap();

    assert_eq!(theme.link_color, "#ff0000");
    assert_eq!(theme.error_color, "red");
    assert!(theme.style_element().contains("--link-color: #ff0000;"));
  }

  #[test]
  fn unknown_keys_are_rejected() {
    assert!(serde_json::from_str::<Theme>(r#"{"link_colour": "red"}"#).is_err());
  }

  #[test]
  fn validate_rejects_injection() {
    let theme = Theme {
      text_color: "red; } body { display: none".into(),
      ..Theme::default()
    };

    assert!(theme.validate().is_err());
    assert!(Theme::default().validate().is_ok());
  }
}
