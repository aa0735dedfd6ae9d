use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Author {
  pub(crate) avatar: Option<String>,
  pub(crate) did: String,
  pub(crate) display_name: Option<String>,
  pub(crate) handle: String,
}

impl Author {
  /// The display name when the profile has one, even if it is empty,
  /// otherwise the handle.
  pub(crate) fn name(&self) -> &str {
    self.display_name.as_deref().unwrap_or(&self.handle)
  }

  pub(crate) fn profile_url(&self) -> String {
    format!("https://bsky.app/profile/{}", self.did)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn author(display_name: Option<&str>) -> Author {
    Author {
      avatar: None,
      did: "did:plc:abc".into(),
      display_name: display_name.map(str::to_string),
      handle: "alice.bsky.social".into(),
    }
  }

  #[test]
  fn name_prefers_display_name() {
    assert_eq!(author(Some("Alice")).name(), "Alice");
    assert_eq!(author(None).name(), "alice.bsky.social");
  }

  #[test]
  fn profile_url_uses_did() {
    assert_eq!(
      author(None).profile_url(),
      "https://bsky.app/profile/did:plc:abc"
    );
  }
}
