use super::*;

/// An `at://` URI naming a Bluesky post record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PostUri(String);

impl PostUri {
  const AT_SCHEME: &str = "at://";

  const COLLECTION: &str = "app.bsky.feed.post";

  const WEB_PROFILE_PREFIX: &str = "https://bsky.app/profile/";

  pub(crate) fn as_str(&self) -> &str {
    &self.0
  }

  fn from_at_uri(rest: &str) -> Option<Self> {
    let mut segments = rest.trim_end_matches('/').split('/');

    let (Some(authority), Some(collection), Some(rkey), None) = (
      segments.next(),
      segments.next(),
      segments.next(),
      segments.next(),
    ) else {
      return None;
    };

    if authority.is_empty() || rkey.is_empty() || collection != Self::COLLECTION
    {
      return None;
    }

    Some(Self::from_parts(authority, rkey))
  }

  fn from_parts(authority: &str, rkey: &str) -> Self {
    Self(format!(
      "{}{authority}/{}/{rkey}",
      Self::AT_SCHEME,
      Self::COLLECTION
    ))
  }

  fn from_web_url(rest: &str) -> Option<Self> {
    let path = rest.split(['?', '#']).next().unwrap_or_default();

    let mut segments = path.trim_end_matches('/').split('/');

    let (Some(actor), Some("post"), Some(rkey), None) = (
      segments.next(),
      segments.next(),
      segments.next(),
      segments.next(),
    ) else {
      return None;
    };

    if actor.is_empty() || rkey.is_empty() {
      return None;
    }

    Some(Self::from_parts(actor, rkey))
  }

  pub(crate) fn parse(input: &str) -> Result<Self> {
    let input = input.trim();

    if input.is_empty() {
      bail!(POST_URI_REQUIRED);
    }

    let parsed = if let Some(rest) = input.strip_prefix(Self::AT_SCHEME) {
      Self::from_at_uri(rest)
    } else if let Some(rest) = input.strip_prefix(Self::WEB_PROFILE_PREFIX) {
      Self::from_web_url(rest)
    } else {
      None
    };

    parsed.ok_or_else(|| {
      anyhow!(
        "invalid post URI `{input}`: expected `at://<actor>/{}/<rkey>` or a bsky.app post URL",
        Self::COLLECTION
      )
    })
  }
}

impl Display for PostUri {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for PostUri {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_at_uri() {
    let uri = PostUri::parse("at://did:plc:abc123/app.bsky.feed.post/3kxyz")
      .unwrap();

    assert_eq!(uri.as_str(), "at://did:plc:abc123/app.bsky.feed.post/3kxyz");
  }

  #[test]
  fn converts_web_url() {
    let uri = PostUri::parse(
      "https://bsky.app/profile/alice.bsky.social/post/3kxyz?ref=home",
    )
    .unwrap();

    assert_eq!(uri.as_str(), "at://alice.bsky.social/app.bsky.feed.post/3kxyz");
  }

  #[test]
  fn trims_surrounding_whitespace() {
    let uri: PostUri = "  at://did:plc:abc/app.bsky.feed.post/1  ".parse().unwrap();

    assert_eq!(uri.to_string(), "at://did:plc:abc/app.bsky.feed.post/1");
  }

  #[test]
  fn rejects_empty_input() {
    let error = PostUri::parse("   ").unwrap_err();

    assert_eq!(error.to_string(), "Post URI is required");
  }

  #[test]
  fn rejects_other_collections() {
    assert!(PostUri::parse("at://did:plc:abc/app.bsky.feed.like/1").is_err());
    assert!(PostUri::parse("at://did:plc:abc/app.bsky.feed.post").is_err());
    assert!(PostUri::parse("at://did:plc:abc/app.bsky.feed.post/1/2").is_err());
  }

  #[test]
  fn rejects_non_post_urls() {
    assert!(PostUri::parse("https://bsky.app/profile/alice.bsky.social").is_err());
    assert!(PostUri::parse("https://example.com/post/1").is_err());
  }
}
