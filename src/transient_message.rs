use super::*;

/// A status line message that reverts to the previous status once it expires.
#[derive(Clone, Debug)]
pub(crate) struct TransientMessage {
  expires_at: Instant,
  restore: String,
  text: String,
}

impl TransientMessage {
  const TTL: Duration = Duration::from_secs(3);

  pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
    now >= self.expires_at
  }

  pub(crate) fn new(text: String, restore: String) -> Self {
    Self {
      expires_at: Instant::now() + Self::TTL,
      restore,
      text,
    }
  }

  pub(crate) fn restore(&self) -> &str {
    &self.restore
  }

  pub(crate) fn text(&self) -> &str {
    &self.text
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expires_after_ttl() {
    let message = TransientMessage::new("opened".into(), "status".into());

    assert!(!message.is_expired_at(Instant::now()));

    assert!(
      message.is_expired_at(Instant::now() + TransientMessage::TTL)
    );
  }

  #[test]
  fn keeps_message_to_restore() {
    let message = TransientMessage::new("opened".into(), "status".into());

    assert_eq!(message.text(), "opened");
    assert_eq!(message.restore(), "status");
  }
}
