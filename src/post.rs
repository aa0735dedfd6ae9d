use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Post {
  pub(crate) author: Author,
  pub(crate) like_count: u64,
  pub(crate) reply_count: u64,
  pub(crate) text: String,
  pub(crate) uri: String,
}

impl Post {
  pub(crate) fn meta(&self) -> String {
    format_meta(self.like_count, self.reply_count)
  }

  pub(crate) fn rkey(&self) -> &str {
    last_segment(&self.uri)
  }

  pub(crate) fn web_url(&self) -> String {
    format!("{}/post/{}", self.author.profile_url(), self.rkey())
  }
}
