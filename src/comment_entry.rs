use super::*;

pub(crate) struct CommentEntry {
  pub(crate) body: String,
  pub(crate) children: Vec<usize>,
  pub(crate) depth: usize,
  pub(crate) expanded: bool,
  pub(crate) handle: String,
  pub(crate) meta: String,
  pub(crate) name: String,
  pub(crate) parent: Option<usize>,
  pub(crate) permalink: String,
  pub(crate) uri: String,
}

impl CommentEntry {
  pub(crate) fn body(&self) -> &str {
    self.body.as_str()
  }

  pub(crate) fn has_children(&self) -> bool {
    !self.children.is_empty()
  }

  pub(crate) fn header(&self) -> String {
    format!("{} @{}", self.name, self.handle)
  }

  pub(crate) fn new(
    post: &Post,
    depth: usize,
    parent: Option<usize>,
  ) -> Self {
    Self {
      body: post.text.clone(),
      children: Vec::new(),
      depth,
      expanded: true,
      handle: post.author.handle.clone(),
      meta: post.meta(),
      name: post.author.name().to_string(),
      parent,
      permalink: post.web_url(),
      uri: post.uri.clone(),
    }
  }
}
