use super::*;

/// The root of a post thread. `replies` is `None` when the API response
/// carried no replies field at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Thread {
  pub(crate) post: Option<Post>,
  pub(crate) replies: Option<Vec<ThreadNode>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ThreadNode {
  pub(crate) post: Post,
  pub(crate) replies: Vec<ThreadNode>,
}

impl Thread {
  /// Orders replies at every depth by like count, most liked first. Ties
  /// keep the order the API returned them in.
  pub(crate) fn sort_by_likes(&mut self) {
    if let Some(replies) = self.replies.as_mut() {
      ThreadNode::sort_all(replies);
    }
  }
}

impl ThreadNode {
  pub(crate) fn has_replies(&self) -> bool {
    !self.replies.is_empty()
  }

  fn sort_all(nodes: &mut [ThreadNode]) {
    nodes.sort_by(|a, b| b.post.like_count.cmp(&a.post.like_count));

    for node in nodes {
      Self::sort_all(&mut node.replies);
    }
  }
}

#[cfg(test)]
pub(crate) mod fixtures {
  use super::*;

  pub(crate) fn post(rkey: &str, like_count: u64) -> Post {
    Post {
      author: Author {
        avatar: None,
        did: format!("did:plc:{rkey}"),
        display_name: Some(format!("User {rkey}")),
        handle: format!("{rkey}.bsky.social"),
      },
      like_count,
      reply_count: 0,
      text: format!("comment {rkey}"),
      uri: format!("at://did:plc:{rkey}/app.bsky.feed.post/{rkey}"),
    }
  }

  pub(crate) fn node(
    rkey: &str,
    like_count: u64,
    replies: Vec<ThreadNode>,
  ) -> ThreadNode {
    ThreadNode {
      post: post(rkey, like_count),
      replies,
    }
  }

  pub(crate) fn thread(replies: Vec<ThreadNode>) -> Thread {
    Thread {
      post: Some(post("root", 0)),
      replies: Some(replies),
    }
  }
}
