use super::*;

/// Body of `app.bsky.feed.getPostThread`.
#[derive(Debug, Deserialize)]
pub(crate) struct ThreadResponse {
  thread: Option<ThreadItem>,
}

#[derive(Debug, Deserialize)]
struct ThreadItem {
  post: Option<PostView>,
  replies: Option<Vec<ThreadItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostView {
  author: Author,
  #[serde(default, deserialize_with = "deserialize_count")]
  like_count: u64,
  record: Option<PostRecord>,
  #[serde(default, deserialize_with = "deserialize_count")]
  reply_count: u64,
  uri: String,
}

#[derive(Debug, Deserialize)]
struct PostRecord {
  text: Option<String>,
}

impl ThreadResponse {
  /// Converts the response into a thread, failing when the thread or its
  /// replies are missing.
  pub(crate) fn into_thread(self) -> Result<Thread> {
    let thread = self.into_thread_unchecked();

    if thread.replies.is_none() {
      bail!("invalid thread data: missing expected properties");
    }

    Ok(thread)
  }

  fn into_thread_unchecked(self) -> Thread {
    let Some(item) = self.thread else {
      return Thread {
        post: None,
        replies: None,
      };
    };

    Thread {
      post: item.post.map(PostView::into_post),
      replies: item.replies.map(ThreadItem::into_nodes),
    }
  }
}

impl ThreadItem {
  /// Not-found and blocked placeholders carry no post and are dropped.
  fn into_nodes(items: Vec<ThreadItem>) -> Vec<ThreadNode> {
    items
      .into_iter()
      .filter_map(|item| {
        let post = item.post?;

        Some(ThreadNode {
          post: post.into_post(),
          replies: item.replies.map(Self::into_nodes).unwrap_or_default(),
        })
      })
      .collect()
  }
}

impl PostView {
  fn into_post(self) -> Post {
    Post {
      author: self.author,
      like_count: self.like_count,
      reply_count: self.reply_count,
      text: self.record.and_then(|record| record.text).unwrap_or_default(),
      uri: self.uri,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const RESPONSE: &str = r#"{
    "thread": {
      "$type": "app.bsky.feed.defs#threadViewPost",
      "post": {
        "uri": "at://did:plc:root/app.bsky.feed.post/3root",
        "cid": "bafyroot",
        "author": {
          "did": "did:plc:root",
          "handle": "blog.example.com",
          "displayName": "Blog"
        },
        "record": { "$type": "app.bsky.feed.post", "text": "New post" },
        "likeCount": 10,
        "replyCount": 2
      },
      "replies": [
        {
          "$type": "app.bsky.feed.defs#threadViewPost",
          "post": {
            "uri": "at://did:plc:alice/app.bsky.feed.post/3a",
            "author": {
              "did": "did:plc:alice",
              "handle": "alice.bsky.social",
              "avatar": "https://cdn.example.com/alice.jpg"
            },
            "record": { "text": "Nice!" },
            "likeCount": 3
          },
          "replies": [
            {
              "$type": "app.bsky.feed.defs#threadViewPost",
              "post": {
                "uri": "at://did:plc:bob/app.bsky.feed.post/3b",
                "author": { "did": "did:plc:bob", "handle": "bob.bsky.social" },
                "record": {},
                "likeCount": null
              }
            }
          ]
        },
        {
          "$type": "app.bsky.feed.defs#notFoundPost",
          "uri": "at://did:plc:gone/app.bsky.feed.post/3gone",
          "notFound": true
        }
      ]
    }
  }"#;

  fn parse(input: &str) -> ThreadResponse {
    serde_json::from_str(input).unwrap()
  }

  #[test]
  fn into_thread_builds_nested_replies() {
    let thread = parse(RESPONSE).into_thread().unwrap();

    let root = thread.post.unwrap();

    assert_eq!(root.author.name(), "Blog");
    assert_eq!(root.text, "New post");
    assert_eq!(root.like_count, 10);

    let replies = thread.replies.unwrap();

    assert_eq!(replies.len(), 1, "placeholder replies are dropped");

    let alice = &replies[0];

    assert_eq!(alice.post.author.handle, "alice.bsky.social");
    assert_eq!(
      alice.post.author.avatar.as_deref(),
      Some("https://cdn.example.com/alice.jpg")
    );
    assert_eq!(alice.post.like_count, 3);
    assert_eq!(alice.post.reply_count, 0);

    let bob = &alice.replies[0];

    assert_eq!(bob.post.text, "");
    assert_eq!(bob.post.like_count, 0);
    assert!(bob.replies.is_empty());
  }

  #[test]
  fn into_thread_rejects_missing_thread() {
    let error = parse("{}").into_thread().unwrap_err();

    assert_eq!(
      error.to_string(),
      "invalid thread data: missing expected properties"
    );
  }

  #[test]
  fn into_thread_rejects_missing_replies() {
    let response = parse(
      r#"{"thread": {"post": {"uri": "at://x/app.bsky.feed.post/1", "author": {"did": "did:plc:x", "handle": "x.test"}}}}"#,
    );

    assert!(response.into_thread().is_err());
  }

  #[test]
  fn into_thread_accepts_empty_replies() {
    let thread = parse(r#"{"thread": {"replies": []}}"#).into_thread().unwrap();

    assert!(thread.post.is_none());
    assert_eq!(thread.replies, Some(Vec::new()));
  }
}
