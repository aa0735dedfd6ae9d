use {
  super::*,
  html_escape::{encode_double_quoted_attribute, encode_quoted_attribute},
};

const EXTERNAL_LINK: &str = r#"target="_blank" rel="noopener noreferrer""#;

/// Renders one comment and its nested replies. Every interpolated value is
/// escaped.
pub(crate) fn comment(node: &ThreadNode, out: &mut String) {
  let post = &node.post;
  let author = &post.author;

  out.push_str("<div class=\"comment\">\n<div class=\"author\">\n");

  let _ = writeln!(
    out,
    "<a href=\"{}\" {EXTERNAL_LINK}>",
    encode_double_quoted_attribute(&author.profile_url())
  );

  if let Some(avatar) = author.avatar.as_deref() {
    let _ = writeln!(
      out,
      "<img width=\"22px\" src=\"{}\" />",
      encode_double_quoted_attribute(avatar)
    );
  }

  let _ = writeln!(
    out,
    "<span>{}&nbsp;</span>\n<span class=\"authorhandle\">@{}</span>\n</a>",
    encode_quoted_attribute(author.name()),
    encode_quoted_attribute(&author.handle)
  );

  let _ = writeln!(
    out,
    "<a href=\"{}\" {EXTERNAL_LINK}>\n<p class=\"comment-text\">{}</p>\n</a>",
    encode_double_quoted_attribute(&post.web_url()),
    encode_quoted_attribute(&post.text)
  );

  let _ = writeln!(out, "<small class=\"comment-meta\">{}</small>", post.meta());

  out.push_str("</div>\n");

  if node.has_replies() {
    out.push_str("<div class=\"replies-container\">\n");

    for reply in &node.replies {
      comment(reply, out);
    }

    out.push_str("</div>\n");
  }

  out.push_str("</div>\n");
}

pub(crate) fn error(message: &str) -> String {
  format!("<p class=\"error\">{}</p>", encode_quoted_attribute(message))
}

/// Wraps a fragment in the custom element with a declarative shadow root so
/// the `:host` rules apply and the styles stay scoped to the widget.
pub(crate) fn host(inner: &str) -> String {
  format!(
    "<bsky-comments>\n<template shadowrootmode=\"open\">\n{inner}\n</template>\n</bsky-comments>\n"
  )
}

pub(crate) fn reply_info(post: Option<&Post>) -> String {
  let link = post.map_or_else(
    || "Bluesky".to_string(),
    |post| {
      format!(
        "<a href=\"{}\" {EXTERNAL_LINK}>Bluesky</a>",
        encode_double_quoted_attribute(&post.web_url())
      )
    },
  );

  format!(
    "<p class=\"reply-info\">\n{REPLY_INFO_PREFIX} {link} {REPLY_INFO_SUFFIX}\n</p>"
  )
}

pub(crate) fn show_more_button(hidden: bool) -> String {
  let style = if hidden { " style=\"display: none\"" } else { "" };

  format!("<button id=\"show-more\"{style}>{SHOW_MORE_LABEL}</button>")
}
