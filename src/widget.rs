use super::*;

/// A rendered comment thread together with how many top-level replies are
/// currently shown.
#[derive(Clone, Debug)]
pub(crate) struct Widget {
  include_styles: bool,
  theme: Theme,
  thread: Thread,
  visible_count: usize,
}

impl Widget {
  pub(crate) const INITIAL_VISIBLE_COUNT: usize = 3;

  pub(crate) const SHOW_MORE_STEP: usize = 5;

  fn fragment(&self, include_styles: bool, keep_hidden_controls: bool) -> String {
    let Some(replies) = self.thread.replies.as_deref() else {
      return markup::error(NO_COMMENTS);
    };

    let mut out = String::from("<comments>\n");

    out.push_str(&markup::reply_info(self.thread.post.as_ref()));
    out.push_str("\n<div id=\"comments\">\n");

    for reply in replies.iter().take(self.visible_count) {
      markup::comment(reply, &mut out);
    }

    out.push_str("</div>\n");

    let hidden = !self.has_more();

    if keep_hidden_controls || !hidden {
      out.push_str(&markup::show_more_button(hidden));
      out.push('\n');
    }

    out.push_str("</comments>");

    if include_styles {
      out.push('\n');
      out.push_str(&self.theme.style_element());
    }

    out
  }

  pub(crate) fn has_more(&self) -> bool {
    self.visible_count < self.reply_count()
  }

  pub(crate) fn new(mut thread: Thread, theme: Theme) -> Self {
    thread.sort_by_likes();

    Self {
      include_styles: true,
      theme,
      thread,
      visible_count: Self::INITIAL_VISIBLE_COUNT,
    }
  }

  /// The widget as an HTML fragment ready to embed in a page.
  pub(crate) fn render(&self) -> String {
    markup::host(&self.fragment(self.include_styles, true))
  }

  /// Error widgets carry no styles.
  pub(crate) fn render_error(message: &str) -> String {
    markup::host(&markup::error(message))
  }

  /// The widget converted to plain text. Controls that would be hidden in
  /// the page are left out.
  pub(crate) fn render_text(&self, width: usize) -> Result<String> {
    let html = self.fragment(false, false);

    html2text::from_read(html.as_bytes(), width)
      .context("failed to convert comments to text")
  }

  /// Replaces the thread, keeping the current visible count.
  pub(crate) fn replace_thread(&mut self, mut thread: Thread) {
    thread.sort_by_likes();
    self.thread = thread;
  }

  pub(crate) fn reply_count(&self) -> usize {
    self.thread.replies.as_ref().map_or(0, Vec::len)
  }

  pub(crate) fn root(&self) -> Option<&Post> {
    self.thread.post.as_ref()
  }

  pub(crate) fn show_more(&mut self) {
    self.visible_count = self.visible_count.saturating_add(Self::SHOW_MORE_STEP);
  }

  pub(crate) fn visible_count(&self) -> usize {
    self.visible_count
  }

  /// Top-level replies in the visible window, most liked first.
  pub(crate) fn visible_replies(&self) -> &[ThreadNode] {
    let replies = self.thread.replies.as_deref().unwrap_or_default();

    &replies[..replies.len().min(self.visible_count)]
  }

  pub(crate) fn with_styles(self, include_styles: bool) -> Self {
    Self {
      include_styles,
      ..self
    }
  }

  pub(crate) fn with_visible_count(self, visible_count: usize) -> Self {
    Self {
      visible_count,
      ..self
    }
  }
}
