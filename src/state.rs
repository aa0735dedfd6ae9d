use super::*;

pub(crate) struct State {
  help: HelpView,
  list_height: usize,
  message: String,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  pending_request: Option<u64>,
  transient_message: Option<TransientMessage>,
  uri: PostUri,
  view: CommentView,
  widget: Widget,
}

impl State {
  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  pub(crate) fn dispatch_action(&mut self, action: Action) -> Result<Dispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "action dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match action {
      Action::Quit => should_exit = true,
      Action::ShowHelp => self.help.show(&mut self.message),
      Action::HideHelp => self.help.hide(&mut self.message),
      Action::ShowMore => self.show_more(),
      Action::OpenComment => self.open_comment_link()?,
      Action::OpenPost => self.open_post_link()?,
      Action::Refresh => self.refresh(),
      Action::None => {}
    }

    Ok(Dispatch {
      effects: self.pending_effects.drain(..).collect(),
      should_exit,
    })
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::Thread { request_id, result } => {
        if self.pending_request != Some(request_id) {
          tracing::debug!(request_id, "ignoring superseded thread response");
          return;
        }

        self.pending_request = None;

        match result {
          Ok(thread) => {
            self.widget.replace_thread(thread);
            self.rebuild_view();

            if !self.help.is_visible() {
              self.message = COMMENTS_STATUS.into();
            }
          }
          Err(error) => {
            if !self.help.is_visible() {
              self.message = COMMENTS_STATUS.into();
            }

            self.set_transient_message(format!("{LOAD_ERROR}: {error}"));
          }
        }
      }
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn list_height(&self) -> usize {
    self.list_height
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn new(uri: PostUri, widget: Widget) -> Self {
    let view = CommentView::new(&widget, None, &HashSet::new());

    Self {
      help: HelpView::new(),
      list_height: 0,
      message: COMMENTS_STATUS.into(),
      next_request_id: 0,
      pending_effects: Vec::new(),
      pending_request: None,
      transient_message: None,
      uri,
      view,
      widget,
    }
  }

  fn open_comment_link(&mut self) -> Result {
    let Some(entry) = self.view.selected_entry() else {
      self.set_transient_message("No comment selected".into());
      return Ok(());
    };

    let url = entry.permalink.clone();

    self.pending_effects.push(Effect::OpenUrl { url });

    Ok(())
  }

  fn open_post_link(&mut self) -> Result {
    let url = self
      .widget
      .root()
      .map(Post::web_url)
      .ok_or_else(|| anyhow!("thread has no root post to open"))?;

    self.pending_effects.push(Effect::OpenUrl { url });

    Ok(())
  }

  fn rebuild_view(&mut self) {
    let focus = self.view.selected_entry().map(|entry| entry.uri.clone());

    let collapsed = self.view.collapsed_uris();

    self.view = CommentView::new(&self.widget, focus.as_deref(), &collapsed);
  }

  fn refresh(&mut self) {
    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);
    self.pending_request = Some(request_id);

    self.pending_effects.push(Effect::FetchThread {
      request_id,
      uri: self.uri.clone(),
    });

    if !self.help.is_visible() {
      self.message = LOADING_THREAD_STATUS.into();
    }
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let restore = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.restore().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), restore));

    self.message = message;
  }

  fn show_more(&mut self) {
    if !self.widget.has_more() {
      self.set_transient_message("All comments are shown".into());
      return;
    }

    self.widget.show_more();
    self.rebuild_view();
  }

  pub(crate) fn update_transient_message(&mut self) {
    let Some(transient) = self.transient_message.as_ref() else {
      return;
    };

    if self.message != transient.text() {
      self.transient_message = None;
    } else if transient.is_expired_at(Instant::now()) {
      self.message = transient.restore().to_string();
      self.transient_message = None;
    }
  }

  pub(crate) fn view(&self) -> &CommentView {
    &self.view
  }

  pub(crate) fn view_mut(&mut self) -> &mut CommentView {
    &mut self.view
  }

  pub(crate) fn widget(&self) -> &Widget {
    &self.widget
  }
}
