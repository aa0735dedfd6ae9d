use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn comment_list_item(
    entry: &CommentEntry,
    available_width: u16,
  ) -> ListItem<'static> {
    let indent = format!("{BASE_INDENT}{}", "  ".repeat(entry.depth));

    let toggle = entry.has_children().then_some(if entry.expanded {
      "[-]"
    } else {
      "[+]"
    });

    let mut header = vec![Span::raw(indent.clone())];

    if let Some(symbol) = toggle {
      header.push(Span::raw(symbol));
      header.push(Span::raw(" "));
    }

    header.push(Span::styled(
      entry.header(),
      Style::default().fg(Color::White),
    ));

    let mut lines = vec![Line::from(header)];

    let wrap_width = usize::from(available_width)
      .saturating_sub(indent.chars().count())
      .max(1);

    for line in wrap_text(entry.body(), wrap_width) {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(line, Style::default().fg(Color::Gray)),
      ]));
    }

    lines.push(Line::from(vec![
      Span::raw(indent.clone()),
      Span::styled(entry.meta.clone(), Style::default().fg(Color::DarkGray)),
    ]));

    lines.push(Line::from(Span::raw(indent)));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(layout[1].height as usize);

    let widget = self.state.widget();

    let link = widget.root().map_or_else(String::new, |post| {
      truncate(&post.web_url(), usize::from(layout[0].width))
    });

    let reply_info = Paragraph::new(vec![
      Line::from(format!("{REPLY_INFO_PREFIX} Bluesky {REPLY_INFO_SUFFIX}")),
      Line::from(Span::styled(link, Style::default().fg(Color::Blue))),
    ]);

    frame.render_widget(reply_info, layout[0]);

    let view = self.state.view();
    let (visible, selected_pos) = view.visible_with_selection();

    let mut list_items: Vec<ListItem> = if visible.is_empty() {
      vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw("No comments yet."),
      ]))]
    } else {
      visible
        .iter()
        .map(|&idx| Self::comment_list_item(&view.entries[idx], layout[1].width))
        .collect()
    };

    if widget.has_more() {
      list_items.push(ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(
          format!("{SHOW_MORE_LABEL} (m)"),
          Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        ),
      ])));
    }

    let offset = view.offset.min(selected_pos.unwrap_or(0));

    let mut list_state = ListState::default()
      .with_selected(selected_pos)
      .with_offset(offset);

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self.state.view_mut().offset = list_state.offset();

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    self.state.help().draw(frame);
  }

  fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::FetchThread { request_id, uri } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        self.handle.spawn(async move {
          let _ = sender.send(Event::Thread {
            request_id,
            result: client.fetch_thread(&uri).await,
          });
        });
      }
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          self.state.set_transient_message(format!(
            "Opened in browser: {}",
            truncate(&url, 80)
          ));
        }
        Err(error) => {
          tracing::warn!(%error, %url, "could not open browser");

          self
            .state
            .set_transient_message(format!("Could not open link: {error}"));
        }
      },
    }
  }

  pub(crate) fn new(client: Client, uri: PostUri, widget: Widget) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state: State::new(uri, widget),
    }
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let action = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else {
        let page = self.state.list_height().max(1);
        self.state.view_mut().handle_key(key, page)
      };

      match self.state.dispatch_action(action) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }
        }
        Err(error) => {
          self.state.clear_pending_effects();
          self.state.set_transient_message(format!("error: {error}"));
        }
      }
    }

    Ok(())
  }
}
