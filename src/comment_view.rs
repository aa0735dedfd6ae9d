use super::*;

pub(crate) struct CommentView {
  pub(crate) entries: Vec<CommentEntry>,
  pub(crate) offset: usize,
  pub(crate) selected: Option<usize>,
}

impl CommentView {
  pub(crate) fn collapse_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.expanded && !entry.children.is_empty() {
        entry.expanded = false;
      } else if let Some(parent) = entry.parent {
        self.selected = Some(parent);
      }
    }

    self.ensure_selection_visible();
  }

  /// URIs of comments whose replies are folded, so a rebuilt view can keep
  /// them folded.
  pub(crate) fn collapsed_uris(&self) -> HashSet<String> {
    self
      .entries
      .iter()
      .filter(|entry| !entry.expanded)
      .map(|entry| entry.uri.clone())
      .collect()
  }

  pub(crate) fn ensure_selection_visible(&mut self) {
    let mut current = self.selected;

    while let Some(idx) = current {
      if self.is_visible(idx) {
        self.selected = Some(idx);
        return;
      }

      current = self.entries.get(idx).and_then(|entry| entry.parent);
    }

    self.selected = self.visible_indexes().first().copied();
  }

  pub(crate) fn expand_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.children.is_empty() {
        return;
      }

      if entry.expanded {
        if let Some(child) = entry.children.first().copied() {
          self.selected = Some(child);
        }
      } else {
        entry.expanded = true;
      }
    }

    self.ensure_selection_visible();
  }

  /// Applies navigation keys directly and returns the action for anything
  /// that needs state beyond the view.
  pub(crate) fn handle_key(&mut self, key: KeyEvent, page: usize) -> Action {
    let modifiers = key.modifiers;

    match key.code {
      KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
      KeyCode::Char('?') => Action::ShowHelp,
      KeyCode::Char('m' | 'M') => Action::ShowMore,
      KeyCode::Char('o' | 'O') => Action::OpenComment,
      KeyCode::Char('p' | 'P') => Action::OpenPost,
      KeyCode::Char('r' | 'R') => Action::Refresh,
      KeyCode::Down | KeyCode::Char('j') => {
        self.select_next();
        Action::None
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.select_previous();
        Action::None
      }
      KeyCode::PageDown => {
        self.page_down(page);
        Action::None
      }
      KeyCode::PageUp => {
        self.page_up(page);
        Action::None
      }
      KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
        self.page_down(page);
        Action::None
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        self.page_up(page);
        Action::None
      }
      KeyCode::Left | KeyCode::Char('h') => {
        self.collapse_selected();
        Action::None
      }
      KeyCode::Right | KeyCode::Char('l') => {
        self.expand_selected();
        Action::None
      }
      KeyCode::Enter | KeyCode::Char(' ') => {
        self.toggle_selected();
        Action::None
      }
      KeyCode::Home => {
        self.select_index_at(0);
        Action::None
      }
      KeyCode::End => {
        let (visible, _) = self.visible_with_selection();

        if !visible.is_empty() {
          self.select_index_at(visible.len().saturating_sub(1));
        }

        Action::None
      }
      _ => Action::None,
    }
  }

  pub(crate) fn is_visible(&self, idx: usize) -> bool {
    let mut current = Some(idx);

    while let Some(i) = current {
      if let Some(parent) = self.entries.get(i).and_then(|entry| entry.parent) {
        if let Some(parent_entry) = self.entries.get(parent)
          && !parent_entry.expanded
        {
          return false;
        }

        current = Some(parent);
      } else {
        break;
      }
    }

    true
  }

  pub(crate) fn move_by(&mut self, delta: isize) {
    let (visible, selected_pos) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = selected_pos.unwrap_or(0);
    let max_index = visible.len().saturating_sub(1);

    let target = if delta >= 0 {
      current.saturating_add(delta.unsigned_abs()).min(max_index)
    } else {
      current.saturating_sub(delta.unsigned_abs())
    };

    self.selected = Some(visible[target]);
  }

  /// Flattens the widget's visible replies depth first. `focus` names the
  /// comment URI to select, and comments in `collapsed` start folded.
  pub(crate) fn new(
    widget: &Widget,
    focus: Option<&str>,
    collapsed: &HashSet<String>,
  ) -> Self {
    let mut entries = Vec::new();

    for node in widget.visible_replies() {
      Self::push_node(&mut entries, node, None, 0, collapsed);
    }

    let selected = focus
      .and_then(|uri| entries.iter().position(|entry| entry.uri == uri))
      .or_else(|| (!entries.is_empty()).then_some(0));

    let mut view = Self {
      entries,
      offset: 0,
      selected,
    };

    view.ensure_selection_visible();

    view
  }

  pub(crate) fn page_down(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(delta);
  }

  pub(crate) fn page_up(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(-delta);
  }

  fn push_node(
    entries: &mut Vec<CommentEntry>,
    node: &ThreadNode,
    parent: Option<usize>,
    depth: usize,
    collapsed: &HashSet<String>,
  ) -> usize {
    let idx = entries.len();

    let mut entry = CommentEntry::new(&node.post, depth, parent);

    entry.expanded = !collapsed.contains(&entry.uri);

    entries.push(entry);

    let children = node
      .replies
      .iter()
      .map(|child| {
        Self::push_node(
          entries,
          child,
          Some(idx),
          depth.saturating_add(1),
          collapsed,
        )
      })
      .collect();

    if let Some(entry) = entries.get_mut(idx) {
      entry.children = children;
    }

    idx
  }

  pub(crate) fn select_index_at(&mut self, pos: usize) {
    let (visible, _) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let index = pos.min(visible.len().saturating_sub(1));

    self.selected = Some(visible[index]);
  }

  pub(crate) fn select_next(&mut self) {
    self.move_by(1);
  }

  pub(crate) fn select_previous(&mut self) {
    self.move_by(-1);
  }

  pub(crate) fn selected_entry(&self) -> Option<&CommentEntry> {
    self.selected.and_then(|idx| self.entries.get(idx))
  }

  pub(crate) fn toggle_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.children.is_empty() {
        return;
      }

      entry.expanded = !entry.expanded;
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn visible_indexes(&self) -> Vec<usize> {
    (0..self.entries.len())
      .filter(|&idx| self.is_visible(idx))
      .collect()
  }

  pub(crate) fn visible_with_selection(&self) -> (Vec<usize>, Option<usize>) {
    let visible = self.visible_indexes();

    let selected_pos = self
      .selected
      .and_then(|selected| visible.iter().position(|&idx| idx == selected));

    (visible, selected_pos)
  }
}
