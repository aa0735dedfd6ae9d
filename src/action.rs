#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
  HideHelp,
  None,
  OpenComment,
  OpenPost,
  Quit,
  Refresh,
  ShowHelp,
  ShowMore,
}
