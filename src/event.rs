use super::*;

pub(crate) enum Event {
  Thread {
    request_id: u64,
    result: Result<Thread>,
  },
}
