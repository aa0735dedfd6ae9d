use super::*;

#[derive(Clone, Debug)]
pub(crate) enum Effect {
  FetchThread { request_id: u64, uri: PostUri },
  OpenUrl { url: String },
}
