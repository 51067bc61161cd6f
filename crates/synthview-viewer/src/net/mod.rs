pub mod http;
pub mod protocol;

pub use http::{Fetcher, HttpBackend};
pub use protocol::{FetchKind, FetchRequest, Incoming, IncomingKind, RequestToken};
