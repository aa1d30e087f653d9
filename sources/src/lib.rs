//! Module to fetch datasets from remote locations.
//!
//! A `Fetcher` performs one GET through a `Transport` and turns the outcome into either a
//! `Payload` or a classified `FetchError`.  `HttpTransport` is the real thing, based on a
//! blocking `reqwest` client.
//!

pub use error::*;
pub use fetch::*;
pub use transport::*;

mod error;
mod fetch;
mod transport;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
