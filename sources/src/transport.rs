//! Network transport used by the fetcher.
//!
//! The `Transport` trait is the seam between the fetch logic and the actual HTTP client so
//! that the classification rules can be exercised without a network.
//!

use std::fmt::Debug;

use reqwest::blocking::Client;
use tracing::{debug, trace};

use crate::FetchError;

/// Raw answer from a transport, before any success check.
///
#[derive(Clone, Debug, Default)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Complete body
    pub body: Vec<u8>,
}

impl Response {
    /// 2xx
    ///
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Perform a single GET and return whatever came back.
///
/// Implementations only fail for transport problems (connection, timeout, ...); any HTTP
/// status, good or bad, is a valid `Response`.
///
pub trait Transport: Debug {
    fn get(&self, url: &str) -> Result<Response, FetchError>;
}

/// Blocking `reqwest` client with its default settings (no custom headers, default timeout).
///
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: Client::new(),
        }
    }
}

impl Transport for HttpTransport {
    #[tracing::instrument(skip(self))]
    fn get(&self, url: &str) -> Result<Response, FetchError> {
        trace!("GET {}", url);

        let resp = self.client.get(url).send()?;
        let status = resp.status().as_u16();
        debug!("status={}", status);

        // Whole body in memory, no streaming.
        //
        let body = resp.bytes()?.to_vec();
        trace!("{} bytes read", body.len());

        Ok(Response { status, body })
    }
}
