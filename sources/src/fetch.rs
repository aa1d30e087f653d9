//! The fetcher: one GET, one classified outcome.
//!

use tracing::{error, info, trace};

use harvest_common::{Kind, Payload};

use crate::{FetchError, HttpTransport, Transport};

/// Fetch datasets through a given transport.
///
#[derive(Clone, Debug)]
pub struct Fetcher<T: Transport> {
    transport: T,
}

impl Default for Fetcher<HttpTransport> {
    fn default() -> Self {
        Fetcher::new(HttpTransport::new())
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Fetcher { transport }
    }

    /// Retrieve `url` and shape the body according to `kind`.
    ///
    /// - anything but a 2xx status is a `FetchError::HttpStatus`,
    /// - `Tabular` bodies stay raw bytes, every other kind is decoded as UTF-8,
    /// - `Text` bodies are lower-cased here, before they ever reach the disk.
    ///
    #[tracing::instrument(skip(self))]
    pub fn fetch(&self, url: &str, kind: Kind) -> Result<Payload, FetchError> {
        trace!("fetch({url}, {kind})");

        let resp = self.transport.get(url).map_err(|e| {
            error!("Failed to fetch {} data from {}: {}", kind, url, e);
            e
        })?;

        if !resp.is_success() {
            let e = FetchError::HttpStatus(resp.status);
            error!("Failed to fetch {} data from {}: {}", kind, url, e.kind());
            return Err(e);
        }

        let payload = if kind.is_binary() {
            Payload::Binary(resp.body)
        } else {
            let text = String::from_utf8_lossy(&resp.body).into_owned();
            match kind {
                Kind::Text => Payload::Text(text.to_lowercase()),
                _ => Payload::Text(text),
            }
        };

        info!("Fetched {} data from {}: {}", kind, url, payload);
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::Response;

    /// Canned transport, returns the same thing every time.
    ///
    #[derive(Debug)]
    struct Canned(Result<Response, FetchError>);

    impl Transport for Canned {
        fn get(&self, _url: &str) -> Result<Response, FetchError> {
            self.0.clone()
        }
    }

    fn ok(status: u16, body: &[u8]) -> Fetcher<Canned> {
        Fetcher::new(Canned(Ok(Response {
            status,
            body: body.to_vec(),
        })))
    }

    #[test]
    fn test_fetch_text_is_lowercased() {
        let f = ok(200, b"Cat, CAT. Dog!");

        let p = f.fetch("http://example.net/", Kind::Text).unwrap();
        assert_eq!(Payload::Text("cat, cat. dog!".to_string()), p);
    }

    #[rstest]
    #[case(Kind::Delimited, "Name,State\nA,OH\n")]
    #[case(Kind::Structured, r#"{"Stadiums": ["A"]}"#)]
    fn test_fetch_text_kinds_keep_case(#[case] kind: Kind, #[case] body: &str) {
        let f = ok(200, body.as_bytes());

        let p = f.fetch("http://example.net/", kind).unwrap();
        assert_eq!(Payload::Text(body.to_string()), p);
    }

    #[test]
    fn test_fetch_binary_untouched() {
        let body = [0xd0u8, 0xcf, 0x11, 0xe0, 0xa1, 0xb1, 0x1a, 0xe1];
        let f = ok(200, &body);

        let p = f.fetch("http://example.net/", Kind::Tabular).unwrap();
        assert_eq!(Payload::Binary(body.to_vec()), p);
    }

    #[test]
    fn test_fetch_invalid_utf8_replaced() {
        let f = ok(200, b"caf\xe9");

        let p = f.fetch("http://example.net/", Kind::Delimited).unwrap();
        assert_eq!(Payload::Text("caf\u{fffd}".to_string()), p);
    }

    #[rstest]
    #[case(404)]
    #[case(500)]
    #[case(301)]
    #[case(199)]
    fn test_fetch_bad_status(#[case] status: u16) {
        let f = ok(status, b"nope");

        let r = f.fetch("http://example.net/", Kind::Text);
        assert_eq!(Err(FetchError::HttpStatus(status)), r);
    }

    #[test]
    fn test_fetch_transport_error_passthrough() {
        let f = Fetcher::new(Canned(Err(FetchError::Timeout("slow".to_string()))));

        let r = f.fetch("http://example.net/", Kind::Text);
        assert_eq!(Err(FetchError::Timeout("slow".to_string())), r);
    }

    #[test]
    fn test_http_fetch_text() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/full.html");
            then.status(200).body("To Be Or NOT");
        });

        let f = Fetcher::default();
        let p = f.fetch(&server.url("/full.html"), Kind::Text);

        m.assert();
        assert_eq!(Ok(Payload::Text("to be or not".to_string())), p);
    }

    #[test]
    fn test_http_fetch_binary() {
        let server = MockServer::start();
        let body = vec![0u8, 1, 2, 3, 254, 255];
        let m = server.mock(|when, then| {
            when.method(GET).path("/data.xls");
            then.status(200).body(&body);
        });

        let f = Fetcher::default();
        let p = f.fetch(&server.url("/data.xls"), Kind::Tabular);

        m.assert();
        assert_eq!(Ok(Payload::Binary(body.clone())), p);
    }

    #[test]
    fn test_http_fetch_404() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/missing.csv");
            then.status(404);
        });

        let f = Fetcher::default();
        let r = f.fetch(&server.url("/missing.csv"), Kind::Delimited);

        m.assert();
        assert_eq!(Err(FetchError::HttpStatus(404)), r);
    }

    #[test]
    fn test_http_connection_refused() {
        // Nothing listens on port 1.
        let f = Fetcher::default();
        let r = f.fetch("http://127.0.0.1:1/data.json", Kind::Structured);

        assert!(matches!(r, Err(FetchError::ConnectionFailed(_))));
    }

    #[test]
    fn test_http_bad_url() {
        let f = Fetcher::default();
        let r = f.fetch("not a url", Kind::Text);

        assert!(matches!(r, Err(FetchError::OtherTransport(_))));
    }
}
