//! HTTP transport used by the fetchers.
//!
//! The fetchers only need a single blocking-style GET, so the seam is kept
//! small enough to swap in a recording transport under test.

use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

use crate::error::FetchError;

/// Identifies this client to the encyclopedia service.
pub const USER_AGENT: &str = concat!(
    "wikifetch/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/wikifetch/wikifetch)"
);

/// Default total request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// A completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Issues GET requests.
pub trait Transport {
    /// Fetches `url`. Non-2xx responses are returned, not turned into errors.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send;
}

/// Timeouts and identification for the reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(options: &TransportOptions) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let transport_error = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;
        tracing::debug!(%url, status, bytes = body.len(), "response");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing {
    //! A canned, call-recording transport.

    use super::*;
    use std::sync::Mutex;

    enum Reply {
        Respond { status: u16, body: Bytes },
        Fail(String),
    }

    /// Answers requests whose URL contains a registered pattern.
    /// Unmatched URLs get a 404.
    #[derive(Default)]
    pub struct MockTransport {
        routes: Mutex<Vec<(String, Reply)>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, pattern: &str, status: u16, body: impl Into<Bytes>) -> Self {
            self.routes.lock().unwrap().push((
                pattern.to_string(),
                Reply::Respond {
                    status,
                    body: body.into(),
                },
            ));
            self
        }

        pub fn json(self, pattern: &str, body: &serde_json::Value) -> Self {
            self.respond(pattern, 200, body.to_string())
        }

        pub fn fail(self, pattern: &str, message: &str) -> Self {
            self.routes
                .lock()
                .unwrap()
                .push((pattern.to_string(), Reply::Fail(message.to_string())));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn calls_matching(&self, pattern: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|url| url.contains(pattern))
                .count()
        }
    }

    impl Transport for MockTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());

            let routes = self.routes.lock().unwrap();
            match routes.iter().find(|(pattern, _)| url.contains(pattern.as_str())) {
                Some((_, Reply::Respond { status, body })) => Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                }),
                Some((_, Reply::Fail(message))) => Err(FetchError::Transport {
                    url: url.to_string(),
                    message: message.clone(),
                }),
                None => Ok(HttpResponse {
                    status: 404,
                    body: Bytes::new(),
                }),
            }
        }
    }

    /// Lets tests hand the same mock to a client and inspect it afterwards.
    impl<T: Transport + Sync> Transport for std::sync::Arc<T> {
        fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send {
            (**self).get(url)
        }
    }
}
