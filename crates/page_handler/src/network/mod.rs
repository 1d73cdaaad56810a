//! Fetching documents and subresources.
//!
//! A [`Session`] sits between pages and a pluggable [`Transport`]: it attaches and
//! records cookies and rejects responses the page cannot consume.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use log::{debug, info};
use text::FontCache;
use thiserror::Error;
use url::Url;

mod cookies;
mod http;

pub use cookies::{CookieJar, StoredCookie};
pub use http::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    /// Extra headers, names lower-cased.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    pub status: u16,
    /// Header names lower-cased; a repeated header keeps its last value.
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum NetError {
    #[error("unsupported url scheme `{0}`")]
    UnsupportedScheme(String),
    #[error("{url} answered {status}")]
    Status { url: Url, status: u16 },
    #[error("{url} was sent with `{header}`, which cannot be decoded")]
    Encoding { url: Url, header: &'static str },
    #[error("{0} is not a local file path")]
    InvalidPath(Url),
    #[error("reading {url}")]
    Io {
        url: Url,
        #[source]
        source: io::Error,
    },
    #[error("http request failed")]
    Http(#[from] reqwest::Error),
}

/// Moves requests over the wire.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, NetError>>;
}

const UNSUPPORTED_ENCODINGS: [&str; 2] = ["transfer-encoding", "content-encoding"];

/// Browser-wide state shared by every page: the transport, the cookie jar and the
/// font cache.
pub struct Session {
    transport: Box<dyn Transport>,
    cookies: Mutex<CookieJar>,
    fonts: Arc<FontCache>,
}

impl Session {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::with_fonts(transport, Arc::new(FontCache::default()))
    }

    pub fn with_fonts(transport: impl Transport + 'static, fonts: Arc<FontCache>) -> Self {
        Self {
            transport: Box::new(transport),
            cookies: Mutex::new(CookieJar::new()),
            fonts,
        }
    }

    /// A session over HTTP(S) and local files.
    pub fn http() -> Self {
        Self::new(HttpTransport::new())
    }

    pub fn fonts(&self) -> &Arc<FontCache> {
        &self.fonts
    }

    /// Snapshot of the cookie jar.
    pub fn cookies(&self) -> CookieJar {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch `url`, POSTing `payload` when given, on behalf of the page at `top_level`.
    ///
    /// Returns the lower-cased response headers and the body.
    ///
    /// # Errors
    /// Transport failures, any status other than 200, and responses carrying a
    /// `transfer-encoding` or `content-encoding` header.
    ///
    /// Over real HTTP this check only sees `content-encoding`: [`HttpTransport`]
    /// removes `transfer-encoding` because reqwest has already undone the chunked
    /// framing, so the body it hands back is never transfer-encoded. Transports
    /// that return raw framing must keep the header so the request is rejected.
    pub async fn request(
        &self,
        url: &Url,
        top_level: Option<&Url>,
        payload: Option<&str>,
    ) -> Result<(HashMap<String, String>, String), NetError> {
        let method = if payload.is_some() {
            Method::Post
        } else {
            Method::Get
        };
        let mut headers = Vec::new();
        {
            let jar = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cookie) = jar.header_for(url, top_level, method) {
                headers.push(("cookie".to_owned(), cookie.to_owned()));
            }
        }
        if payload.is_some() {
            headers.push((
                "content-type".to_owned(),
                "application/x-www-form-urlencoded".to_owned(),
            ));
        }
        info!("{} {url}", method.as_str());
        let response = self
            .transport
            .send(Request {
                method,
                url: url.clone(),
                headers,
                body: payload.map(str::to_owned),
            })
            .await?;

        if response.status != 200 {
            return Err(NetError::Status {
                url: url.clone(),
                status: response.status,
            });
        }
        if let Some(header) = UNSUPPORTED_ENCODINGS
            .into_iter()
            .find(|header| response.headers.contains_key(*header))
        {
            return Err(NetError::Encoding {
                url: url.clone(),
                header,
            });
        }
        if let (Some(cookie), Some(host)) = (response.headers.get("set-cookie"), url.host_str()) {
            self.cookies
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .store(host, cookie);
        }
        debug!("{url}: {} bytes", response.body.len());
        Ok((response.headers, response.body))
    }
}
