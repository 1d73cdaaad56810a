use std::collections::HashMap;

use futures::future::BoxFuture;
use log::trace;
use reqwest::Client;
use reqwest::header::HeaderMap;
use tokio::fs::read_to_string as tokio_fs_read_to_string;
use url::Url;

use super::{Method, NetError, Request, Response, Transport};

/// Real transport: `http`/`https` through reqwest, `file` from the local disk.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch_http(&self, request: Request) -> Result<Response, NetError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(request.url.clone()),
            Method::Post => self.client.post(request.url.clone()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response_headers(response.headers());
        let body = response.text().await?;
        trace!("{} {}: {status}", request.method.as_str(), request.url);
        Ok(Response {
            status,
            headers,
            body,
        })
    }

    async fn fetch_file(url: Url) -> Result<Response, NetError> {
        let path = url
            .to_file_path()
            .map_err(|()| NetError::InvalidPath(url.clone()))?;
        let body = tokio_fs_read_to_string(path)
            .await
            .map_err(|source| NetError::Io { url, source })?;
        Ok(Response {
            status: 200,
            body,
            ..Response::default()
        })
    }
}

/// Lower-cased response headers. `transfer-encoding` is left out: reqwest has
/// already removed the chunked framing from the body it returns.
fn response_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter(|(name, _)| name.as_str() != "transfer-encoding")
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|text| (name.as_str().to_ascii_lowercase(), text.to_owned()))
        })
        .collect()
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, NetError>> {
        Box::pin(async move {
            match request.url.scheme() {
                "http" | "https" => self.fetch_http(request).await,
                "file" => Self::fetch_file(request.url).await,
                other => Err(NetError::UnsupportedScheme(other.to_owned())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue};

    use super::response_headers;

    #[test]
    fn dechunked_bodies_drop_transfer_encoding_only() {
        let mut headers = HeaderMap::new();
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("content-encoding", HeaderValue::from_static("gzip"));
        headers.insert("Set-Cookie", HeaderValue::from_static("id=1"));

        let kept = response_headers(&headers);
        assert!(!kept.contains_key("transfer-encoding"));
        assert_eq!(kept.get("content-encoding").map(String::as_str), Some("gzip"));
        assert_eq!(kept.get("set-cookie").map(String::as_str), Some("id=1"));
    }
}
