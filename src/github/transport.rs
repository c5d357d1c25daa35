use crate::error::{Error, Result};

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zeroize::Zeroizing;

const USER_AGENT: &str = concat!("slsa-provenance/", env!("CARGO_PKG_VERSION"));
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// A response whose body has not been read yet.
pub struct HttpResponse {
    pub status: u16,
    /// Final URL after redirects.
    pub url: String,
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reads the whole body and decodes it as JSON.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        let url = self.url;
        serde_json::from_reader(self.body)
            .map_err(|e| Error::Transport(format!("invalid response from {url}: {e}")))
    }
}

/// Issues GET requests. All GitHub traffic goes through this seam so it can
/// be decorated or replaced in tests.
pub trait HttpTransport {
    fn get(&self, url: &str, accept: &str) -> Result<HttpResponse>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn get(&self, url: &str, accept: &str) -> Result<HttpResponse> {
        (**self).get(url, accept)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str, accept: &str) -> Result<HttpResponse> {
        (**self).get(url, accept)
    }
}

/// Authenticated transport backed by a blocking `reqwest` client.
///
/// The timeout covers each whole request, body included, and is the only
/// deadline applied to release downloads. Failed requests are not retried.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(token: &Zeroizing<String>, timeout: Duration) -> Result<Self> {
        let bearer = Zeroizing::new(format!("Bearer {}", token.as_str()));
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|e| Error::Config(format!("invalid GitHub token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, accept: &str) -> Result<HttpResponse> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .map_err(|e| Error::Transport(format!("GET {url}: {e}")))?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
            url: response.url().to_string(),
            body: Box::new(response),
        })
    }
}

/// Pass-through decorator that mirrors each exchange to an observer: the
/// request line, the response status and every body byte as it is read.
///
/// Observer write failures are ignored; the inner transport's result is
/// returned unchanged.
pub struct TeeTransport<T, W> {
    inner: T,
    observer: Arc<Mutex<W>>,
}

impl<T, W> TeeTransport<T, W>
where
    T: HttpTransport,
    W: Write + Send + 'static,
{
    pub fn new(inner: T, observer: W) -> Self {
        Self {
            inner,
            observer: Arc::new(Mutex::new(observer)),
        }
    }

    fn observe(&self, line: &str) {
        if let Ok(mut out) = self.observer.lock() {
            let _ = writeln!(out, "{line}");
        }
    }
}

impl<T, W> HttpTransport for TeeTransport<T, W>
where
    T: HttpTransport,
    W: Write + Send + 'static,
{
    fn get(&self, url: &str, accept: &str) -> Result<HttpResponse> {
        self.observe(&format!("GET {url}\nAccept: {accept}\n"));

        let response = self.inner.get(url, accept)?;
        self.observe(&format!("HTTP {} {}\n", response.status, response.url));

        Ok(HttpResponse {
            status: response.status,
            url: response.url,
            body: Box::new(TeeReader {
                inner: response.body,
                observer: Arc::clone(&self.observer),
            }),
        })
    }
}

struct TeeReader<W> {
    inner: Box<dyn Read + Send>,
    observer: Arc<Mutex<W>>,
}

impl<W: Write> Read for TeeReader<W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            if let Ok(mut out) = self.observer.lock() {
                let _ = out.write_all(&buf[..n]);
            }
        }
        Ok(n)
    }
}
