// LogTriage - platform/http.rs
//
// Network abstraction. Workflows talk to the analyzer only through the
// `Transport` trait so tests can substitute an in-memory fake.
//
// The production implementation uses a blocking reqwest client. A request
// runs to completion or failure; there is no cancellation path and no
// overall deadline.

use crate::util::constants;
use crate::util::error::TransportError;
use reqwest::blocking::{multipart, Client};
use std::time::Duration;

/// A fully materialised HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,

    /// Raw Content-Disposition header value, if the server sent one.
    pub content_disposition: Option<String>,

    /// Body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as text; invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Request issuer used by the workflows and the health monitor.
///
/// `endpoint` is a path such as `/api/analyze`; the implementation decides
/// which server it is resolved against.
pub trait Transport {
    /// POST `content` as a single-file multipart upload.
    fn post_file(
        &self,
        endpoint: &str,
        file_name: &str,
        content: &[u8],
    ) -> Result<HttpResponse, TransportError>;

    /// Plain GET.
    fn get(&self, endpoint: &str) -> Result<HttpResponse, TransportError>;
}

/// `Transport` over a real HTTP connection. Clones share one connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the analyzer at `base_url`.
    ///
    /// `connect_timeout` bounds connection setup only. Requests themselves
    /// have no deadline: analysis of a large file may take many minutes.
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(None::<Duration>)
            .user_agent(format!(
                "{}/{}",
                constants::APP_NAME,
                constants::APP_VERSION
            ))
            .build()
            .map_err(|e| TransportError::Client { source: e })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl Transport for HttpTransport {
    fn post_file(
        &self,
        endpoint: &str,
        file_name: &str,
        content: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, file = file_name, bytes = content.len(), "POST multipart");

        let part = multipart::Part::bytes(content.to_vec()).file_name(file_name.to_string());
        let form = multipart::Form::new().part(constants::UPLOAD_FIELD_NAME, part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| request_error(&url, e))?;

        materialise(&url, response)
    }

    fn get(&self, endpoint: &str) -> Result<HttpResponse, TransportError> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| request_error(&url, e))?;

        materialise(&url, response)
    }
}

fn request_error(url: &str, e: reqwest::Error) -> TransportError {
    TransportError::Request {
        url: url.to_string(),
        source: Box::new(e),
    }
}

/// Read status, Content-Disposition and the whole body.
fn materialise(
    url: &str,
    response: reqwest::blocking::Response,
) -> Result<HttpResponse, TransportError> {
    let status = response.status().as_u16();

    // Servers often put raw UTF-8 in the filename; decode lossily instead
    // of dropping the header.
    let content_disposition = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    let body = response
        .bytes()
        .map_err(|e| request_error(url, e))?
        .to_vec();

    tracing::debug!(url, status, bytes = body.len(), "Response received");

    Ok(HttpResponse {
        status,
        content_disposition,
        body,
    })
}
