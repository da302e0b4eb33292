use crate::cycle::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::errors::FetchError;
use std::future::Future;
use tracing::{debug, warn};

pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpReply, FetchError>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpReply, FetchError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|source| FetchError::Request {
            url: request.url.clone(),
            source,
        })?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: request.url.clone(),
            source,
        })?;

        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonFetcher<T> {
    transport: T,
}

impl<T: Transport> JsonFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issues one request. Every fault becomes a synthetic connection failure.
    pub async fn send(
        &self,
        url: &str,
        method: Method,
        body: Option<&RequestEnvelope>,
        csrf_token: &str,
    ) -> ResponseEnvelope {
        match self.try_send(url, method, body, csrf_token).await {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(method = method.as_str(), "{err}");
                ResponseEnvelope::connection_failure()
            }
        }
    }

    async fn try_send(
        &self,
        url: &str,
        method: Method,
        body: Option<&RequestEnvelope>,
        csrf_token: &str,
    ) -> Result<ResponseEnvelope, FetchError> {
        let mut headers = Vec::new();
        let body = match body {
            Some(envelope) => {
                headers.push(("Content-Type", "application/json".to_string()));
                Some(envelope.to_json()?)
            }
            None => None,
        };
        if method.is_mutating() {
            headers.push((CSRF_HEADER, csrf_token.to_string()));
        }

        debug!(method = method.as_str(), url, "sending request");
        let reply = self
            .transport
            .execute(HttpRequest {
                method,
                url: url.to_string(),
                headers,
                body,
            })
            .await?;

        if !(200..300).contains(&reply.status) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: reply.status,
            });
        }

        let value: serde_json::Value =
            serde_json::from_slice(&reply.body).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;
        ResponseEnvelope::from_value(value).ok_or_else(|| FetchError::Envelope {
            url: url.to_string(),
        })
    }
}
