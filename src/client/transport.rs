use crate::error::BoxError;

use async_trait::async_trait;

use derivative::Derivative;

use reqwest::{
    header::{HeaderMap, HeaderValue},
    multipart::{Form, Part},
    Method, StatusCode, Url,
};

use std::time::Duration;

/// A request, fully encoded and ready to be sent.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl Request {
    pub(crate) fn new(method: Method, url: Url) -> Self {
        Request {
            method,
            url,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }
}

/// Body of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded` pairs, in order.
    Form(Vec<(String, String)>),
    /// An already serialized JSON document.
    Json(Vec<u8>),
    /// `multipart/form-data` parts, in order.
    Multipart(Vec<FormPart>),
}

/// A single `multipart/form-data` part.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        #[derivative(Debug = "ignore")]
        data: Vec<u8>,
    },
}

impl FormPart {
    /// Name of the form field.
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// What came back from the server.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Response {
    pub status: StatusCode,
    #[derivative(Debug = "ignore")]
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Response {
            status,
            body: body.into(),
        }
    }
}

/// The HTTP layer used by [`Client`](super::Client).
///
/// Implementors only move bytes: they must not interpret the status code. Timeouts and
/// cancellation are their responsibility and should be reported as an `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, BoxError>;
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport without any timeout.
    pub fn new() -> Result<Self, BoxError> {
        Self::build(None)
    }

    /// Create a transport where every request fails after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, BoxError> {
        Self::build(Some(timeout))
    }

    /// Wrap an existing [`reqwest::Client`].
    pub fn from_client(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }

    fn build(timeout: Option<Duration>) -> Result<Self, BoxError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(concat!("imgchest/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(ReqwestTransport {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, BoxError> {
        let builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Json(json) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json),
            RequestBody::Multipart(parts) => {
                let form = parts.into_iter().fold(Form::new(), |form, part| match part {
                    FormPart::Text { name, value } => form.text(name, value),
                    FormPart::File {
                        name,
                        file_name,
                        data,
                    } => form.part(name, Part::bytes(data).file_name(file_name)),
                });
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(Response::new(status, body.to_vec()))
    }
}
