mod rate_limit;
mod transport;

#[cfg(test)]
pub(crate) use self::transport::scripted::ScriptedTransport;
pub use self::transport::{FormPart, ReqwestTransport, Request, RequestBody, Response, Transport};

use self::rate_limit::RateLimit;
use super::error::{Error, InvalidRequestError, Result};

use derivative::Derivative;

use once_cell::sync::Lazy;

use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Method, Url,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use serde_with::{serde_as, DisplayFromStr, PickFirst};

use std::sync::Arc;

static API_URL: Lazy<Url> = Lazy::new(|| Url::parse("https://api.imgchest.com").unwrap());
static WEB_URL: Lazy<Url> = Lazy::new(|| Url::parse("https://imgchest.com").unwrap());

/// The `{ "data": ... }` envelope around every API payload.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub data: T,
}

/// Payload of endpoints that only report whether they did something.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct ApiCompletedResponse {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Client struct.
///
/// Cloning a client is cheap: clones share the same transport and request budget. The
/// configuration can't change after construction; build a new client to use another token.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct Client<T = ReqwestTransport> {
    #[derivative(Debug = "ignore")]
    transport: Arc<T>,
    api_url: Url,
    web_url: Url,
    #[derivative(Debug = "ignore")]
    token: Option<Arc<str>>,
    rate_limit: RateLimit,
}

impl Client<ReqwestTransport> {
    /// Create a new client talking to `imgchest.com` through [`ReqwestTransport`].
    ///
    /// ```no_run
    /// # use imgchest::client::Client;
    /// # fn main() -> imgchest::error::Result<()> {
    /// let client = Client::new()?.with_token("my-api-token");
    /// # Ok(()) }
    /// ```
    pub fn new() -> Result<Self> {
        let transport = ReqwestTransport::new().map_err(Error::Network)?;
        Ok(Self::with_transport(transport))
    }
}

impl<T: Transport> Client<T> {
    /// Create a new client sending its requests through `transport`.
    pub fn with_transport(transport: T) -> Self {
        Client {
            transport: Arc::new(transport),
            api_url: API_URL.clone(),
            web_url: WEB_URL.clone(),
            token: None,
            rate_limit: RateLimit::default(),
        }
    }

    /// Use `token` to authenticate API requests.
    pub fn with_token(mut self, token: impl AsRef<str>) -> Self {
        self.token = Some(token.as_ref().into());
        self
    }

    /// Send API requests to `url` instead of `https://api.imgchest.com`.
    pub fn with_api_url(mut self, url: &str) -> Result<Self> {
        self.api_url = parse_base_url(url)?;
        Ok(self)
    }

    /// Fetch pages from `url` instead of `https://imgchest.com`.
    pub fn with_web_url(mut self, url: &str) -> Result<Self> {
        self.web_url = parse_base_url(url)?;
        Ok(self)
    }

    /// Whether requests requiring authorization can be made.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn api_endpoint(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.api_url, segments)
    }

    pub(crate) fn web_endpoint(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.web_url, segments)
    }

    /// Start a request carrying the bearer token.
    pub(crate) fn authorized(&self, method: Method, url: Url) -> Result<Request> {
        let token = self.token.as_deref().ok_or(Error::MissingToken)?;
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| InvalidRequestError::InvalidToken)?;
        value.set_sensitive(true);

        let mut request = Request::new(method, url);
        request.headers.insert(AUTHORIZATION, value);
        Ok(request)
    }

    /// Send an API request and unwrap the `data` envelope of the response.
    pub(crate) async fn api_json<D: DeserializeOwned>(&self, request: Request) -> Result<D> {
        let response = self.execute(request, true).await?;
        let body: ApiResponse<D> = serde_json::from_slice(&response.body)?;
        Ok(body.data)
    }

    /// Send an API request answered with a completion payload, returning its message.
    pub(crate) async fn api_completed(&self, request: Request) -> Result<Option<String>> {
        let response = self.execute(request, true).await?;
        let body: ApiCompletedResponse = serde_json::from_slice(&response.body)?;

        if !body.success {
            return Err(Error::Api {
                status: response.status.as_u16(),
                message: body.message,
            });
        }

        Ok(body.message)
    }

    /// Send an unauthenticated request to the website and decode its JSON response.
    pub(crate) async fn web_json<D: DeserializeOwned>(&self, url: Url) -> Result<D> {
        let response = self.execute(Request::new(Method::GET, url), false).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Fetch a page from the website as text.
    pub(crate) async fn web_page(&self, url: Url) -> Result<String> {
        let response = self.execute(Request::new(Method::GET, url), false).await?;
        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }

    async fn execute(&self, request: Request, rate_limited: bool) -> Result<Response> {
        log::debug!("{} {}", request.method, request.url);

        let send = self.transport.send(request);
        let response = if rate_limited {
            self.rate_limit.check(send).await
        } else {
            send.await
        }
        .map_err(Error::Network)?;

        log::trace!("HTTP {} ({} bytes)", response.status, response.body.len());

        if !response.status.is_success() {
            let body: ApiErrorResponse =
                serde_json::from_slice(&response.body).unwrap_or_default();

            return Err(Error::Api {
                status: response.status.as_u16(),
                message: body.error.or(body.message),
            });
        }

        Ok(response)
    }
}

fn parse_base_url(url: &str) -> Result<Url> {
    let url = Url::parse(url).map_err(InvalidRequestError::InvalidUrl)?;
    if url.cannot_be_a_base() {
        return Err(InvalidRequestError::InvalidUrl(
            url::ParseError::RelativeUrlWithCannotBeABaseBase,
        )
        .into());
    }

    Ok(url)
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    if segments.iter().any(|s| s.is_empty()) {
        return Err(InvalidRequestError::EmptyId.into());
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| {
            InvalidRequestError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
