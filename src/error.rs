use crate::scrape::{ScrapedPostError, ScrapedUserError};

use reqwest::StatusCode;

use thiserror::Error;

/// Boxed error type returned by [`Transport`] implementations.
///
/// [`Transport`]: crate::client::Transport
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for `imgchest`, using [`Error`].
pub type Result<T> = ::std::result::Result<T, Error>;

/// Enum for `imgchest` errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never got a response: connection refused, TLS failure, timeout, cancellation.
    /// The cause is whatever the [`Transport`](crate::client::Transport) reported.
    #[error("network error: {0}")]
    Network(#[source] BoxError),

    /// The service answered with an error. `status` is the HTTP status code, `message` is the
    /// reason given by the API, if available.
    #[error("API error {status}: {}", api_reason(*status, message.as_deref()))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// A JSON payload didn't have the expected shape.
    #[error("couldn't deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// A post page couldn't be scraped.
    #[error("invalid scraped post: {0}")]
    InvalidScrapedPost(#[from] ScrapedPostError),

    /// A user profile page couldn't be scraped.
    #[error("invalid scraped user: {0}")]
    InvalidScrapedUser(#[from] ScrapedUserError),

    /// The request was rejected before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequestError),

    /// The endpoint requires a token but the client doesn't have one.
    #[error("this endpoint requires a token")]
    MissingToken,

    /// The API reported success, but with a payload this crate doesn't understand.
    #[error("unexpected response from the API: {0}")]
    UnexpectedResponse(String),

    /// The blocking task parsing an HTML page didn't complete.
    #[error("failed to join the HTML parsing task")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl Error {
    /// The HTTP status code of an [`Error::Api`], if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Reasons a request is refused by the client before it reaches the network.
#[derive(Debug, Error)]
pub enum InvalidRequestError {
    /// A post must be created with at least one file.
    #[error("a post needs at least one file")]
    MissingFiles,

    /// Titles must be at least 3 characters long.
    #[error("title is {len} characters long, the minimum is 3")]
    TitleTooShort { len: usize },

    /// A post, file or user identifier was empty.
    #[error("identifier must not be empty")]
    EmptyId,

    /// File descriptions can't be cleared through the API.
    #[error("file description must not be empty")]
    EmptyDescription,

    /// An update request that doesn't change anything.
    #[error("the update doesn't change anything")]
    EmptyUpdate,

    /// The token contains characters that can't be sent in an HTTP header.
    #[error("token is not a valid header value")]
    InvalidToken,

    /// A base URL given to the client couldn't be parsed.
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn api_reason(status: u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => match status {
            401 => String::from("Unauthorized: the token is missing or invalid"),
            403 => String::from("Forbidden: the token doesn't grant access to this resource"),
            404 => String::from("Not Found"),
            422 => String::from("Unprocessable Entity: the given parameters were invalid"),
            429 => String::from("Too Many Requests: the rate limit was exceeded"),
            _ => StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or("Unknown Error")
                .to_string(),
        },
    }
}
