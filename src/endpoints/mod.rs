//! The RideShare API's endpoints.

mod login;
mod rides;
mod signup;

pub use login::{login, LoginCredentials};
pub use rides::{create_ride, delete_ride, list_rides};
pub use signup::{signup, SignUpCredentials};

use reqwest::{RequestBuilder, Response, StatusCode};
use serde_derive::Deserialize;
use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};
use url::Url;

/// The broad category an [`ApiError`] falls into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad credentials, or signing up with an email which is already taken.
    Auth,
    /// The request never made it, or the server fell over.
    Network,
    /// The server didn't like the ride we sent it.
    Validation,
    /// There was nothing to act on.
    NotFound,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Auth => "authentication",
            ErrorKind::Network => "network",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not found",
        };

        f.write_str(name)
    }
}

/// Errors returned by every endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server responded, but rejected the request.
    #[error("The server rejected the request with {status} ({kind}): {detail}")]
    Rejected {
        kind: ErrorKind,
        status: StatusCode,
        detail: String,
    },
    /// Unable to send the request or read the response.
    #[error("Unable to talk to the server")]
    Network(#[source] Box<dyn StdError + Send + Sync + 'static>),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Rejected { kind, .. } => *kind,
            ApiError::Network(_) => ErrorKind::Network,
        }
    }

    pub(crate) fn rejected<D: Into<String>>(
        kind: ErrorKind,
        status: StatusCode,
        detail: D,
    ) -> Self {
        ApiError::Rejected {
            kind,
            status,
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> ApiError { ApiError::Network(Box::new(e)) }
}

/// Append path segments to the API's base URL.
///
/// Each segment is percent-encoded, so user input (e.g. a phone number) can't
/// change which endpoint we hit.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();

    match url.path_segments_mut() {
        Ok(mut path) => {
            path.pop_if_empty().extend(segments);
        },
        Err(()) => {
            log::warn!("{} can't be used as a base URL", base);
        },
    }

    url
}

/// How an endpoint wants its non-2xx responses categorised.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Rejection {
    /// Every non-2xx response is this kind of error.
    Always(ErrorKind),
    /// Server errors (5xx) are [`ErrorKind::Network`], anything else is this
    /// kind of error.
    Client(ErrorKind),
}

/// Decide which [`ErrorKind`] a non-2xx response falls into.
pub(crate) fn classify(
    status: StatusCode,
    rejection: Rejection,
) -> ErrorKind {
    match rejection {
        Rejection::Always(kind) => kind,
        Rejection::Client(_) if status.is_server_error() => ErrorKind::Network,
        Rejection::Client(kind) => kind,
    }
}

/// Send a request, turning any non-2xx response into an [`ApiError`].
async fn send(
    request: RequestBuilder,
    rejection: Rejection,
) -> Result<Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();

    log::debug!("{} responded with {}", response.url(), status);
    log::trace!("Headers: {:#?}", response.headers());

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log::trace!("Response: {}", body);

    let kind = classify(status, rejection);
    Err(ApiError::rejected(kind, status, error_detail(status, &body)))
}

/// Pull a human-readable message out of an error response.
fn error_detail(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    if let Ok(ErrorBody { detail }) = serde_json::from_str(body) {
        return match detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
    }

    match body.trim() {
        "" => status
            .canonical_reason()
            .unwrap_or("no details given")
            .to_string(),
        text => text.to_string(),
    }
}
