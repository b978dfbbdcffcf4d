use super::{ApiError, ErrorKind, Rejection};
use crate::Token;
use reqwest::Client;
use serde_derive::{Deserialize, Serialize};
use url::Url;

/// What you need to log in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Authenticate with the server and get a new [`Token`].
///
/// A non-2xx response is an [`ErrorKind::Auth`] error.
pub async fn login(
    client: &Client,
    base: &Url,
    credentials: &LoginCredentials,
) -> Result<Token, ApiError> {
    let url = super::endpoint(base, &["login"]);

    log::debug!("Sending a login request to {} for {}", url, credentials.email);
    let response = super::send(
        client.post(url).json(credentials),
        Rejection::Always(ErrorKind::Auth),
    )
    .await?;

    let body: TokenResponse = response.json().await?;
    log::info!("Logged in as {}", credentials.email);

    Ok(Token::new(body.token))
}

/// The body returned by `/login` and `/signup`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) token: String,
}
