use super::{login::TokenResponse, ApiError, ErrorKind, Rejection};
use crate::Token;
use reqwest::Client;
use serde_derive::Serialize;
use url::Url;

/// The details needed to create an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignUpCredentials {
    pub name: String,
    pub email: String,
    pub phone_no: String,
    pub password: String,
}

/// Register a new account, getting back a [`Token`] for it.
///
/// The server refuses duplicate email addresses, which (like any other
/// non-2xx response) comes back as an [`ErrorKind::Auth`] error.
pub async fn signup(
    client: &Client,
    base: &Url,
    credentials: &SignUpCredentials,
) -> Result<Token, ApiError> {
    let url = super::endpoint(base, &["signup"]);

    log::debug!("Sending a sign up request to {} for {}", url, credentials.email);
    let response = super::send(
        client.post(url).json(credentials),
        Rejection::Always(ErrorKind::Auth),
    )
    .await?;

    let body: TokenResponse = response.json().await?;
    log::info!("Signed up as {}", credentials.email);

    Ok(Token::new(body.token))
}
