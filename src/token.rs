//! Bearer tokens and the claims we read out of them.

use serde_derive::Deserialize;
use std::fmt::{self, Debug, Formatter};

/// An opaque bearer token issued by the server after authenticating.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new<S: Into<String>>(raw: S) -> Self { Token(raw.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn is_empty(&self) -> bool { self.0.trim().is_empty() }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str { &self.0 }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"<redacted>").finish()
    }
}

/// The user details embedded in a token, used for display and for
/// pre-filling forms.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub name: String,
    pub phone_no: String,
    pub email: String,
}

impl Identity {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.phone_no.is_empty() && self.email.is_empty()
    }
}

/// Read the [`Identity`] claims from a JSON Web Token.
///
/// The signature is *not* checked. The server does that on every request, we
/// only want the payload for display purposes.
pub fn decode_identity(token: &Token) -> Result<Identity, DecodeError> {
    let segments: Vec<&str> = token.as_str().trim().split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::Segments(segments.len()));
    }

    let payload = segments[1].trim_end_matches('=');
    let json = base64::decode_config(payload, base64::URL_SAFE_NO_PAD)?;
    log::trace!("Token payload is {} bytes", json.len());

    serde_json::from_slice(&json).map_err(DecodeError::from)
}

/// The ways a token can fail to decode.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("A token has 3 segments, found {0}")]
    Segments(usize),
    #[error("The token payload isn't valid base64")]
    Base64(#[from] base64::DecodeError),
    #[error("The token payload isn't a JSON object of claims")]
    Claims(#[from] serde_json::Error),
}

#[cfg(test)]
pub(crate) fn encode_unsigned(claims: &serde_json::Value) -> Token {
    let header = base64::encode_config(
        br#"{"alg":"HS256","typ":"JWT"}"#,
        base64::URL_SAFE_NO_PAD,
    );
    let payload =
        base64::encode_config(claims.to_string(), base64::URL_SAFE_NO_PAD);

    Token::new(format!("{}.{}.c2lnbmF0dXJl", header, payload))
}
