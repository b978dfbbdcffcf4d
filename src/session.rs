use crate::{
    storage::{StorageError, TokenStorage},
    token::{self, Identity, Token},
};

/// The key the token is persisted under.
pub const TOKEN_KEY: &str = "rideshare.token";

/// The currently authenticated user.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Session {
    pub token: Token,
    /// Display details decoded from the token. Every field is empty when the
    /// token couldn't be decoded.
    pub identity: Identity,
}

impl Session {
    pub fn from_token(token: Token) -> Self {
        let identity = match token::decode_identity(&token) {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("Error decoding token: {}", e);
                Identity::default()
            },
        };

        Session { token, identity }
    }
}

/// Owns the persisted token.
///
/// Login, sign up and logout are the only things which should write to it.
/// Everything else reads the [`Session`] once, when it is mounted.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: TokenStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self { SessionStore { storage } }

    pub fn storage(&self) -> &S { &self.storage }

    pub fn save(&mut self, token: &Token) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token.as_str())
    }

    /// Load the current session, if there is one.
    ///
    /// This never fails. Unreadable storage is treated as being logged out
    /// and a malformed token gives a [`Session`] with an empty identity.
    pub fn load(&self) -> Option<Session> {
        self.token().map(Session::from_token)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)
    }

    /// Is there a non-empty token? Expiry isn't checked.
    pub fn is_authorized(&self) -> bool { self.token().is_some() }

    /// The identity to pre-fill forms with, empty when logged out.
    pub fn identity(&self) -> Identity {
        self.load().map(|s| s.identity).unwrap_or_default()
    }

    fn token(&self) -> Option<Token> {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(raw)) => Some(Token::new(raw)).filter(|t| !t.is_empty()),
            Ok(None) => None,
            Err(e) => {
                log::error!("Unable to read the stored token: {}", e);
                None
            },
        }
    }
}
