//! Pages and who is allowed to see them.

use crate::{storage::TokenStorage, SessionStore};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A page in the client.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    SignUp,
    /// The list of available rides.
    Home,
    CreateRide,
}

impl Route {
    pub const ALL: [Route; 4] =
        [Route::Login, Route::SignUp, Route::Home, Route::CreateRide];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::SignUp => "/signup",
            Route::Home => "/",
            Route::CreateRide => "/createride",
        }
    }

    /// Does this page require a session?
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Home | Route::CreateRide)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Route, UnknownRoute> {
        Route::ALL
            .iter()
            .copied()
            .find(|route| route.path() == s)
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("There is no page at \"{0}\"")]
pub struct UnknownRoute(pub String);

/// The outcome of asking the [`RouteGuard`] for a page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(Route),
}

/// Keeps logged out users away from protected pages.
///
/// Only the presence of a token matters. An expired token still gets you in,
/// the server will reject whatever you try to do with it.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn check<S: TokenStorage>(
        self,
        sessions: &SessionStore<S>,
        route: Route,
    ) -> Access {
        if !route.is_protected() || sessions.is_authorized() {
            Access::Granted
        } else {
            log::debug!("No session, redirecting {} to {}", route, Route::Login);
            Access::Redirect(Route::Login)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{storage::MemoryStorage, Token};

    #[test]
    fn paths_round_trip() {
        for &route in &Route::ALL {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }

        assert!("/admin".parse::<Route>().is_err());
    }

    #[test]
    fn no_token_redirects_to_login() {
        let sessions = SessionStore::new(MemoryStorage::new());

        for &route in &[Route::Home, Route::CreateRide] {
            let got = RouteGuard.check(&sessions, route);
            assert_eq!(got, Access::Redirect(Route::Login));
        }
    }

    #[test]
    fn public_pages_are_always_visible() {
        let sessions = SessionStore::new(MemoryStorage::new());

        assert_eq!(RouteGuard.check(&sessions, Route::Login), Access::Granted);
        assert_eq!(RouteGuard.check(&sessions, Route::SignUp), Access::Granted);
    }

    #[test]
    fn any_token_is_enough() {
        let mut sessions = SessionStore::new(MemoryStorage::new());
        sessions.save(&Token::new("not even a jwt")).unwrap();

        assert_eq!(RouteGuard.check(&sessions, Route::Home), Access::Granted);
        assert_eq!(
            RouteGuard.check(&sessions, Route::CreateRide),
            Access::Granted
        );
    }
}
