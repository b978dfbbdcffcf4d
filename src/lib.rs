//! A client for the RideShare carpooling API.
//!
//! The pages of the client live in [`views`] as headless components. An
//! [`App`] mounts them behind a [`RouteGuard`], and they talk to the server
//! through the [`Api`] trait.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod api;
mod app;
mod config;
pub mod endpoints;
mod id;
mod ride;
mod routes;
mod session;
pub mod storage;
pub mod time;
mod token;
pub mod views;

pub use api::{Api, HttpApi};
pub use app::{App, Page};
pub use config::{default_storage_dir, Config, ConfigError};
pub use endpoints::{ApiError, ErrorKind};
pub use id::RideId;
pub use ride::{NewRide, Ride, RideKey};
pub use routes::{Access, Route, RouteGuard, UnknownRoute};
pub use session::{Session, SessionStore, TOKEN_KEY};
pub use token::{decode_identity, DecodeError, Identity, Token};

/// The default user agent to use when communicating with the RideShare
/// server.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
