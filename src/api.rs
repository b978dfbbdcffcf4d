use crate::{
    endpoints::{self, ApiError, LoginCredentials, SignUpCredentials},
    NewRide, Ride, Token,
};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Everything the client needs from the RideShare server.
///
/// Each call sends exactly one request. Nothing is retried.
#[async_trait]
pub trait Api {
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Token, ApiError>;

    async fn signup(
        &self,
        credentials: &SignUpCredentials,
    ) -> Result<Token, ApiError>;

    async fn list_rides(&self) -> Result<Vec<Ride>, ApiError>;

    async fn create_ride(&self, ride: &NewRide) -> Result<Ride, ApiError>;

    async fn delete_ride(&self, phone_no: &str) -> Result<String, ApiError>;
}

/// An [`Api`] which talks to a real server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(client: Client, base: Url) -> Self { HttpApi { client, base } }

    /// Create a client with sensible defaults.
    pub fn with_default_client(base: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(crate::DEFAULT_USER_AGENT)
            .build()?;

        Ok(HttpApi::new(client, base))
    }

    pub fn base_url(&self) -> &Url { &self.base }
}

#[async_trait]
impl Api for HttpApi {
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Token, ApiError> {
        endpoints::login(&self.client, &self.base, credentials).await
    }

    async fn signup(
        &self,
        credentials: &SignUpCredentials,
    ) -> Result<Token, ApiError> {
        endpoints::signup(&self.client, &self.base, credentials).await
    }

    async fn list_rides(&self) -> Result<Vec<Ride>, ApiError> {
        endpoints::list_rides(&self.client, &self.base).await
    }

    async fn create_ride(&self, ride: &NewRide) -> Result<Ride, ApiError> {
        endpoints::create_ride(&self.client, &self.base, ride).await
    }

    async fn delete_ride(&self, phone_no: &str) -> Result<String, ApiError> {
        endpoints::delete_ride(&self.client, &self.base, phone_no).await
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::endpoints::ErrorKind;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    type Reply<T> = Box<dyn Fn() -> Result<T, ApiError> + Send + Sync>;

    /// A request the [`MockApi`] received.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Login(LoginCredentials),
        SignUp(SignUpCredentials),
        ListRides,
        CreateRide(NewRide),
        DeleteRide(String),
    }

    /// A scripted [`Api`]. Endpoints without a reply fail with a network
    /// error.
    #[derive(Default)]
    pub(crate) struct MockApi {
        login: Option<Reply<Token>>,
        signup: Option<Reply<Token>>,
        list_rides: Option<Reply<Vec<Ride>>>,
        create_ride: Option<Reply<Ride>>,
        delete_ride: Option<Reply<String>>,
        calls: Mutex<Vec<Call>>,
    }

    impl MockApi {
        pub(crate) fn new() -> Self { MockApi::default() }

        pub(crate) fn on_login<F>(mut self, reply: F) -> Self
        where
            F: Fn() -> Result<Token, ApiError> + Send + Sync + 'static,
        {
            self.login = Some(Box::new(reply));
            self
        }

        pub(crate) fn on_signup<F>(mut self, reply: F) -> Self
        where
            F: Fn() -> Result<Token, ApiError> + Send + Sync + 'static,
        {
            self.signup = Some(Box::new(reply));
            self
        }

        pub(crate) fn on_list_rides<F>(mut self, reply: F) -> Self
        where
            F: Fn() -> Result<Vec<Ride>, ApiError> + Send + Sync + 'static,
        {
            self.list_rides = Some(Box::new(reply));
            self
        }

        pub(crate) fn on_create_ride<F>(mut self, reply: F) -> Self
        where
            F: Fn() -> Result<Ride, ApiError> + Send + Sync + 'static,
        {
            self.create_ride = Some(Box::new(reply));
            self
        }

        pub(crate) fn on_delete_ride<F>(mut self, reply: F) -> Self
        where
            F: Fn() -> Result<String, ApiError> + Send + Sync + 'static,
        {
            self.delete_ride = Some(Box::new(reply));
            self
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) { self.calls.lock().unwrap().push(call); }

        fn reply<T>(reply: &Option<Reply<T>>) -> Result<T, ApiError> {
            match reply {
                Some(reply) => reply(),
                None => Err(network_error()),
            }
        }
    }

    pub(crate) fn network_error() -> ApiError {
        ApiError::Network(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }

    pub(crate) fn rejected(kind: ErrorKind, detail: &str) -> ApiError {
        ApiError::rejected(kind, StatusCode::BAD_REQUEST, detail)
    }

    #[async_trait]
    impl Api for MockApi {
        async fn login(
            &self,
            credentials: &LoginCredentials,
        ) -> Result<Token, ApiError> {
            self.record(Call::Login(credentials.clone()));
            MockApi::reply(&self.login)
        }

        async fn signup(
            &self,
            credentials: &SignUpCredentials,
        ) -> Result<Token, ApiError> {
            self.record(Call::SignUp(credentials.clone()));
            MockApi::reply(&self.signup)
        }

        async fn list_rides(&self) -> Result<Vec<Ride>, ApiError> {
            self.record(Call::ListRides);
            MockApi::reply(&self.list_rides)
        }

        async fn create_ride(&self, ride: &NewRide) -> Result<Ride, ApiError> {
            self.record(Call::CreateRide(ride.clone()));
            MockApi::reply(&self.create_ride)
        }

        async fn delete_ride(
            &self,
            phone_no: &str,
        ) -> Result<String, ApiError> {
            self.record(Call::DeleteRide(phone_no.to_string()));
            MockApi::reply(&self.delete_ride)
        }
    }
}
