use super::{Submission, Toast};
use crate::{
    storage::TokenStorage,
    time::{DepartureTime, TimeError},
    Api, NewRide, Route, SessionStore,
};
use chrono::{FixedOffset, Local, NaiveDate};

pub(crate) const RIDE_POSTED: &str = "Ride posted successfully!";
pub(crate) const RIDE_FAILED: &str = "Failed to post ride. Please try again.";

/// The "Post a Ride" page.
///
/// The host's name, phone number and email come from the session when the
/// form is mounted. They aren't editable.
#[derive(Debug, Clone, PartialEq)]
pub struct RideCreationForm {
    pub destination: String,
    pub pickup: String,
    /// A bare `HH:MM`, between 09:00 and 18:00.
    pub time: String,
    host: String,
    phone_no: String,
    email: String,
}

impl RideCreationForm {
    pub fn mount<S: TokenStorage>(sessions: &SessionStore<S>) -> Self {
        let identity = sessions.identity();

        RideCreationForm {
            destination: String::new(),
            pickup: String::new(),
            time: DepartureTime::default().to_string(),
            host: identity.name,
            phone_no: identity.phone_no,
            email: identity.email,
        }
    }

    pub fn host(&self) -> &str { &self.host }

    pub fn phone_no(&self) -> &str { &self.phone_no }

    pub fn email(&self) -> &str { &self.email }

    /// Build the ride to post, departing today in the local timezone.
    pub fn prepare(&self) -> Result<NewRide, FormError> {
        let now = Local::now();
        self.prepare_on(now.date_naive(), *now.offset())
    }

    /// Build the ride to post, departing on `date` at `offset`.
    pub fn prepare_on(
        &self,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<NewRide, FormError> {
        let destination = required("Destination", &self.destination)?;
        let pickup = required("Pickup Location", &self.pickup)?;
        let time = DepartureTime::parse(&self.time)?;

        Ok(NewRide {
            host: self.host.clone(),
            destination,
            pickup,
            time: time.on(date, offset),
            phone_no: self.phone_no.clone(),
            email: self.email.clone(),
        })
    }

    /// Post the ride and head home, or stay here with an error toast.
    pub async fn submit<A>(&mut self, api: &A) -> Submission
    where
        A: Api + ?Sized,
    {
        let ride = match self.prepare() {
            Ok(ride) => ride,
            Err(e) => {
                log::warn!("Not posting the ride: {}", e);
                return Submission::stay().with_toast(Toast::error(e.to_string()));
            },
        };

        match api.create_ride(&ride).await {
            Ok(_) => Submission::navigate(Route::Home)
                .with_toast(Toast::success(RIDE_POSTED)),
            Err(e) => {
                log::error!("Ride post failed: {}", e);
                Submission::stay().with_toast(Toast::error(RIDE_FAILED))
            },
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Post a Ride\n\n");
        super::field(&mut out, "Host", &self.host, false);
        super::field(&mut out, "Destination", &self.destination, false);
        super::field(&mut out, "Pickup Location", &self.pickup, false);
        super::field(&mut out, "Time", &self.time, false);
        out.push_str("\n[Post Ride]\n");

        out
    }
}

fn required(label: &'static str, value: &str) -> Result<String, FormError> {
    match value.trim() {
        "" => Err(FormError::Missing(label)),
        value => Ok(value.to_string()),
    }
}

/// Problems with the ride creation form which are caught before anything is
/// sent to the server.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error(transparent)]
    Time(#[from] TimeError),
}
