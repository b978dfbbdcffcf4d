use super::Submission;
use crate::{
    endpoints::ErrorKind, storage::TokenStorage, Api, Route, SessionStore,
};

/// The navigation bar shown above the ride list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NavBar {
    phone_no: String,
}

/// What happened when the user asked to delete their ride.
///
/// None of these are shown to the user, they only end up in the logs.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The server's confirmation message.
    Deleted(String),
    /// The session has no phone number, so there's nothing to delete by.
    NoPhoneNumber,
    Failed(ErrorKind),
}

impl NavBar {
    pub fn mount<S: TokenStorage>(sessions: &SessionStore<S>) -> Self {
        NavBar {
            phone_no: sessions.identity().phone_no,
        }
    }

    pub fn phone_no(&self) -> &str { &self.phone_no }

    pub fn create_ride(&self) -> Submission {
        Submission::navigate(Route::CreateRide)
    }

    /// Delete the ride posted with the session's phone number.
    ///
    /// Rides are deleted by phone number, so this removes *a* ride posted
    /// with that number, which isn't necessarily one this user posted.
    pub async fn delete_my_ride<A>(&self, api: &A) -> DeleteOutcome
    where
        A: Api + ?Sized,
    {
        if self.phone_no.trim().is_empty() {
            log::error!("Phone number not set");
            return DeleteOutcome::NoPhoneNumber;
        }

        match api.delete_ride(&self.phone_no).await {
            Ok(message) => {
                log::info!("{}", message);
                DeleteOutcome::Deleted(message)
            },
            Err(e) => {
                log::error!("Error deleting ride: {}", e);
                DeleteOutcome::Failed(e.kind())
            },
        }
    }

    /// Forget the session and go back to the login page.
    pub fn logout<S: TokenStorage>(
        &mut self,
        sessions: &mut SessionStore<S>,
    ) -> Submission {
        if let Err(e) = sessions.clear() {
            log::error!("Unable to clear the session: {}", e);
        }
        self.phone_no.clear();

        Submission::navigate(Route::Login)
    }

    pub fn render(&self) -> String {
        String::from("[Create Ride] [Delete My Ride] [Sign out]\n")
    }
}
