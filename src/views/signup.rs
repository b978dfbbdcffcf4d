use super::{Submission, Toast};
use crate::{
    endpoints::SignUpCredentials, storage::TokenStorage, Api, Route,
    SessionStore,
};

/// The "Sign Up" page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub phone_no: String,
    pub password: String,
}

impl SignUpForm {
    pub fn new() -> Self { SignUpForm::default() }

    /// Register, saving the token and heading home on success.
    ///
    /// A rejected sign up is only logged, the user isn't told why nothing
    /// happened.
    pub async fn submit<A, S>(
        &mut self,
        api: &A,
        sessions: &mut SessionStore<S>,
    ) -> Submission
    where
        A: Api + ?Sized,
        S: TokenStorage,
    {
        let required = [&self.name, &self.email, &self.phone_no, &self.password];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Submission::stay()
                .with_toast(Toast::error("Please fill in every field."));
        }

        let credentials = SignUpCredentials {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_no: self.phone_no.trim().to_string(),
            password: self.password.clone(),
        };

        match api.signup(&credentials).await {
            Ok(token) => match sessions.save(&token) {
                Ok(()) => Submission::navigate(Route::Home),
                Err(e) => {
                    log::error!("Unable to save the session: {}", e);
                    Submission::stay()
                },
            },
            Err(e) => {
                log::error!("Sign Up failed: {}", e);
                Submission::stay()
            },
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Sign Up\n\n");
        super::field(&mut out, "Name", &self.name, false);
        super::field(&mut out, "Email address", &self.email, false);
        super::field(&mut out, "Phone Number", &self.phone_no, false);
        super::field(&mut out, "Password", &self.password, true);
        out.push_str("\n[Sign Up]\n");

        out
    }
}
