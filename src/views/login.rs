use super::{Submission, Toast};
use crate::{
    endpoints::LoginCredentials, storage::TokenStorage, Api, Route,
    SessionStore,
};

pub(crate) const LOGIN_SUCCEEDED: &str = "Login successful!";
pub(crate) const LOGIN_FAILED: &str =
    "Login failed. Please check your credentials.";

/// The "Sign in to your account" page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new() -> Self { LoginForm::default() }

    /// The secondary "Sign Up" button.
    pub fn sign_up(&self) -> Submission { Submission::navigate(Route::SignUp) }

    /// Try to log in, saving the token and heading home on success.
    ///
    /// On failure the form keeps whatever was typed so the user can try
    /// again.
    pub async fn submit<A, S>(
        &mut self,
        api: &A,
        sessions: &mut SessionStore<S>,
    ) -> Submission
    where
        A: Api + ?Sized,
        S: TokenStorage,
    {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Submission::stay()
                .with_toast(Toast::error("Please enter your email and password."));
        }

        let credentials = LoginCredentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        let token = match api.login(&credentials).await {
            Ok(token) => token,
            Err(e) => {
                log::error!("Login failed: {}", e);
                return Submission::stay().with_toast(Toast::error(LOGIN_FAILED));
            },
        };

        if let Err(e) = sessions.save(&token) {
            log::error!("Unable to save the session: {}", e);
            return Submission::stay().with_toast(Toast::error(LOGIN_FAILED));
        }

        Submission::navigate(Route::Home).with_toast(Toast::success(LOGIN_SUCCEEDED))
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Sign in to your account\n\n");
        super::field(&mut out, "Email address", &self.email, false);
        super::field(&mut out, "Password", &self.password, true);
        out.push_str("\n[Sign in] [Sign Up]\n");

        out
    }
}
