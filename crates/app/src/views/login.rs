use chainboard_auth::{Credentials, Session, SessionStore};
use chainboard_client::{ApiError, SupplyChainApi};

use crate::navigator::{Navigation, Navigator};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Login form.
///
/// Submission is split in two so a frontend can hold the form state in a
/// signal across the request: [`begin_submit`](Self::begin_submit) locks the
/// form, [`finish_submit`](Self::finish_submit) applies the response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginView {
    pub credentials: Credentials,
    submitting: bool,
    error: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Lock the form and hand out the credentials to send. `None` while a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(self.credentials.clone())
    }

    /// Apply the login response. On success the session is stored and the
    /// navigation to the role's dashboard is returned.
    pub fn finish_submit<S: SessionStore>(
        &mut self,
        result: Result<Session, ApiError>,
        navigator: &Navigator<S>,
    ) -> Option<Navigation> {
        self.submitting = false;

        let session = match result {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                self.error = Some(match err {
                    ApiError::Status { .. } => INVALID_CREDENTIALS.to_string(),
                    ApiError::Network(message) => message,
                    ApiError::Parse(_) => LOGIN_FAILED.to_string(),
                });
                return None;
            }
        };

        match navigator.login(&session) {
            Ok(navigation) => {
                self.credentials.password.clear();
                Some(navigation)
            }
            Err(err) => {
                tracing::error!(error = %err, "could not store session after login");
                self.error = Some(LOGIN_FAILED.to_string());
                None
            }
        }
    }

    pub async fn submit<A, S>(&mut self, api: &A, navigator: &Navigator<S>) -> Option<Navigation>
    where
        A: SupplyChainApi,
        S: SessionStore,
    {
        let credentials = self.begin_submit()?;
        let result = api.login(&credentials).await;
        self.finish_submit(result, navigator)
    }
}
