use chainboard_auth::{FieldErrors, Registration, SessionStore};
use chainboard_client::{ApiError, SupplyChainApi};
use chainboard_core::Route;

use crate::navigator::{Navigation, Navigator};

pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// Registration form. Validates locally before any request; a successful
/// registration goes back to the login page without storing a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterView {
    pub registration: Registration,
    field_errors: FieldErrors,
    error: Option<String>,
    submitting: bool,
}

impl RegisterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and lock the form. `None` when a field is invalid (the
    /// per-field messages are set) or a submission is in flight.
    pub fn begin_submit(&mut self) -> Option<Registration> {
        if self.submitting {
            return None;
        }
        self.error = None;
        if let Err(errors) = self.registration.validate() {
            self.field_errors = errors;
            return None;
        }
        self.field_errors = FieldErrors::default();
        self.submitting = true;
        Some(self.registration.clone())
    }

    pub fn finish_submit<S: SessionStore>(
        &mut self,
        result: Result<(), ApiError>,
        navigator: &Navigator<S>,
    ) -> Option<Navigation> {
        self.submitting = false;

        if let Err(err) = result {
            tracing::warn!(error = %err, "registration failed");
            self.error = Some(err.user_message(REGISTRATION_FAILED));
            return None;
        }

        tracing::info!(role = ?self.registration.role, "registered");
        match navigator.navigate(Route::ENTRY.path()) {
            Ok(navigation) => {
                *self = Self::default();
                Some(navigation)
            }
            Err(err) => {
                tracing::error!(error = %err, "navigation after registration failed");
                None
            }
        }
    }

    pub async fn submit<A, S>(&mut self, api: &A, navigator: &Navigator<S>) -> Option<Navigation>
    where
        A: SupplyChainApi,
        S: SessionStore,
    {
        let registration = self.begin_submit()?;
        let result = api.register(&registration).await;
        self.finish_submit(result, navigator)
    }
}
