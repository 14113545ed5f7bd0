//! Login and registration payloads, with the registration form's
//! client-side checks.

use serde::{Deserialize, Serialize};

use chainboard_core::Role;

/// Counted in UTF-16 code units, the way the browser measures input.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            role: Some(Role::Supplier),
        }
    }
}

/// Per-field validation messages. Empty means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.role.is_none()
    }
}

impl Registration {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: Some(role),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.email.is_empty() {
            errors.email = Some("Email is required.".to_string());
        } else if !looks_like_email(&self.email) {
            errors.email = Some("Email is invalid.".to_string());
        }

        if self.password.is_empty() {
            errors.password = Some("Password is required.".to_string());
        } else if self.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            errors.password = Some(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            ));
        }

        match &self.role {
            Some(role) if !role.as_str().is_empty() => {}
            _ => errors.role = Some("User type is required.".to_string()),
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Some whitespace-free run contains `x@y.z`, each part non-empty. The rest
/// of the value is not checked.
fn looks_like_email(value: &str) -> bool {
    value.split_whitespace().any(|run| {
        let Some(at) = run.char_indices().skip(1).find(|&(_, c)| c == '@').map(|(i, _)| i) else {
            return false;
        };
        let domain = &run[at + 1..];
        domain
            .char_indices()
            .skip(1)
            .any(|(i, c)| c == '.' && i + 1 < domain.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn valid_registration_passes() {
        let form = Registration::new("ana@example.com", "secret1", Role::Buyer);
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn reports_every_failing_field() {
        let form = Registration {
            email: String::new(),
            password: String::new(),
            role: None,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.email.as_deref(), Some("Email is required."));
        assert_eq!(errors.password.as_deref(), Some("Password is required."));
        assert_eq!(errors.role.as_deref(), Some("User type is required."));
    }

    #[test]
    fn rejects_malformed_email_and_short_password() {
        let form = Registration::new("ana@example", "12345", Role::Supplier);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.email.as_deref(), Some("Email is invalid."));
        assert_eq!(
            errors.password.as_deref(),
            Some("Password must be at least 6 characters.")
        );
        assert_eq!(errors.role, None);
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("first.last@mail.example.org"));
        assert!(!looks_like_email("a@.c"));
        assert!(!looks_like_email("@b.c"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("ana@example"));
        assert!(!looks_like_email("plain"));
    }

    #[test]
    fn email_match_may_sit_anywhere_in_the_value() {
        for email in ["a@b.c.", "a b@c.d", "@a@b.c", "a@b.c d", "é@ü.ñ"] {
            let form = Registration::new(email, "secret1", Role::Buyer);
            assert_eq!(form.validate(), Ok(()), "{email}");
        }
        assert!(!looks_like_email("a @b.c"));
        assert!(!looks_like_email("a@b .c"));
    }

    #[test]
    fn password_length_counts_utf16_units() {
        let emoji = Registration::new("a@b.c", "\u{1F600}\u{1F600}\u{1F600}", Role::Buyer);
        assert_eq!(emoji.validate(), Ok(()));

        let accented = Registration::new("a@b.c", "ééééé", Role::Buyer);
        assert_eq!(
            accented.validate().unwrap_err().password.as_deref(),
            Some("Password must be at least 6 characters.")
        );
    }

    #[test]
    fn registration_defaults_to_supplier() {
        assert_eq!(Registration::default().role, Some(Role::Supplier));
    }

    #[test]
    fn registration_wire_shape() {
        let body = serde_json::to_value(Registration::new("a@b.c", "pw1234", Role::Manager)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "email": "a@b.c", "password": "pw1234", "role": "MANAGER" })
        );
    }
}
