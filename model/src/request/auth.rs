//! Auth form request bodies.

use garde::Validate;

use serde::{Deserialize, Serialize};

/// The longest display name a viewer may choose, in chars.
pub const MAX_DISPLAY_NAME_LEN: usize = 64;

/// Which tab of the auth form is active.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Dummy sign in. Nothing is stored.
    #[default]
    Login,
    /// Dummy sign up. Stores the chosen display name.
    Signup,
}

/// A submission of the auth form.
///
/// There is no real authentication. Email and password are accepted so the
/// form can be posted as-is, but they are never looked at.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct AuthRequest {
    #[serde(default)]
    #[garde(skip)]
    pub mode: AuthMode,
    /// The display name chosen at signup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(custom(display_name_fits))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub password: Option<String>,
}

impl AuthRequest {
    /// The display name to store, if this submission sets one.
    ///
    /// Only signups with a non-blank name do.
    pub fn display_name(&self) -> Option<&str> {
        match self.mode {
            AuthMode::Signup => self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty()),
            AuthMode::Login => None,
        }
    }
}

/// Checks the name that would be stored, so surrounding whitespace is free.
fn display_name_fits(name: &Option<String>, _ctx: &()) -> garde::Result {
    match name.as_deref().map(str::trim) {
        Some(name) if name.chars().count() > MAX_DISPLAY_NAME_LEN => Err(garde::Error::new(
            format!("length is greater than {MAX_DISPLAY_NAME_LEN}"),
        )),
        _ => Ok(()),
    }
}

/// Query parameters of the auth view.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct AuthQuery {
    #[serde(default)]
    pub mode: AuthMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let request = AuthRequest {
            mode: AuthMode::Signup,
            name: Some("  Nadia  ".into()),
            ..Default::default()
        };
        assert_eq!(request.display_name(), Some("Nadia"));

        let request = AuthRequest {
            mode: AuthMode::Signup,
            name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(request.display_name(), None);

        let request = AuthRequest {
            mode: AuthMode::Login,
            name: Some("Nadia".into()),
            ..Default::default()
        };
        assert_eq!(request.display_name(), None);
    }

    #[test]
    fn test_name_length_is_validated() {
        let request = AuthRequest {
            mode: AuthMode::Signup,
            name: Some("a".repeat(MAX_DISPLAY_NAME_LEN + 1)),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = AuthRequest {
            mode: AuthMode::Signup,
            name: Some("ä".repeat(MAX_DISPLAY_NAME_LEN)),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_name_length_ignores_surrounding_whitespace() {
        let padded = format!("  {}\t ", "a".repeat(MAX_DISPLAY_NAME_LEN));
        let request = AuthRequest {
            mode: AuthMode::Signup,
            name: Some(padded),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        assert_eq!(
            request.display_name().map(|name| name.chars().count()),
            Some(MAX_DISPLAY_NAME_LEN)
        );

        let request = AuthRequest {
            mode: AuthMode::Signup,
            name: Some(format!(" {} ", "a".repeat(MAX_DISPLAY_NAME_LEN + 1))),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_mode_defaults_to_login() {
        let request = serde_json::from_str::<AuthRequest>(r#"{"name":"Nadia"}"#)
            .expect("valid request");
        assert_eq!(request.mode, AuthMode::Login);
    }
}
