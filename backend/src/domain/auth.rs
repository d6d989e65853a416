//! Authentication primitives: login credentials and registration requests.
//!
//! Inbound adapters hand raw, possibly absent, strings to these constructors
//! so the presence and complexity rules live in one place.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

/// Minimum number of characters a new password must have.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Errors raised while validating credential payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username or password was absent or blank.
    MissingCredentials,
    /// Password is shorter than [`PASSWORD_MIN_LENGTH`].
    WeakPassword { min: usize },
    /// Username failed shape validation beyond presence.
    InvalidUsername(UserValidationError),
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "provide a valid username and password"),
            Self::WeakPassword { min } => {
                write!(f, "password must be at-least {min} characters")
            }
            Self::InvalidUsername(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use shoplist::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(Some(" ada "), Some("s3cret!")).unwrap();
/// assert_eq!(creds.username().as_str(), "ada");
/// assert_eq!(creds.password(), "s3cret!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw, possibly absent inputs.
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let (Some(raw_username), Some(raw_password)) = (username, password) else {
            return Err(CredentialsValidationError::MissingCredentials);
        };
        if raw_username.trim().is_empty() || raw_password.is_empty() {
            return Err(CredentialsValidationError::MissingCredentials);
        }
        let username =
            Username::new(raw_username).map_err(CredentialsValidationError::InvalidUsername)?;
        Ok(Self {
            username,
            password: Zeroizing::new(raw_password.to_owned()),
        })
    }

    /// Username for lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    credentials: LoginCredentials,
    firstname: Option<String>,
    lastname: Option<String>,
}

impl Registration {
    /// Validate presence and password complexity.
    ///
    /// # Examples
    /// ```
    /// use shoplist::domain::{CredentialsValidationError, Registration};
    ///
    /// let err = Registration::try_from_parts(Some("ada"), Some("123"), None, None).unwrap_err();
    /// assert_eq!(err, CredentialsValidationError::WeakPassword { min: 6 });
    /// ```
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
        firstname: Option<&str>,
        lastname: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let credentials = LoginCredentials::try_from_parts(username, password)?;
        if credentials.password().chars().count() < PASSWORD_MIN_LENGTH {
            return Err(CredentialsValidationError::WeakPassword {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self {
            credentials,
            firstname: firstname.map(str::to_owned),
            lastname: lastname.map(str::to_owned),
        })
    }

    /// Desired username.
    pub fn username(&self) -> &Username {
        self.credentials.username()
    }

    /// Plain-text password to hash.
    pub fn password(&self) -> &str {
        self.credentials.password()
    }

    /// Optional first name as supplied.
    pub fn firstname(&self) -> Option<&str> {
        self.firstname.as_deref()
    }

    /// Optional last name as supplied.
    pub fn lastname(&self) -> Option<&str> {
        self.lastname.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Presence and complexity rules.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("password"))]
    #[case(Some("ada"), None)]
    #[case(None, None)]
    #[case(Some("   "), Some("password"))]
    #[case(Some("ada"), Some(""))]
    fn login_requires_both_fields(#[case] username: Option<&str>, #[case] password: Option<&str>) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("missing inputs must fail");
        assert_eq!(err, CredentialsValidationError::MissingCredentials);
        assert_eq!(err.to_string(), "provide a valid username and password");
    }

    #[rstest]
    fn login_rejects_overlong_username() {
        let long = "x".repeat(200);
        let err = LoginCredentials::try_from_parts(Some(&long), Some("password"))
            .expect_err("overlong username");
        assert!(matches!(err, CredentialsValidationError::InvalidUsername(_)));
    }

    #[rstest]
    #[case("123")]
    #[case("12345")]
    fn registration_rejects_short_passwords(#[case] password: &str) {
        let err = Registration::try_from_parts(Some("ada"), Some(password), None, None)
            .expect_err("weak password");
        assert_eq!(err, CredentialsValidationError::WeakPassword { min: 6 });
        assert!(err.to_string().contains("password must be at-least 6"));
    }

    #[rstest]
    fn registration_checks_presence_before_complexity() {
        let err = Registration::try_from_parts(None, Some("1"), None, None)
            .expect_err("missing username");
        assert_eq!(err, CredentialsValidationError::MissingCredentials);
    }

    #[rstest]
    fn registration_keeps_optional_names() {
        let registration =
            Registration::try_from_parts(Some("ada"), Some("123456"), Some("Ada"), None)
                .expect("valid registration");
        assert_eq!(registration.username().as_str(), "ada");
        assert_eq!(registration.password(), "123456");
        assert_eq!(registration.firstname(), Some("Ada"));
        assert_eq!(registration.lastname(), None);
    }
}
