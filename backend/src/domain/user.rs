//! User identity model.
//!
//! Authentication is out of scope; requests carry a stub identity and only
//! the [`UserId`] crosses the service boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::{TextBounds, Violation, check_alphanumeric};

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Identity used while authentication is not implemented.
    pub const ANONYMOUS: Self = Self(1);

    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login name: 3 to 32 ASCII letters and digits.
///
/// # Examples
/// ```
/// use backend::domain::Username;
///
/// assert!(Username::new("ada1815").is_ok());
/// assert!(Username::new("ada lovelace").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Character-count bounds for usernames.
    pub const BOUNDS: TextBounds = TextBounds::new(3, 32);

    /// Validate and construct a username.
    pub fn new(value: impl Into<String>) -> Result<Self, Violation> {
        let value = value.into();
        Self::BOUNDS.check(&value)?;
        check_alphanumeric(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = Violation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
