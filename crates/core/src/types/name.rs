//! Username and customer name types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Minimum number of characters in a username or customer name.
const MIN_NAME_CHARS: usize = 3;

/// Errors that can occur when parsing a [`Username`] or [`CustomerName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Fewer characters than required.
    #[error("must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
}

fn check_length(s: &str) -> Result<(), NameError> {
    if s.chars().count() < MIN_NAME_CHARS {
        return Err(NameError::TooShort {
            min: MIN_NAME_CHARS,
        });
    }
    Ok(())
}

/// A login name for a user account.
///
/// Usernames are unique across users; uniqueness is enforced by the store.
///
/// ```
/// use favorites_core::Username;
///
/// assert!(Username::parse("alice").is_ok());
/// assert!(Username::parse("al").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Parse a `Username`.
    ///
    /// # Errors
    ///
    /// Returns a [`NameError`] if the name is shorter than 3 characters.
    pub fn parse(s: &str) -> Result<Self, NameError> {
        check_length(s)?;
        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The display name of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerName(String);

impl CustomerName {
    /// Parse a `CustomerName`.
    ///
    /// # Errors
    ///
    /// Returns a [`NameError`] if the name is shorter than 3 characters.
    pub fn parse(s: &str) -> Result<Self, NameError> {
        check_length(s)?;
        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_string_conversions {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = NameError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                check_length(&value)?;
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_conversions!(Username);
impl_string_conversions!(CustomerName);
