//! Target user handle.
//!
//! Callers may paste handles as `spez`, `u/spez`, `/u/spez`, or `/spez`; the
//! normalised form drops the prefix and surrounding whitespace. Shape
//! validation is a policy toggle so deployments can accept any non-empty
//! handle and let the platform decide.

use std::fmt;

/// Minimum handle length accepted when shape validation is enabled.
pub const HANDLE_MIN: usize = 3;
/// Maximum handle length accepted when shape validation is enabled.
pub const HANDLE_MAX: usize = 20;

/// Validation errors returned by [`Handle::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleValidationError {
    Empty,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for HandleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username is required"),
            Self::TooShort { min } => write!(f, "Username must be at least {min} characters"),
            Self::TooLong { max } => write!(f, "Username must be at most {max} characters"),
            Self::InvalidCharacters => write!(
                f,
                "Username may only contain letters, numbers, underscores, or hyphens",
            ),
        }
    }
}

impl std::error::Error for HandleValidationError {}

/// Whether [`Handle::parse`] enforces length and character rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlePolicy {
    /// Enforce `3..=20` characters of `[A-Za-z0-9][A-Za-z0-9_-]*`.
    pub validate_shape: bool,
}

impl Default for HandlePolicy {
    fn default() -> Self {
        Self {
            validate_shape: true,
        }
    }
}

/// Normalised handle of the user being profiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle(String);

impl Handle {
    /// Normalise and validate a raw handle.
    ///
    /// # Examples
    /// ```
    /// use profile_backend::domain::{Handle, HandlePolicy};
    ///
    /// let handle = Handle::parse(" /u/spez ", HandlePolicy::default()).expect("valid handle");
    /// assert_eq!(handle.as_ref(), "spez");
    /// ```
    pub fn parse(raw: &str, policy: HandlePolicy) -> Result<Self, HandleValidationError> {
        let normalised = normalise(raw);
        if normalised.is_empty() {
            return Err(HandleValidationError::Empty);
        }
        if policy.validate_shape {
            validate_shape(normalised)?;
        }
        Ok(Self(normalised.to_owned()))
    }
}

/// Strip surrounding whitespace and an optional `/`, `u/`, or `/u/` prefix.
///
/// The `u/` marker is matched case-insensitively.
///
/// # Examples
/// ```
/// use profile_backend::domain::handle::normalise;
///
/// assert_eq!(normalise("U/spez"), "spez");
/// assert_eq!(normalise("/spez"), "spez");
/// assert_eq!(normalise("spez"), "spez");
/// ```
pub fn normalise(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_slash = trimmed.strip_prefix('/').unwrap_or(trimmed);
    let without_marker = match without_slash.get(..2) {
        Some(marker) if marker.eq_ignore_ascii_case("u/") => without_slash.get(2..).unwrap_or(""),
        _ => without_slash,
    };
    without_marker.trim()
}

fn validate_shape(handle: &str) -> Result<(), HandleValidationError> {
    let length = handle.chars().count();
    if length < HANDLE_MIN {
        return Err(HandleValidationError::TooShort { min: HANDLE_MIN });
    }
    if length > HANDLE_MAX {
        return Err(HandleValidationError::TooLong { max: HANDLE_MAX });
    }

    let mut chars = handle.chars();
    let leading_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if leading_ok && rest_ok {
        Ok(())
    } else {
        Err(HandleValidationError::InvalidCharacters)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
