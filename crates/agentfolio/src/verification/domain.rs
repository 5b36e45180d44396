use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized E.164 phone number for the supported country (India).
///
/// Accepts `+91` / `91` prefixed input, an optional leading trunk `0`, and
/// bare 10-digit mobile numbers; everything is stored as `+91XXXXXXXXXX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str) -> Result<Self, PhoneNumberError> {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '(' && *c != ')')
            .collect();

        let digits = if let Some(rest) = compact.strip_prefix("+91") {
            rest
        } else if compact.len() == 12 && compact.starts_with("91") {
            &compact[2..]
        } else if compact.len() == 11 && compact.starts_with('0') {
            &compact[1..]
        } else {
            compact.as_str()
        };

        if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneNumberError::UnsupportedFormat);
        }

        // Indian mobile numbers start 6 through 9.
        if !matches!(digits.as_bytes()[0], b'6'..=b'9') {
            return Err(PhoneNumberError::UnsupportedFormat);
        }

        Ok(Self(format!("+91{digits}")))
    }

    pub fn as_e164(&self) -> &str {
        &self.0
    }

    pub fn into_e164(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PhoneNumberError {
    #[error("phone must be a 10-digit Indian mobile number, optionally prefixed with +91")]
    UnsupportedFormat,
}

/// Draft-side verification progress for one phone number.
///
/// `Unsent -> Sent -> Verified`; changing the number drops back to
/// `Unsent`, a failed verify attempt stays at `Sent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    #[default]
    Unsent,
    Sent,
    Verified,
}

impl VerificationState {
    pub const fn ordered() -> [Self; 3] {
        [Self::Unsent, Self::Sent, Self::Verified]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unsent => "Unsent",
            Self::Sent => "Code Sent",
            Self::Verified => "Verified",
        }
    }

    pub const fn is_verified(self) -> bool {
        matches!(self, Self::Verified)
    }
}
