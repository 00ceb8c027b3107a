//! Supported UI locales.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the two supported locale codes. `En` is the first-run default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    He,
}

impl Locale {
    pub const SUPPORTED: [Locale; 2] = [Locale::En, Locale::He];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::He => "he",
        }
    }

    /// The other supported locale.
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::He,
            Self::He => Self::En,
        }
    }

    /// Whether text in this locale is laid out right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::He)
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLocaleError(pub String);

impl Display for ParseLocaleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported locale `{}`; expected en|he", self.0)
    }
}

impl Error for ParseLocaleError {}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "he" => Ok(Self::He),
            other => Err(ParseLocaleError(other.to_string())),
        }
    }
}
