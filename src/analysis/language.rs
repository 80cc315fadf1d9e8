// Output language selection
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Language the model must write every string value in.
///
/// Any name is accepted and passed through verbatim; [`Language::ENGLISH`]
/// and [`Language::ARMENIAN`] are the predefined choices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub const ENGLISH: &'static str = "English";
    pub const ARMENIAN: &'static str = "Armenian";

    /// Blank names fall back to English.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::english()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn english() -> Self {
        Self(Self::ENGLISH.to_string())
    }

    pub fn armenian() -> Self {
        Self(Self::ARMENIAN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Language {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.0
    }
}
