use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::NameError;

/// A player name as it is entered before a game: letters only, at most
/// [`PlayerName::MAX_LEN`] of them, capitalised on the first letter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    pub const MAX_LEN: usize = 10;

    /// Normalises the casing of `raw`, rejecting anything but ASCII letters.
    pub fn new(raw: &str) -> Result<Self, NameError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(NameError::Empty);
        }
        if let Some(bad) = raw.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(NameError::InvalidChar(bad));
        }
        if raw.len() > Self::MAX_LEN {
            return Err(NameError::TooLong(Self::MAX_LEN));
        }

        let mut name = String::with_capacity(raw.len());
        for (i, c) in raw.chars().enumerate() {
            name.push(if i == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PlayerName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

impl AsRef<str> for PlayerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
