//! Validated recall rating for a single review.
//!
//! Quality is the caller's 0-5 grade of how well a card was remembered
//! (0 = total blackout, 5 = perfect recall). Values of 3 and above count
//! as a correct answer for scheduling purposes. Construction rejects
//! out-of-range values so the scheduling arithmetic never sees them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    /// Creates a quality rating, rejecting values above 5.
    pub fn new(value: u8) -> Result<Self> {
        if value > 5 {
            return Err(Error::QualityOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// True when the answer counts as correct (quality >= 3).
    pub fn is_correct(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> u8 {
        quality.0
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
