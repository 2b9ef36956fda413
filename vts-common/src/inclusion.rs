//! Inclusion setting
//!
//! A session-wide integer the client uses to bias how many borderline clips
//! are included when sorting. Bounded to [`Inclusion::MIN`]..=[`Inclusion::MAX`].

use serde::Serialize;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Inclusion(i32);

impl Inclusion {
    pub const MIN: i32 = -10;
    pub const MAX: i32 = 10;

    /// Build from any number: fractions truncate toward zero, then clamp
    pub fn from_number(value: f64) -> Self {
        // `as` saturates for out-of-range floats
        let truncated = value.trunc() as i64;
        Self(truncated.clamp(Self::MIN as i64, Self::MAX as i64) as i32)
    }

    /// Parse a client-supplied JSON value
    ///
    /// Only JSON numbers are accepted; anything else is invalid input.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        value
            .as_f64()
            .map(Self::from_number)
            .ok_or_else(|| Error::InvalidInput(format!("inclusion must be a number, got {}", value)))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
