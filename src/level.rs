//! # Start level value type.
//!
//! [`Level`] is a non-negative activation tier. Components registered at a
//! level are started when the process-wide level rises through it and stopped
//! when it falls back below.
//!
//! Callers that work with signed integers go through [`TryFrom`], which rejects
//! negative values with [`LevelError::Negative`]:
//! ```rust
//! use levelvisor::{Level, LevelError};
//!
//! assert_eq!(Level::try_from(3_i32).unwrap(), Level::new(3));
//! assert!(matches!(Level::try_from(-1_i32), Err(LevelError::Negative { value: -1 })));
//! ```

use std::fmt;

use crate::error::LevelError;

/// Non-negative start level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u32);

impl Level {
    /// The lowest level; every sequencer starts here.
    pub const ZERO: Level = Level(0);

    /// Default initial level for newly admitted components.
    pub const ONE: Level = Level(1);

    /// Wraps a raw level.
    #[inline]
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Level directly above this one, `None` on overflow.
    #[inline]
    pub fn next(self) -> Option<Level> {
        self.0.checked_add(1).map(Level)
    }

    /// Level directly below this one, `None` at zero.
    #[inline]
    pub fn prev(self) -> Option<Level> {
        self.0.checked_sub(1).map(Level)
    }
}

impl From<u32> for Level {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl TryFrom<i64> for Level {
    type Error = LevelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(LevelError::Negative { value });
        }
        u32::try_from(value)
            .map(Level)
            .map_err(|_| LevelError::OutOfRange { value })
    }
}

impl TryFrom<i32> for Level {
    type Error = LevelError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Level::try_from(i64::from(value))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_are_rejected() {
        assert!(matches!(
            Level::try_from(-5_i64),
            Err(LevelError::Negative { value: -5 })
        ));
    }

    #[test]
    fn values_beyond_u32_are_out_of_range() {
        let big = i64::from(u32::MAX) + 1;
        assert!(matches!(
            Level::try_from(big),
            Err(LevelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn neighbours_saturate_at_the_edges() {
        assert_eq!(Level::ZERO.prev(), None);
        assert_eq!(Level::new(u32::MAX).next(), None);
        assert_eq!(Level::new(4).prev(), Some(Level::new(3)));
        assert_eq!(Level::new(4).next(), Some(Level::new(5)));
    }
}
