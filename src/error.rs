//! Error types used by the levelvisor runtime and its collaborators.
//!
//! - [`LevelError`]: synchronous rejections at the inbound API boundary.
//! - [`SubmitError`]: the command queue refused a transition request.
//! - [`FrameworkError`]: raised by a [`Framework`](crate::Framework) callback.
//! - [`TransitionError`]: why a queued transition stopped before its target.
//! - [`PlanError`]: a launch plan could not be loaded.
//!
//! Most types provide `as_label` (stable snake_case label for logs/metrics).

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::level::Level;

/// # Errors returned synchronously by the sequencer API.
///
/// Nothing is queued when one of these is returned.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LevelError {
    /// A start level below zero was requested.
    #[error("start level must not be negative, got {value}")]
    Negative {
        /// The rejected value.
        value: i64,
    },

    /// A start level that does not fit the level domain was requested.
    #[error("start level {value} is out of range")]
    OutOfRange {
        /// The rejected value.
        value: i64,
    },

    /// The initial component start level must be strictly positive.
    #[error("initial bundle start level must be greater than zero, got {value}")]
    NonPositiveInitial {
        /// The rejected value.
        value: i64,
    },

    /// The request was valid but could not be queued.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl LevelError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use levelvisor::LevelError;
    ///
    /// let err = LevelError::Negative { value: -1 };
    /// assert_eq!(err.as_label(), "level_negative");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LevelError::Negative { .. } => "level_negative",
            LevelError::OutOfRange { .. } => "level_out_of_range",
            LevelError::NonPositiveInitial { .. } => "level_initial_non_positive",
            LevelError::Submit(e) => e.as_label(),
        }
    }
}

/// Error returned when a transition command cannot be enqueued.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Command queue is full (the worker is behind; try again later).
    #[error("transition queue full")]
    Full,

    /// Executor has been shut down.
    #[error("executor shut down")]
    Closed,
}

impl SubmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubmitError::Full => "submit_full",
            SubmitError::Closed => "submit_closed",
        }
    }
}

/// # Errors raised by the framework collaborator.
///
/// Returning one of these from
/// [`Framework::level_changing`](crate::Framework::level_changing) or
/// [`Framework::level_changed`](crate::Framework::level_changed) aborts the
/// remaining steps of the running transition.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FrameworkError {
    /// A component failed to start or stop.
    #[error("component '{component}' failed: {reason}")]
    Component {
        /// Name of the failing component.
        component: String,
        /// Failure description.
        reason: String,
    },

    /// The framework refused to enter a level.
    #[error("level {level} vetoed: {reason}")]
    Vetoed {
        /// The level that was refused.
        level: Level,
        /// Why it was refused.
        reason: String,
    },

    /// Any other failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameworkError {
    /// Convenience constructor for [`FrameworkError::Component`].
    pub fn component(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Component {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            FrameworkError::Component { .. } => "framework_component",
            FrameworkError::Vetoed { .. } => "framework_vetoed",
            FrameworkError::Other(_) => "framework_other",
        }
    }
}

/// Which half of a step a callback belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the level is committed.
    Changing,
    /// After the level is committed.
    Changed,
}

impl Phase {
    /// Lowercase name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Changing => "changing",
            Phase::Changed => "changed",
        }
    }
}

/// # Reasons a transition stopped before reaching its target.
///
/// The start level is left at the last committed step in every case.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransitionError {
    /// A framework callback returned an error.
    #[error("framework failed while {} {old} -> {new}: {source}", .phase.as_str())]
    Framework {
        /// Callback that failed.
        phase: Phase,
        /// Level before the step.
        old: Level,
        /// Level the step was heading to.
        new: Level,
        /// The collaborator error.
        #[source]
        source: FrameworkError,
    },

    /// The owning component handle no longer yields a framework.
    #[error("framework unavailable for step {old} -> {new}")]
    FrameworkUnavailable {
        /// Level before the step.
        old: Level,
        /// Level the step was heading to.
        new: Level,
    },

    /// The watchdog aborted the transition.
    #[error("transition aborted after {timeout:?}")]
    TimedOut {
        /// The configured command timeout.
        timeout: Duration,
    },
}

impl TransitionError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use levelvisor::{Level, TransitionError};
    ///
    /// let err = TransitionError::FrameworkUnavailable { old: Level::new(1), new: Level::new(2) };
    /// assert_eq!(err.as_label(), "transition_framework_unavailable");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TransitionError::Framework { .. } => "transition_framework_failed",
            TransitionError::FrameworkUnavailable { .. } => "transition_framework_unavailable",
            TransitionError::TimedOut { .. } => "transition_timed_out",
        }
    }
}

/// Errors produced while loading a [`LevelPlan`](crate::LevelPlan).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PlanError {
    /// The plan file could not be read.
    #[error("failed to read plan '{}': {source}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_errors_bubble_through_level_error() {
        let err: LevelError = SubmitError::Closed.into();
        assert_eq!(err.as_label(), "submit_closed");
        assert_eq!(err.to_string(), "executor shut down");
    }

    #[test]
    fn transition_error_names_the_failing_phase() {
        let err = TransitionError::Framework {
            phase: Phase::Changing,
            old: Level::new(2),
            new: Level::new(3),
            source: FrameworkError::component("audio", "device busy"),
        };
        assert_eq!(
            err.to_string(),
            "framework failed while changing 2 -> 3: component 'audio' failed: device busy"
        );
    }

    #[test]
    fn anyhow_errors_convert_into_framework_errors() {
        fn fails() -> Result<(), FrameworkError> {
            Err::<(), _>(anyhow::anyhow!("boom"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert_eq!(err.as_label(), "framework_other");
        assert_eq!(err.to_string(), "boom");
    }
}
