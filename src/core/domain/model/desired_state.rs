//! Desired management state and the "already satisfied" predicate.

use crate::core::domain::{
    error::ValidationError,
    model::{clock::Clock, node_record::NodeRecord},
    value_object::serde_helpers::format_timestamp,
};
use chrono::{DateTime, Duration, Timelike, Utc};
use std::fmt;

/// Length of the unmanage window when no end is given.
pub fn default_unmanage_period() -> Duration {
    Duration::hours(24)
}

/// The state a node should be left in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesiredState {
    Managed,
    Unmanaged(UnmanageWindow),
}

impl DesiredState {
    /// Returns true when `node` already matches this state.
    ///
    /// Only the fields that define the state are compared. An unmanaged node
    /// satisfies `Unmanaged` only when its stored start equals `from` and its
    /// stored end equals [`UnmanageWindow::scheduled_until`]; any other window
    /// is re-armed.
    pub fn is_satisfied_by(&self, node: &NodeRecord) -> bool {
        match self {
            DesiredState::Managed => !node.unmanaged,
            DesiredState::Unmanaged(window) => {
                node.unmanaged
                    && node.unmanage_from == Some(window.from)
                    && node.unmanage_until == Some(window.scheduled_until())
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DesiredState::Managed => "managed",
            DesiredState::Unmanaged(_) => "unmanaged",
        }
    }
}

/// A suppression interval for a node.
///
/// With `is_relative` set, SWIS ignores the date part of `until` and reads its
/// time of day as a duration counted from `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnmanageWindow {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub is_relative: bool,
}

impl UnmanageWindow {
    /// Builds a window, rejecting absolute windows that end before they start.
    pub fn new(
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        is_relative: bool,
    ) -> Result<Self, ValidationError> {
        if !is_relative && until <= from {
            return Err(ValidationError::ConstraintViolation(format!(
                "unmanage_until ({}) must be later than unmanage_from ({})",
                format_timestamp(&until),
                format_timestamp(&from)
            )));
        }
        Ok(Self {
            from,
            until,
            is_relative,
        })
    }

    /// Fills omitted bounds from one clock reading: `from` = now, `until` = now + 24h.
    pub fn with_defaults(
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
        is_relative: bool,
        clock: &dyn Clock,
    ) -> Result<Self, ValidationError> {
        let now = clock.now();
        let until = match until {
            Some(until) => until,
            None => {
                let defaulted = now + default_unmanage_period();
                if let Some(from) = from.filter(|from| !is_relative && *from >= defaulted) {
                    return Err(ValidationError::ConstraintViolation(format!(
                        "unmanage_from ({}) is not before the default unmanage_until \
                         (now + 24h = {}); set unmanage_until explicitly",
                        format_timestamp(&from),
                        format_timestamp(&defaulted)
                    )));
                }
                defaulted
            }
        };
        Self::new(from.unwrap_or(now), until, is_relative)
    }

    /// The instant SWIS stores as the end of this window.
    ///
    /// Absolute windows end at `until`. Relative windows end at `from` plus
    /// the time of day of `until`.
    pub fn scheduled_until(&self) -> DateTime<Utc> {
        if !self.is_relative {
            return self.until;
        }
        let offset = Duration::seconds(i64::from(self.until.num_seconds_from_midnight()))
            + Duration::nanoseconds(i64::from(self.until.nanosecond()));
        self.from + offset
    }
}

impl fmt::Display for UnmanageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "from {} until {}",
            format_timestamp(&self.from),
            format_timestamp(&self.until)
        )?;
        if self.is_relative {
            f.write_str(" (relative)")?;
        }
        Ok(())
    }
}
