//! Monitoring severity and the warning/critical threshold pair.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Check status, ordered by alerting severity.
///
/// `Unknown` is reserved for collection failures and sorts above
/// `Critical` even though it is not the result of a threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// The process exit code consumed by the monitoring system.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    /// The label leading the status line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated `(warning, critical)` pair.
///
/// Both levels are positive and `warning < critical`; construction fails
/// otherwise, so [`Thresholds::evaluate`] is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    warning: u64,
    critical: u64,
}

impl Thresholds {
    pub fn new(warning: u64, critical: u64) -> Result<Self, CoreError> {
        if warning == 0 || critical == 0 {
            return Err(CoreError::Thresholds {
                message: "warning and critical levels must be positive".to_owned(),
            });
        }
        if warning >= critical {
            return Err(CoreError::Thresholds {
                message: format!(
                    "warning level {warning} must be less than critical level {critical}"
                ),
            });
        }
        Ok(Self { warning, critical })
    }

    pub fn warning(&self) -> u64 {
        self.warning
    }

    pub fn critical(&self) -> u64 {
        self.critical
    }

    /// Band the current user count. Pure and total: both bounds are
    /// inclusive on the more severe side.
    pub fn evaluate(&self, current_users: u64) -> Severity {
        if current_users >= self.critical {
            Severity::Critical
        } else if current_users >= self.warning {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn thresholds() -> Thresholds {
        Thresholds::new(10, 20).unwrap()
    }

    #[test]
    fn below_warning_is_ok() {
        for current in 0..10 {
            assert_eq!(thresholds().evaluate(current), Severity::Ok);
        }
    }

    #[test]
    fn between_levels_is_warning() {
        for current in 10..20 {
            assert_eq!(thresholds().evaluate(current), Severity::Warning);
        }
    }

    #[test]
    fn at_or_above_critical_is_critical() {
        assert_eq!(thresholds().evaluate(20), Severity::Critical);
        assert_eq!(thresholds().evaluate(25), Severity::Critical);
        assert_eq!(thresholds().evaluate(u64::MAX), Severity::Critical);
    }

    #[test]
    fn boundaries_are_inclusive_on_the_severe_side() {
        assert_eq!(thresholds().evaluate(10), Severity::Warning);
        assert_eq!(thresholds().evaluate(20), Severity::Critical);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let t = thresholds();
        assert_eq!(t.evaluate(15), t.evaluate(15));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        assert!(Thresholds::new(20, 10).is_err());
        assert!(Thresholds::new(10, 10).is_err());
    }

    #[test]
    fn zero_thresholds_are_rejected() {
        assert!(Thresholds::new(0, 10).is_err());
        assert!(Thresholds::new(10, 0).is_err());
    }

    #[test]
    fn severity_ordering_tracks_alerting_priority() {
        assert!(Severity::Ok < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert!(Severity::Critical < Severity::Unknown);
    }

    #[test]
    fn exit_codes_follow_plugin_convention() {
        assert_eq!(Severity::Ok.exit_code(), 0);
        assert_eq!(Severity::Warning.exit_code(), 1);
        assert_eq!(Severity::Critical.exit_code(), 2);
        assert_eq!(Severity::Unknown.exit_code(), 3);
    }
}
