//! Raw caller options and their validation into a reconcile request.

use crate::core::domain::{
    error::ValidationError,
    model::{
        clock::Clock,
        desired_state::{DesiredState, UnmanageWindow},
        node_identifier::NodeIdentifier,
    },
    value_object::serde_helpers::parse_timestamp,
};
use std::str::FromStr;

/// The two management states a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementState {
    Managed,
    Unmanaged,
}

impl FromStr for ManagementState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "managed" => Ok(ManagementState::Managed),
            "unmanaged" => Ok(ManagementState::Unmanaged),
            other => Err(ValidationError::field(
                "state",
                format!("'{}' is not one of: managed, unmanaged", other),
            )),
        }
    }
}

/// Node selection and desired state, exactly as supplied by the caller.
#[derive(Debug, Clone)]
pub struct ManageOptions {
    pub state: ManagementState,
    pub node_id: Option<String>,
    pub ip_address: Option<String>,
    pub dns_name: Option<String>,
    /// ISO 8601 start of the unmanage window; defaults to now.
    pub unmanage_from: Option<String>,
    /// ISO 8601 end of the unmanage window; defaults to now + 24h.
    pub unmanage_until: Option<String>,
    pub is_relative: bool,
}

impl ManageOptions {
    /// Options that select a node and set its state; everything else unset.
    pub fn new(state: ManagementState) -> Self {
        Self {
            state,
            node_id: None,
            ip_address: None,
            dns_name: None,
            unmanage_from: None,
            unmanage_until: None,
            is_relative: false,
        }
    }

    /// Validates the options without touching the network.
    ///
    /// Window options are ignored when the requested state is `managed`.
    pub fn into_request(&self, clock: &dyn Clock) -> Result<ManageRequest, ValidationError> {
        let identifier = NodeIdentifier::from_options(
            self.node_id.as_deref(),
            self.ip_address.as_deref(),
            self.dns_name.as_deref(),
        )?;

        let desired = match self.state {
            ManagementState::Managed => DesiredState::Managed,
            ManagementState::Unmanaged => {
                let from = optional_timestamp("unmanage_from", self.unmanage_from.as_deref())?;
                let until = optional_timestamp("unmanage_until", self.unmanage_until.as_deref())?;
                DesiredState::Unmanaged(UnmanageWindow::with_defaults(
                    from,
                    until,
                    self.is_relative,
                    clock,
                )?)
            }
        };

        Ok(ManageRequest {
            identifier,
            desired,
        })
    }
}

fn optional_timestamp(
    field: &str,
    value: Option<&str>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, ValidationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| parse_timestamp(field, v))
        .transpose()
}

/// A validated reconcile request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageRequest {
    pub identifier: NodeIdentifier,
    pub desired: DesiredState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::model::clock::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_parse_state() {
        assert_eq!("managed".parse::<ManagementState>().unwrap(), ManagementState::Managed);
        assert_eq!("Unmanaged".parse::<ManagementState>().unwrap(), ManagementState::Unmanaged);
        assert!("paused".parse::<ManagementState>().is_err());
    }

    #[test]
    fn test_managed_ignores_window_options() {
        let options = ManageOptions {
            node_id: Some("5".to_string()),
            unmanage_from: Some("garbage".to_string()),
            ..ManageOptions::new(ManagementState::Managed)
        };
        let request = options.into_request(&clock()).unwrap();
        assert_eq!(request.identifier, NodeIdentifier::Id(5));
        assert_eq!(request.desired, DesiredState::Managed);
    }

    #[test]
    fn test_unmanaged_defaults() {
        let options = ManageOptions {
            ip_address: Some("10.9.8.7".to_string()),
            ..ManageOptions::new(ManagementState::Unmanaged)
        };
        let request = options.into_request(&clock()).unwrap();
        let now = clock().0;
        assert_eq!(
            request.desired,
            DesiredState::Unmanaged(UnmanageWindow {
                from: now,
                until: now + Duration::hours(24),
                is_relative: false,
            })
        );
    }

    #[test]
    fn test_unmanaged_explicit_window() {
        let options = ManageOptions {
            dns_name: Some("fw01.corp.local".to_string()),
            unmanage_from: Some("2024-05-02T00:00:00Z".to_string()),
            unmanage_until: Some("2024-05-02T06:00:00+02:00".to_string()),
            ..ManageOptions::new(ManagementState::Unmanaged)
        };
        let request = options.into_request(&clock()).unwrap();
        match request.desired {
            DesiredState::Unmanaged(window) => {
                assert_eq!(window.from, Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap());
                assert_eq!(window.until, Utc.with_ymd_and_hms(2024, 5, 2, 4, 0, 0).unwrap());
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let missing = ManageOptions::new(ManagementState::Unmanaged);
        assert!(missing.into_request(&clock()).is_err());

        let bad_time = ManageOptions {
            node_id: Some("5".to_string()),
            unmanage_until: Some("next tuesday".to_string()),
            ..ManageOptions::new(ManagementState::Unmanaged)
        };
        let err = bad_time.into_request(&clock()).unwrap_err();
        assert!(err.to_string().contains("unmanage_until"));

        let inverted = ManageOptions {
            node_id: Some("5".to_string()),
            unmanage_from: Some("2024-05-03T00:00:00Z".to_string()),
            unmanage_until: Some("2024-05-02T00:00:00Z".to_string()),
            ..ManageOptions::new(ManagementState::Unmanaged)
        };
        assert!(inverted.into_request(&clock()).is_err());
    }
}
