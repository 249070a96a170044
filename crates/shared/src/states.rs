use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyStatus {
    Draft,
    Confirmed,
    Cancelled,
}

impl JourneyStatus {
    /// Whether a transition to `new_status` is legal.
    ///
    /// The lifecycle only moves forward:
    /// - Draft → Confirmed, Cancelled
    /// - Confirmed → Cancelled
    /// - Cancelled → (terminal)
    pub fn can_transition_to(&self, new_status: &JourneyStatus) -> bool {
        match (self, new_status) {
            (s, n) if s == n => false,

            (JourneyStatus::Draft, JourneyStatus::Confirmed) => true,
            (JourneyStatus::Draft, JourneyStatus::Cancelled) => true,
            (JourneyStatus::Confirmed, JourneyStatus::Cancelled) => true,

            // Everything else is a backward transition
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JourneyStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyStatus::Draft => "draft",
            JourneyStatus::Confirmed => "confirmed",
            JourneyStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JourneyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JourneyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(JourneyStatus::Draft),
            "confirmed" => Ok(JourneyStatus::Confirmed),
            "cancelled" => Ok(JourneyStatus::Cancelled),
            other => Err(format!("unknown journey status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_moves_forward_only() {
        assert!(JourneyStatus::Draft.can_transition_to(&JourneyStatus::Confirmed));
        assert!(JourneyStatus::Draft.can_transition_to(&JourneyStatus::Cancelled));
        assert!(!JourneyStatus::Draft.can_transition_to(&JourneyStatus::Draft));
    }

    #[test]
    fn confirmed_can_only_cancel() {
        assert!(JourneyStatus::Confirmed.can_transition_to(&JourneyStatus::Cancelled));
        assert!(!JourneyStatus::Confirmed.can_transition_to(&JourneyStatus::Draft));
        assert!(!JourneyStatus::Confirmed.can_transition_to(&JourneyStatus::Confirmed));
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(JourneyStatus::Cancelled.is_terminal());
        assert!(!JourneyStatus::Cancelled.can_transition_to(&JourneyStatus::Draft));
        assert!(!JourneyStatus::Cancelled.can_transition_to(&JourneyStatus::Confirmed));
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            JourneyStatus::Draft,
            JourneyStatus::Confirmed,
            JourneyStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<JourneyStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("pending".parse::<JourneyStatus>().is_err());
    }
}
