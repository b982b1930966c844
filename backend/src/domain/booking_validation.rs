//! Validation failures shared by the care record drafts.

use thiserror::Error;

/// Why a care record draft was rejected.
///
/// Messages are returned to clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingValidationError {
    #[error("line1 and city required")]
    AddressIncomplete,
    #[error("area and positive hours required")]
    NurseBookingIncomplete,
    #[error("type(day/night) and positive days required")]
    SubscriptionIncomplete,
    #[error("positive distance_km and pickup_address required")]
    AmbulanceBookingIncomplete,
    #[error("booking total exceeds the supported range")]
    TotalOutOfRange,
}

impl BookingValidationError {
    /// Request field most closely associated with the failure.
    pub const fn field(self) -> &'static str {
        match self {
            Self::AddressIncomplete => "line1",
            Self::NurseBookingIncomplete => "hours",
            Self::SubscriptionIncomplete => "days",
            Self::AmbulanceBookingIncomplete => "distance_km",
            Self::TotalOutOfRange => "total",
        }
    }
}

/// Trimmed text, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some(" Home "), Some("Home"))]
    fn text_is_trimmed_and_blank_collapses(
        #[case] raw: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(non_blank(raw).as_deref(), expected);
    }

    #[test]
    fn messages_match_client_contract() {
        assert_eq!(
            BookingValidationError::NurseBookingIncomplete.to_string(),
            "area and positive hours required"
        );
        assert_eq!(
            BookingValidationError::SubscriptionIncomplete.to_string(),
            "type(day/night) and positive days required"
        );
    }
}
