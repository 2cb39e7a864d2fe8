//! crates/property_writer_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These types are independent of any web framework or serialization format.

use std::fmt;
use std::str::FromStr;

/// Returned when a submitted label is not one of a field's allowed values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {field}")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

/// Declares a fixed-choice field: the enum, its display labels and label parsing.
/// The first variant listed is the default selection.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $first:ident => $first_label:literal,
            $($variant:ident => $label:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $first,
            $($variant),*
        }

        impl $name {
            /// Every allowed value, in display order.
            pub const ALL: &'static [$name] = &[$name::$first, $($name::$variant),*];

            /// Every allowed label, in display order.
            pub const LABELS: &'static [&'static str] = &[$first_label, $($label),*];

            pub fn label(self) -> &'static str {
                match self {
                    $name::$first => $first_label,
                    $($name::$variant => $label),*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == s)
                    .ok_or_else(|| UnknownOption {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

choice_enum! {
    /// The kind of land being listed.
    PropertyType, "property type" {
        ResidentialPlot => "Residential Plot",
        CommercialPlot => "Commercial Plot",
        AgriculturalLand => "Agricultural Land",
        IndustrialPlot => "Industrial Plot",
        FarmLand => "Farm Land",
    }
}

choice_enum! {
    AreaUnit, "area unit" {
        SquareFeet => "sq ft",
        SquareYards => "sq yards",
        Acres => "acres",
        Hectares => "hectares",
    }
}

choice_enum! {
    /// Compass direction the plot faces.
    Facing, "facing" {
        East => "East",
        West => "West",
        North => "North",
        South => "South",
        NorthEast => "North-East",
        SouthEast => "South-East",
        NorthWest => "North-West",
        SouthWest => "South-West",
    }
}

choice_enum! {
    LegalStatus, "legal status" {
        ClearTitle => "Clear Title",
        ApprovedLayout => "Approved Layout",
        ReraApproved => "RERA Approved",
        Freehold => "Freehold",
        Leasehold => "Leasehold",
    }
}

/// The attributes of a land listing, as entered on the form.
///
/// Free-text fields are kept exactly as typed. A field counts as blank when it
/// is empty or contains only whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyAttributes {
    pub property_type: PropertyType,
    pub location: String,
    pub area: String,
    pub area_unit: AreaUnit,
    pub price: String,
    pub facing: Facing,
    pub road_width: String,
    pub surroundings: String,
    pub amenities: String,
    pub legal_status: LegalStatus,
    pub additional_info: String,
}

impl PropertyAttributes {
    /// Labels of the required fields that are currently empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.location.is_empty() {
            missing.push("Location");
        }
        if self.area.is_empty() {
            missing.push("Area");
        }
        missing
    }
}

/// The user's API key for the completion endpoint.
///
/// Held in memory only. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw key exactly as typed. Empty or whitespace-only input
    /// yields `None`.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// A plain-text file offered to the user for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionExport {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back_to_their_variant() {
        for facing in Facing::ALL {
            assert_eq!(facing.label().parse::<Facing>(), Ok(*facing));
        }
        assert_eq!(
            "RERA Approved".parse::<LegalStatus>(),
            Ok(LegalStatus::ReraApproved)
        );
    }

    #[test]
    fn unknown_label_names_the_field() {
        let err = "Penthouse".parse::<PropertyType>().unwrap_err();
        assert_eq!(err.field, "property type");
        assert_eq!(err.to_string(), "'Penthouse' is not a valid property type");
    }

    #[test]
    fn defaults_are_the_first_choice() {
        let attrs = PropertyAttributes::default();
        assert_eq!(attrs.property_type, PropertyType::ResidentialPlot);
        assert_eq!(attrs.area_unit, AreaUnit::SquareFeet);
        assert_eq!(attrs.facing, Facing::East);
        assert_eq!(attrs.legal_status, LegalStatus::ClearTitle);
    }

    #[test]
    fn empty_required_fields_are_missing() {
        let attrs = PropertyAttributes {
            area: "1000".to_string(),
            ..Default::default()
        };
        assert_eq!(attrs.missing_required(), vec!["Location"]);

        let spaced = PropertyAttributes {
            location: " ".to_string(),
            area: "1000".to_string(),
            ..Default::default()
        };
        assert!(spaced.missing_required().is_empty());
    }

    #[test]
    fn credential_is_redacted_and_blank_is_rejected() {
        assert!(Credential::new("  ").is_none());
        assert!(Credential::new("").is_none());
        let key = Credential::new("gsk_secret").unwrap();
        assert_eq!(key.expose(), "gsk_secret");
        assert!(!format!("{key:?}").contains("gsk_secret"));
    }

    #[test]
    fn credential_is_kept_exactly_as_typed() {
        let key = Credential::new(" gsk_padded\t").unwrap();
        assert_eq!(key.expose(), " gsk_padded\t");
    }
}
