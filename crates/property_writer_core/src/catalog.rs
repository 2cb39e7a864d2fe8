//! crates/property_writer_core/src/catalog.rs
//!
//! The single table of form fields and their allowed values. Every surface that
//! renders or documents the form reads it from here.

use crate::domain::{AreaUnit, Facing, LegalStatus, PropertyAttributes, PropertyType};

/// Identifies one field of `PropertyAttributes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    PropertyType,
    Location,
    Area,
    AreaUnit,
    Price,
    Facing,
    RoadWidth,
    Surroundings,
    Amenities,
    LegalStatus,
    AdditionalInfo,
}

/// How a field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Choice(&'static [&'static str]),
    Text,
    LongText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    /// Form parameter name.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
}

const fn choice(
    id: FieldId,
    key: &'static str,
    label: &'static str,
    options: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        id,
        key,
        label,
        kind: FieldKind::Choice(options),
        required: false,
        placeholder: "",
    }
}

const fn text(
    id: FieldId,
    key: &'static str,
    label: &'static str,
    required: bool,
    placeholder: &'static str,
) -> FieldSpec {
    FieldSpec {
        id,
        key,
        label,
        kind: FieldKind::Text,
        required,
        placeholder,
    }
}

/// All form fields in display order.
pub const FORM_FIELDS: &[FieldSpec] = &[
    choice(
        FieldId::PropertyType,
        "property_type",
        "Property Type",
        PropertyType::LABELS,
    ),
    text(
        FieldId::Location,
        "location",
        "Location",
        true,
        "e.g., Near Highway, City Center",
    ),
    text(FieldId::Area, "area", "Area", true, "1000"),
    choice(FieldId::AreaUnit, "area_unit", "Unit", AreaUnit::LABELS),
    text(FieldId::Price, "price", "Price", false, "e.g., ₹50 Lakhs"),
    choice(FieldId::Facing, "facing", "Facing", Facing::LABELS),
    text(
        FieldId::RoadWidth,
        "road_width",
        "Road Width",
        false,
        "e.g., 40 ft",
    ),
    text(
        FieldId::Surroundings,
        "surroundings",
        "Surroundings",
        false,
        "Schools, hospitals, markets nearby",
    ),
    text(
        FieldId::Amenities,
        "amenities",
        "Amenities",
        false,
        "Water, electricity, drainage",
    ),
    choice(
        FieldId::LegalStatus,
        "legal_status",
        "Legal Status",
        LegalStatus::LABELS,
    ),
    FieldSpec {
        id: FieldId::AdditionalInfo,
        key: "additional_info",
        label: "Additional Information",
        kind: FieldKind::LongText,
        required: false,
        placeholder: "Any other details...",
    },
];

impl PropertyAttributes {
    /// The current value of a field as it appears on the form.
    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::PropertyType => self.property_type.label(),
            FieldId::Location => &self.location,
            FieldId::Area => &self.area,
            FieldId::AreaUnit => self.area_unit.label(),
            FieldId::Price => &self.price,
            FieldId::Facing => self.facing.label(),
            FieldId::RoadWidth => &self.road_width,
            FieldId::Surroundings => &self.surroundings,
            FieldId::Amenities => &self.amenities,
            FieldId::LegalStatus => self.legal_status.label(),
            FieldId::AdditionalInfo => &self.additional_info,
        }
    }
}
