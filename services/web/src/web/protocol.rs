//! services/web/src/web/protocol.rs
//!
//! Defines the payloads the browser sends to the server, both as HTML form
//! posts and as JSON on the `/api` routes.

use property_writer_core::{GenerationKind, PropertyAttributes, UnknownOption};
use serde::Deserialize;
use utoipa::ToSchema;

//=========================================================================================
// Property Attributes
//=========================================================================================

/// The property fields as submitted. Choice fields carry their display label.
/// Missing fields are treated as empty; missing choices take their default.
#[derive(Deserialize, Debug, Default, Clone, ToSchema)]
#[serde(default)]
pub struct PropertyForm {
    #[schema(example = "Residential Plot")]
    pub property_type: Option<String>,
    #[schema(example = "Near Highway")]
    pub location: String,
    #[schema(example = "1000")]
    pub area: String,
    #[schema(example = "sq ft")]
    pub area_unit: Option<String>,
    pub price: String,
    #[schema(example = "East")]
    pub facing: Option<String>,
    pub road_width: String,
    pub surroundings: String,
    pub amenities: String,
    #[schema(example = "Clear Title")]
    pub legal_status: Option<String>,
    pub additional_info: String,
}

impl PropertyForm {
    pub fn into_attributes(self) -> Result<PropertyAttributes, UnknownOption> {
        Ok(PropertyAttributes {
            property_type: parse_or_default(self.property_type)?,
            location: self.location,
            area: self.area,
            area_unit: parse_or_default(self.area_unit)?,
            price: self.price,
            facing: parse_or_default(self.facing)?,
            road_width: self.road_width,
            surroundings: self.surroundings,
            amenities: self.amenities,
            legal_status: parse_or_default(self.legal_status)?,
            additional_info: self.additional_info,
        })
    }
}

fn parse_or_default<T>(label: Option<String>) -> Result<T, UnknownOption>
where
    T: std::str::FromStr<Err = UnknownOption> + Default,
{
    match label {
        Some(label) => label.parse(),
        None => Ok(T::default()),
    }
}

//=========================================================================================
// Form Posts
//=========================================================================================

/// `POST /generate`: the property form plus which button was pressed.
#[derive(Deserialize, Debug)]
pub struct GenerateForm {
    #[serde(flatten)]
    pub property: PropertyForm,
    #[serde(default)]
    pub action: Option<String>,
}

impl GenerateForm {
    pub fn kind(&self) -> GenerationKind {
        match self.action.as_deref() {
            Some("regenerate") => GenerationKind::Regenerate,
            _ => GenerationKind::Generate,
        }
    }
}

/// `POST /settings`
#[derive(Deserialize, Debug)]
pub struct SettingsForm {
    #[serde(default)]
    pub api_key: String,
}

/// `POST /description`
#[derive(Deserialize, Debug)]
pub struct DescriptionForm {
    #[serde(default)]
    pub description: String,
}
