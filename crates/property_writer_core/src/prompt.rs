//! crates/property_writer_core/src/prompt.rs
//!
//! Turns a set of property attributes into the instruction sent to the model.

use crate::domain::PropertyAttributes;

const NOT_SPECIFIED: &str = "Not specified";
const NONE: &str = "None";

/// Builds the listing prompt.
///
/// Empty optional fields are replaced with a placeholder so that every line of
/// the template is always present. Required fields are not checked here.
pub fn build_prompt(attrs: &PropertyAttributes) -> String {
    format!(
        "Write a professional and attractive property description \
for a land listing based on the following details:

Property Type: {property_type}
Location: {location}
Area: {area} {unit}
Price: {price}
Facing: {facing}
Road Width: {road_width}
Surroundings: {surroundings}
Amenities: {amenities}
Legal Status: {legal_status}
Additional Information: {additional_info}

Write a compelling description that highlights the key features, \
location advantages, and investment potential. \
Keep it professional, engaging, and around 150-200 words.",
        property_type = attrs.property_type,
        location = attrs.location,
        area = attrs.area,
        unit = attrs.area_unit,
        price = or_placeholder(&attrs.price, NOT_SPECIFIED),
        facing = attrs.facing,
        road_width = or_placeholder(&attrs.road_width, NOT_SPECIFIED),
        surroundings = or_placeholder(&attrs.surroundings, NOT_SPECIFIED),
        amenities = or_placeholder(&attrs.amenities, NOT_SPECIFIED),
        legal_status = attrs.legal_status,
        additional_info = or_placeholder(&attrs.additional_info, NONE),
    )
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}
