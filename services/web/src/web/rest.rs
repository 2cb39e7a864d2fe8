//! services/web/src/web/rest.rs
//!
//! Contains the Axum handlers for the JSON API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::PropertyForm;
use axum::{http::StatusCode, response::Json};
use property_writer_core::{build_prompt, FieldKind, FORM_FIELDS};
use serde::Serialize;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        form_schema_handler,
        prompt_preview_handler,
    ),
    components(
        schemas(FormSchemaResponse, FieldSchema, PromptResponse, PropertyForm)
    ),
    tags(
        (name = "Property Description Writer API", description = "Form metadata and prompts.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// One field of the property form.
#[derive(Serialize, ToSchema)]
pub struct FieldSchema {
    /// Parameter name used in form posts and JSON bodies.
    name: String,
    label: String,
    /// `choice`, `text` or `long_text`.
    kind: String,
    required: bool,
    placeholder: String,
    /// Allowed labels for `choice` fields, in display order. Empty otherwise.
    options: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct FormSchemaResponse {
    fields: Vec<FieldSchema>,
}

#[derive(Serialize, ToSchema)]
pub struct PromptResponse {
    prompt: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Describe the property form: every field with its allowed values.
#[utoipa::path(
    get,
    path = "/api/form-schema",
    responses(
        (status = 200, description = "The form fields", body = FormSchemaResponse)
    )
)]
pub async fn form_schema_handler() -> Json<FormSchemaResponse> {
    let fields = FORM_FIELDS
        .iter()
        .map(|field| {
            let (kind, options) = match field.kind {
                FieldKind::Choice(options) => {
                    ("choice", options.iter().map(|o| o.to_string()).collect::<Vec<_>>())
                }
                FieldKind::Text => ("text", Vec::new()),
                FieldKind::LongText => ("long_text", Vec::new()),
            };
            FieldSchema {
                name: field.key.to_string(),
                label: field.label.to_string(),
                kind: kind.to_string(),
                required: field.required,
                placeholder: field.placeholder.to_string(),
                options,
            }
        })
        .collect();
    Json(FormSchemaResponse { fields })
}

/// Build the prompt that would be sent for the given property attributes.
///
/// Nothing is sent to the completion endpoint.
#[utoipa::path(
    post,
    path = "/api/prompt",
    request_body = PropertyForm,
    responses(
        (status = 200, description = "The prompt text", body = PromptResponse),
        (status = 400, description = "A required field is blank or a choice is not allowed")
    )
)]
pub async fn prompt_preview_handler(
    Json(form): Json<PropertyForm>,
) -> Result<Json<PromptResponse>, (StatusCode, String)> {
    let attributes = form
        .into_attributes()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let missing = attributes.missing_required();
    if !missing.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Missing required fields: {}", missing.join(", ")),
        ));
    }

    info!("Built prompt preview");
    Ok(Json(PromptResponse {
        prompt: build_prompt(&attributes),
    }))
}
