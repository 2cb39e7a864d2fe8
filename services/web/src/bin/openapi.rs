//! services/web/src/bin/openapi.rs
//!
//! Writes the OpenAPI document for the JSON routes to disk.
//!
//! Usage: `openapi [OUTPUT]` (defaults to `openapi.json`).

use utoipa::OpenApi;
use web_lib::web::rest::ApiDoc;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&output, spec_json)?;
    println!("OpenAPI specification written to {}", output);
    Ok(())
}
