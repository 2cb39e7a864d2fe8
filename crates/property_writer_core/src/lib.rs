pub mod catalog;
pub mod domain;
pub mod ports;
pub mod prompt;
pub mod session;

pub use catalog::{FieldId, FieldKind, FieldSpec, FORM_FIELDS};
pub use domain::{
    AreaUnit, Credential, DescriptionExport, Facing, LegalStatus, PropertyAttributes,
    PropertyType, UnknownOption,
};
pub use ports::{
    CompletionError, CompletionResult, CompletionService, REGENERATE_TEMPERATURE,
    STANDARD_TEMPERATURE,
};
pub use prompt::build_prompt;
pub use session::{GenerationKind, PendingGeneration, SessionError, ValidationError, WriterSession};
