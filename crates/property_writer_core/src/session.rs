//! crates/property_writer_core/src/session.rs
//!
//! The per-user state behind the form: what has been typed, the current
//! description, the API key, and whether a request is in flight.

use crate::domain::{Credential, DescriptionExport, PropertyAttributes};
use crate::ports::{
    CompletionError, CompletionService, REGENERATE_TEMPERATURE, STANDARD_TEMPERATURE,
};
use crate::prompt::build_prompt;

pub const DOWNLOAD_FILE_NAME: &str = "property_description.txt";
pub const DOWNLOAD_MIME_TYPE: &str = "text/plain";

//=========================================================================================
// Errors
//=========================================================================================

/// A generation was requested before its preconditions were met.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your API key in the settings before generating a description.")]
    MissingCredential,
    #[error("Please fill in at least the following fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),
    #[error("There is no description to regenerate yet.")]
    NothingToRegenerate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("A description is already being generated.")]
    Busy,
}

//=========================================================================================
// Generation requests
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Generate,
    Regenerate,
}

impl GenerationKind {
    pub fn temperature(self) -> f64 {
        match self {
            GenerationKind::Generate => STANDARD_TEMPERATURE,
            GenerationKind::Regenerate => REGENERATE_TEMPERATURE,
        }
    }
}

/// Everything needed to call the completion endpoint, captured when the
/// session becomes busy.
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    kind: GenerationKind,
    prompt: String,
    credential: Credential,
}

impl PendingGeneration {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn temperature(&self) -> f64 {
        self.kind.temperature()
    }
}

//=========================================================================================
// WriterSession
//=========================================================================================

#[derive(Debug, Default)]
pub struct WriterSession {
    pub attributes: PropertyAttributes,
    description: String,
    credential: Option<Credential>,
    busy: bool,
    last_error: Option<SessionError>,
}

impl WriterSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the API key. A blank key removes it.
    pub fn set_credential(&mut self, raw: impl Into<String>) {
        self.credential = Credential::new(raw);
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Whether the page should offer Generate. Required fields only arrive
    /// with the submitted form, so `begin_generation` checks those.
    pub fn can_generate(&self) -> bool {
        !self.busy && self.has_credential()
    }

    pub fn can_regenerate(&self) -> bool {
        self.can_generate() && !self.description.is_empty()
    }

    /// Checks preconditions and marks the session busy.
    ///
    /// Validation failures are recorded as the last error and leave the
    /// description alone. A busy session rejects the request without touching
    /// the last error, since the outstanding request will set it.
    pub fn begin_generation(
        &mut self,
        kind: GenerationKind,
    ) -> Result<PendingGeneration, SessionError> {
        if self.busy {
            return Err(SessionError::Busy);
        }
        let pending = self.validate(kind).map_err(|e| {
            let err = SessionError::from(e);
            self.last_error = Some(err.clone());
            err
        })?;
        self.busy = true;
        Ok(pending)
    }

    fn validate(&self, kind: GenerationKind) -> Result<PendingGeneration, ValidationError> {
        let credential = self
            .credential
            .clone()
            .ok_or(ValidationError::MissingCredential)?;
        let missing = self.attributes.missing_required();
        if !missing.is_empty() {
            return Err(ValidationError::MissingRequiredFields(missing));
        }
        if kind == GenerationKind::Regenerate && self.description.is_empty() {
            return Err(ValidationError::NothingToRegenerate);
        }
        Ok(PendingGeneration {
            kind,
            prompt: build_prompt(&self.attributes),
            credential,
        })
    }

    /// Applies the outcome of a request started with `begin_generation`.
    pub fn finish_generation(
        &mut self,
        result: Result<String, CompletionError>,
    ) -> Result<(), SessionError> {
        self.busy = false;
        match result {
            Ok(text) => {
                self.description = text;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                let err = SessionError::from(e);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Releases the busy flag of a request whose outcome will never arrive.
    /// The description and last error are left as they were.
    pub fn abandon_generation(&mut self) {
        self.busy = false;
    }

    /// Runs a whole generation against `service`.
    pub async fn generate(
        &mut self,
        service: &dyn CompletionService,
        kind: GenerationKind,
    ) -> Result<(), SessionError> {
        let pending = self.begin_generation(kind)?;
        let result = service
            .request_completion(pending.prompt(), pending.credential(), pending.temperature())
            .await;
        self.finish_generation(result)
    }

    /// Overwrites the description with user-edited text.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    pub fn clear(&mut self) {
        self.description.clear();
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn copy_text(&self) -> &str {
        &self.description
    }

    pub fn download(&self) -> DescriptionExport {
        DescriptionExport {
            file_name: DOWNLOAD_FILE_NAME,
            mime_type: DOWNLOAD_MIME_TYPE,
            content: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credential;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call and answers with a fixed result.
    struct StubCompletion {
        reply: Result<String, CompletionError>,
        calls: Mutex<Vec<(String, String, f64)>>,
    }

    impl StubCompletion {
        fn replying(reply: Result<String, CompletionError>) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String, f64)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionService for StubCompletion {
        async fn request_completion(
            &self,
            prompt: &str,
            credential: &Credential,
            temperature: f64,
        ) -> Result<String, CompletionError> {
            self.calls.lock().unwrap().push((
                prompt.to_string(),
                credential.expose().to_string(),
                temperature,
            ));
            self.reply.clone()
        }
    }

    fn ready_session() -> WriterSession {
        let mut session = WriterSession::new();
        session.set_credential("gsk_test");
        session.attributes.location = "Near Highway".to_string();
        session.attributes.area = "1000".to_string();
        session
    }

    #[tokio::test]
    async fn generate_replaces_description_on_success() {
        let stub = StubCompletion::replying(Ok("Sample description text.".to_string()));
        let mut session = ready_session();

        session.generate(&stub, GenerationKind::Generate).await.unwrap();

        assert_eq!(session.description(), "Sample description text.");
        assert!(session.last_error().is_none());
        assert!(!session.is_busy());
        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "gsk_test");
        assert_eq!(calls[0].2, STANDARD_TEMPERATURE);
    }

    #[tokio::test]
    async fn blank_required_fields_never_reach_the_endpoint() {
        let stub = StubCompletion::replying(Ok("unused".to_string()));
        for (location, area) in [("", "1000"), ("Near Highway", ""), ("", "")] {
            let mut session = ready_session();
            session.attributes.location = location.to_string();
            session.attributes.area = area.to_string();
            session.edit("keep me");

            let err = session.generate(&stub, GenerationKind::Generate).await.unwrap_err();

            assert!(matches!(
                err,
                SessionError::Validation(ValidationError::MissingRequiredFields(_))
            ));
            assert_eq!(session.description(), "keep me");
            assert!(!session.is_busy());
        }
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_credential_is_reported() {
        let stub = StubCompletion::replying(Ok("unused".to_string()));
        let mut session = ready_session();
        session.set_credential("   ");

        let err = session.generate(&stub, GenerationKind::Generate).await.unwrap_err();

        assert_eq!(err, SessionError::Validation(ValidationError::MissingCredential));
        assert_eq!(session.last_error(), Some(&err));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_completion_keeps_previous_description() {
        let stub = StubCompletion::replying(Err(CompletionError::Status {
            status: 401,
            body: "invalid api key".to_string(),
        }));
        let mut session = ready_session();
        session.edit("Earlier text");

        let err = session.generate(&stub, GenerationKind::Generate).await.unwrap_err();

        assert_eq!(session.description(), "Earlier text");
        assert!(err.to_string().contains("401"));
        assert!(session.last_error().unwrap().to_string().contains("invalid api key"));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn regenerate_uses_higher_temperature_with_same_prompt() {
        let stub = StubCompletion::replying(Ok("Another take.".to_string()));
        let mut session = ready_session();

        session.generate(&stub, GenerationKind::Generate).await.unwrap();
        assert!(session.can_regenerate());
        session.generate(&stub, GenerationKind::Regenerate).await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, calls[1].0);
        assert_eq!(calls[0].2, 0.7);
        assert_eq!(calls[1].2, 0.9);
    }

    #[tokio::test]
    async fn regenerate_needs_an_existing_description() {
        let stub = StubCompletion::replying(Ok("unused".to_string()));
        let mut session = ready_session();
        assert!(session.can_generate());
        assert!(!session.can_regenerate());

        let err = session.generate(&stub, GenerationKind::Regenerate).await.unwrap_err();

        assert_eq!(err, SessionError::Validation(ValidationError::NothingToRegenerate));
        assert!(stub.calls().is_empty());
    }

    #[test]
    fn busy_session_rejects_a_second_request() {
        let mut session = ready_session();
        let pending = session.begin_generation(GenerationKind::Generate).unwrap();
        assert!(session.is_busy());
        assert!(!session.can_generate());
        assert_eq!(pending.temperature(), STANDARD_TEMPERATURE);

        assert_eq!(
            session.begin_generation(GenerationKind::Generate).unwrap_err(),
            SessionError::Busy
        );

        session.finish_generation(Ok("done".to_string())).unwrap();
        assert!(!session.is_busy());
        assert_eq!(session.description(), "done");
    }

    #[test]
    fn abandoned_request_frees_the_session_and_keeps_state() {
        let mut session = ready_session();
        session.edit("Earlier text");
        session.begin_generation(GenerationKind::Regenerate).unwrap();

        session.abandon_generation();

        assert!(!session.is_busy());
        assert!(session.can_generate());
        assert_eq!(session.description(), "Earlier text");
        assert!(session.last_error().is_none());
        assert!(session.begin_generation(GenerationKind::Generate).is_ok());
    }

    #[test]
    fn offered_actions_follow_key_busy_and_description() {
        let mut session = WriterSession::new();
        assert!(!session.can_generate());

        session.set_credential("gsk_test");
        assert!(session.can_generate());
        assert!(!session.can_regenerate());

        session.edit("Some text");
        assert!(session.can_regenerate());

        session.attributes.location = "Near Highway".to_string();
        session.attributes.area = "1000".to_string();
        session.begin_generation(GenerationKind::Generate).unwrap();
        assert!(!session.can_generate());
        assert!(!session.can_regenerate());
    }

    #[test]
    fn edit_clear_copy_and_download_see_the_same_text() {
        let mut session = WriterSession::new();
        let text = "Line one\r\n  indented ₹ line\n";
        session.edit(text);
        assert_eq!(session.description(), text);
        assert_eq!(session.copy_text(), text);

        let export = session.download();
        assert_eq!(export.content.as_bytes(), text.as_bytes());
        assert_eq!(export.file_name, "property_description.txt");
        assert_eq!(export.mime_type, "text/plain");

        session.clear();
        assert_eq!(session.description(), "");
        assert_eq!(session.download().content, "");
    }

    #[test]
    fn dismissing_clears_the_error_only() {
        let mut session = ready_session();
        session.edit("text");
        session.set_credential("");
        assert!(session.begin_generation(GenerationKind::Generate).is_err());
        assert!(session.last_error().is_some());

        session.dismiss_error();

        assert!(session.last_error().is_none());
        assert_eq!(session.description(), "text");
    }
}
