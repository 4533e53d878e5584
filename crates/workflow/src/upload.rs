//! Single-shot document upload and grading.

use growlaw_client::DocumentApi;
use growlaw_model::{DocumentGrade, DocumentUpload};

/// Analysis type tag sent with every upload.
pub const ANALYSIS_TYPE: &str = "comprehensive";

const NO_FILE_MESSAGE: &str = "Please select a file to upload";
const UPLOAD_FALLBACK: &str = "Failed to analyze document";

/// Upload form state: choose a file, submit, read the grade.
///
/// One opaque pending-to-settled transition per submission; no retry, no
/// partial progress.
pub struct UploadWorkflow<D> {
    api: D,
    file: Option<(String, Vec<u8>)>,
    grade: Option<DocumentGrade>,
    error: Option<String>,
}

impl<D: DocumentApi> UploadWorkflow<D> {
    pub fn new(api: D) -> Self {
        Self {
            api,
            file: None,
            grade: None,
            error: None,
        }
    }

    /// Stage a file, clearing any prior result or error.
    pub fn choose(&mut self, file_name: impl Into<String>, bytes: Vec<u8>) {
        self.file = Some((file_name.into(), bytes));
        self.grade = None;
        self.error = None;
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn grade(&self) -> Option<&DocumentGrade> {
        self.grade.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Send the staged file for grading.
    ///
    /// With no file staged this is a validation error and no request is
    /// issued.
    pub async fn submit(&mut self) {
        let Some((file_name, bytes)) = &self.file else {
            self.error = Some(NO_FILE_MESSAGE.to_string());
            return;
        };
        self.error = None;

        let upload = DocumentUpload {
            file_name: file_name.clone(),
            bytes: bytes.clone(),
            analysis_type: Some(ANALYSIS_TYPE.to_string()),
        };

        match self.api.analyze_document(upload).await {
            Ok(grade) => self.grade = Some(grade),
            Err(err) => self.error = Some(err.user_message(UPLOAD_FALLBACK)),
        }
    }

    /// Clear file, result, and error.
    pub fn reset(&mut self) {
        self.file = None;
        self.grade = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growlaw_client::ApiError;
    use growlaw_model::GradeBreakdown;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeDocuments {
        responses: Mutex<VecDeque<Result<DocumentGrade, ApiError>>>,
        calls: AtomicUsize,
    }

    impl FakeDocuments {
        fn with(responses: Vec<Result<DocumentGrade, ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DocumentApi for &FakeDocuments {
        async fn analyze_document(
            &self,
            _upload: DocumentUpload,
        ) -> Result<DocumentGrade, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected upload")
        }

        async fn analysis_history(&self) -> Result<Vec<DocumentGrade>, ApiError> {
            unreachable!("history not used by this workflow")
        }

        async fn analysis_by_id(&self, _id: &str) -> Result<DocumentGrade, ApiError> {
            unreachable!("lookup not used by this workflow")
        }
    }

    fn grade(score: u8) -> DocumentGrade {
        DocumentGrade {
            id: "doc-1".to_string(),
            score,
            feedback: "Clear and well structured.".to_string(),
            suggestions: vec!["Tighten the conclusion".to_string()],
            analysis: GradeBreakdown {
                structure: 80,
                content: 75,
                legal_accuracy: 90,
                clarity: 85,
            },
            timestamp: "2025-05-01T12:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_without_file_issues_no_request() {
        let api = FakeDocuments::with(vec![]);
        let mut flow = UploadWorkflow::new(&api);
        flow.submit().await;
        assert_eq!(flow.error(), Some("Please select a file to upload"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_upload_stores_the_grade() {
        let api = FakeDocuments::with(vec![Ok(grade(82))]);
        let mut flow = UploadWorkflow::new(&api);
        flow.choose("contract.pdf", b"%PDF-1.4".to_vec());
        flow.submit().await;

        assert_eq!(flow.grade().unwrap().score, 82);
        assert_eq!(flow.error(), None);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_upload_prefers_server_message() {
        let api = FakeDocuments::with(vec![Err(ApiError::Server {
            status: 415,
            message: "Unsupported file type".to_string(),
        })]);
        let mut flow = UploadWorkflow::new(&api);
        flow.choose("notes.xyz", vec![0u8; 4]);
        flow.submit().await;
        assert_eq!(flow.error(), Some("Unsupported file type"));
        assert!(flow.grade().is_none());
    }

    #[tokio::test]
    async fn choosing_a_file_clears_prior_outcome() {
        let api = FakeDocuments::with(vec![Ok(grade(82))]);
        let mut flow = UploadWorkflow::new(&api);
        flow.choose("contract.pdf", b"%PDF-1.4".to_vec());
        flow.submit().await;
        assert!(flow.grade().is_some());

        flow.choose("brief.docx", vec![1, 2, 3]);
        assert!(flow.grade().is_none());
        assert_eq!(flow.error(), None);
        assert_eq!(flow.file_name(), Some("brief.docx"));
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let api = FakeDocuments::with(vec![Ok(grade(82))]);
        let mut flow = UploadWorkflow::new(&api);
        flow.choose("contract.pdf", b"%PDF-1.4".to_vec());
        flow.submit().await;

        flow.reset();
        assert!(flow.file_name().is_none());
        assert!(flow.grade().is_none());
        assert_eq!(flow.error(), None);
    }
}
