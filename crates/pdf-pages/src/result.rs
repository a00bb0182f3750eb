use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Outcome of a successful operation.
///
/// Lists every file the operation produced. The crate never deletes these;
/// archiving and cleanup belong to the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OperationResult {
    success: bool,
    message: String,
    output_files: Vec<PathBuf>,
    details: Option<String>,
}

impl OperationResult {
    pub fn success(message: impl Into<String>, output_files: Vec<PathBuf>) -> Self {
        Self {
            success: true,
            message: message.into(),
            output_files,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn output_files(&self) -> &[PathBuf] {
        &self.output_files
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Whether the caller should bundle the outputs into one download
    pub fn has_multiple_outputs(&self) -> bool {
        self.output_files.len() > 1
    }
}
