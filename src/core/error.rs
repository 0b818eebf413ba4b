use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationInvalidArgument,

    DocumentNotFound,
    DocumentInvalidJson,
    DocumentNeverSaved,

    FilenamePrefixInvalid,

    SaveFailed,
    ExportFailed,

    ConfigInvalidJson,
    ConfigInvalidValue,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::DocumentNotFound => "document.not_found",
            ErrorCode::DocumentInvalidJson => "document.invalid_json",
            ErrorCode::DocumentNeverSaved => "document.never_saved",

            ErrorCode::FilenamePrefixInvalid => "filename.prefix_invalid",

            ErrorCode::SaveFailed => "save.failed",
            ErrorCode::ExportFailed => "export.failed",

            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNotFoundDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilenamePrefixInvalidDetails {
    pub file_name: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFailedDetails {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn document_not_found(path: impl Into<String>) -> Self {
        let details = serde_json::to_value(DocumentNotFoundDetails { path: path.into() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::DocumentNotFound, "No design document found", details)
            .with_hint("Pass the path to a design document JSON file")
    }

    pub fn document_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = serde_json::to_value(DocumentInvalidJsonDetails {
            path: path.into(),
            error: err.to_string(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::DocumentInvalidJson,
            "Design document is not valid JSON",
            details,
        )
    }

    pub fn document_never_saved(file_name: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::DocumentNeverSaved,
            "Document has never been saved; no version to base tags on",
            serde_json::json!({ "fileName": file_name.into() }),
        )
        .with_hint("Save the document once before running a versioning pass")
    }

    pub fn filename_prefix_invalid(
        file_name: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(FilenamePrefixInvalidDetails {
            file_name: file_name.into(),
            problem: problem.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::FilenamePrefixInvalid,
            "Filename too short to extract a matching prefix",
            details,
        )
    }

    pub fn save_failed(file_name: impl Into<String>, error: impl Into<String>) -> Self {
        let details = serde_json::to_value(SaveFailedDetails {
            file_name: file_name.into(),
            error: error.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::SaveFailed, "Failed to save document", details)
            .with_hint("Applied renames are kept; re-run to retry the save")
            .with_retryable(true)
    }

    pub fn export_failed(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExportFailed,
            "Failed to export document",
            serde_json::json!({ "error": error.into() }),
        )
        .with_retryable(true)
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = serde_json::json!({
            "path": path.into(),
            "error": err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            details,
        )
    }

    pub fn config_invalid_value(key: impl Into<String>, problem: impl Into<String>) -> Self {
        let details = serde_json::json!({
            "key": key.into(),
            "problem": problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": error.into(),
            "context": context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }
}
