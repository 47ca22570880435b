use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecifyError {
    #[error("no template release found: {0}")]
    TemplateNotFound(String),

    #[error("template download failed: {0}")]
    DownloadFailed(String),

    #[error("cannot read archive: {0}")]
    ArchiveUnreadable(String),

    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("failed to write project files: {0}")]
    MaterializationFailed(String),

    #[error("git initialization failed: {0}")]
    VersionControlFailed(String),

    #[error("directory '{0}' already exists")]
    DestinationExists(String),

    #[error("{tool} is required for {assistant} projects. Install: {hint}")]
    AgentToolMissing {
        tool: String,
        assistant: String,
        hint: String,
    },

    #[error("unknown AI assistant '{0}': choose from claude, gemini, copilot")]
    UnknownAssistant(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpecifyError>;
