use thiserror::Error;

/// Errors raised by the collaborators below the batch orchestrator.
///
/// None of these cross the per-target boundary: detection errors are
/// replaced by the default source code and generation errors become an
/// `Error: ...` entry for the one target that failed.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The detection heuristic could not produce a language.
    #[error("language detection failed: {0}")]
    Detection(String),

    /// The model worker answered but reported a failed generation.
    #[error("generation failed: {0}")]
    Generation(String),

    /// The model worker answered with a non-success HTTP status.
    #[error("model service returned {status}: {body}")]
    ModelService { status: u16, body: String },

    /// Transport-level failure talking to the model worker (connect, timeout, decode).
    #[error("model service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid translation configuration detected at startup.
    #[error("invalid translation config: {0}")]
    Config(String),
}

pub type TranslateResult<T> = Result<T, TranslateError>;
