//! Error types.
//!
//! - `EngineError`: recoverable failures of the pure engine (sweeps, models, export).
//! - `AppError`: what the binary reports, carrying the process exit code.

/// Failures raised by the sweep/model/dataset/export engine.
///
/// None of these are fatal: the presentation layer reports them and asks for a
/// corrected configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Sweep bounds are malformed (`max < min`, `step <= 0`, non-finite, too many points).
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A model was evaluated outside its domain or with out-of-range parameters.
    #[error("Domain error: {0}")]
    Domain(String),

    /// A dataset could not be encoded to (or decoded from) delimited text.
    #[error("Format error: {0}")]
    Format(String),
}

impl EngineError {
    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange(message.into())
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let exit_code = match err {
            EngineError::InvalidRange(_) | EngineError::Domain(_) => 2,
            EngineError::Format(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_exit_codes() {
        let app: AppError = EngineError::invalid_range("max < min").into();
        assert_eq!(app.exit_code(), 2);
        assert_eq!(app.to_string(), "Invalid range: max < min");

        let app: AppError = EngineError::domain("negative concentration").into();
        assert_eq!(app.exit_code(), 2);

        let app: AppError = EngineError::format("bad header").into();
        assert_eq!(app.exit_code(), 4);
    }
}
