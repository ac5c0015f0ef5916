use thiserror::Error;

/// Run-level failure carrying the process exit code.
///
/// Exit codes: 2 = input/config/load error, 4 = output failure.
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

/// Failure of a single insight (or its chart).
///
/// These never abort the run; the pipeline records them in the insight's slot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightError {
    #[error("missing column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: invalid `Data_Order` value '{value}' (expected DD/MM/YYYY)")]
    DateParse { line: usize, value: String },

    #[error("line {line}: missing `Data_Order` value")]
    MissingDate { line: usize },

    #[error("no matching rows: {0}")]
    NoMatchingRows(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

impl From<InsightError> for AppError {
    fn from(value: InsightError) -> Self {
        AppError::new(2, value.to_string())
    }
}
