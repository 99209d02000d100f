use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] marketlens_core::ValidationError),

    #[error(transparent)]
    Core(#[from] marketlens_core::CoreError),

    #[error(transparent)]
    Prompt(#[from] marketlens_core::PromptError),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error(transparent)]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Core(_) => 2,
            Self::Prompt(_) => 2,
            Self::Chart(_) => 3,
            Self::Workbook(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
