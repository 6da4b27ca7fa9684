use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Row {row}: cannot parse {column} value '{value}'")]
    Format {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Unknown file format: {0}")]
    UnknownFormat(String),

    #[error("PDF files are not supported yet")]
    PdfUnsupported,

    #[error("No data loaded: {0}")]
    EmptyTable(String),

    #[error("Feature disabled in settings: {0}")]
    FeatureDisabled(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
