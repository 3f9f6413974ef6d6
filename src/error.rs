use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeatPlanError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported roster file: {0} (use .csv, .xlsx, .xlsm, .xls or .ods)")]
    UnsupportedInput(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet read error: {0}")]
    Spreadsheet(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("Excel generation error: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] seat_plan_common::Error),
}

impl From<calamine::Error> for SeatPlanError {
    fn from(e: calamine::Error) -> Self {
        SeatPlanError::Spreadsheet(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SeatPlanError>;
