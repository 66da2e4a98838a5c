pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Empty source file")]
    EmptySource,

    #[error("Source file has a header row but no data")]
    HeaderOnlySource,

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Unknown experience code: {0}")]
    UnknownExperienceCode(String),

    #[error("Filter expression must look like \"<field>: <value>\": {0}")]
    InvalidFilterSyntax(String),

    #[error("Filtering is not supported on field: {0}")]
    InvalidFilterField(String),

    #[error("Sorting is not supported on field: {0}")]
    InvalidSortField(String),

    #[error("Sort direction must be \"Да\" or \"Нет\": {0}")]
    InvalidSortDirection(String),

    #[error("Row range bounds must be positive integers: {0}")]
    InvalidRange(String),

    #[error("Unknown column in selection: {0}")]
    InvalidColumnField(String),

    #[error("No rows matched the filter")]
    NoRowsMatched,

    #[error("Malformed salary display value: {0}")]
    MalformedSalaryDisplay(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
