use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enum-like column holds a value the application does not recognise.
    ///
    /// Occurs when a `plan`, `level` or message `role` column contains text that
    /// does not map onto a domain enum, which means the row was written outside
    /// the application. Results in a 500 Internal Server Error with a generic
    /// message returned to client.
    #[error("Unrecognised value '{value}' stored in column {column}")]
    UnknownStoredValue {
        /// Column that held the value
        column: &'static str,
        /// The raw stored value
        value: String,
    },
}
