use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidValue {
        /// Name of the offending variable
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Environment variable holding an endpoint URL failed to parse.
    #[error("Invalid URL in environment variable {name}: {source}")]
    InvalidUrl {
        /// Name of the offending variable
        name: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },
}
