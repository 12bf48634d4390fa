use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkiAreaError {
    #[error("Invalid lift type '{code}': {reason}")]
    InvalidLiftType { code: String, reason: String },

    #[error("Unknown lift type: {code}")]
    UnknownLiftType { code: String },

    #[error("Unknown lift: {name}")]
    UnknownLift { name: String },

    #[error("Unknown slope: {name}")]
    UnknownSlope { name: String },

    #[error("Unknown parking: {name}")]
    UnknownParking { name: String },

    #[error("Parking '{parking}' serves no lift capacity")]
    NoServedCapacity { parking: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error on line {line}: field '{field}' has invalid value '{value}'")]
    ParseError {
        line: usize,
        field: String,
        value: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SkiAreaError {
    /// True for references to a name that is not registered.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            SkiAreaError::UnknownLiftType { .. }
                | SkiAreaError::UnknownLift { .. }
                | SkiAreaError::UnknownSlope { .. }
                | SkiAreaError::UnknownParking { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SkiAreaError>;
