use std::fmt;

#[derive(Debug)]
pub enum PaifuError {
    /// Truncated or corrupt protobuf envelope. Only the record it came from is lost.
    MalformedEnvelope { message: String },
    /// The envelope tag names a record this crate does not know how to decode.
    UnknownTag { tag: String },
    /// A player input carried no usable seat and the fallback seat was used.
    MissingSeat { raw_seat: Option<u32> },
    /// The input document does not have the expected shape.
    InvalidInput { message: String },
    /// JSON / protobuf payload decoding failed.
    Serialization { message: String },
}

impl fmt::Display for PaifuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaifuError::MalformedEnvelope { message } => {
                write!(f, "Malformed envelope: {}", message)
            }
            PaifuError::UnknownTag { tag } => write!(f, "Unknown record tag '{}'", tag),
            PaifuError::MissingSeat { raw_seat: Some(seat) } => {
                write!(f, "Seat {} is out of range", seat)
            }
            PaifuError::MissingSeat { raw_seat: None } => write!(f, "Player input has no seat"),
            PaifuError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            PaifuError::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for PaifuError {}

pub type PaifuResult<T> = Result<T, PaifuError>;

impl From<prost::DecodeError> for PaifuError {
    fn from(err: prost::DecodeError) -> Self {
        PaifuError::MalformedEnvelope {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PaifuError {
    fn from(err: serde_json::Error) -> Self {
        PaifuError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "python")]
impl From<PaifuError> for pyo3::PyErr {
    fn from(err: PaifuError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
