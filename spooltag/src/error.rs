/*!
The error type shared by the NDEF walker, the payload decoders and the
dispatcher.

Every variant maps onto one of the caller-visible [`Status`] codes via
[`Error::status`]. The CBOR, JSON, UTF-8 and per-field variants together form
the generic decode failure family and all report [`Status::GenericError`].
*/

use super::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input cannot be a tag dump at all, e.g. no capability container.
    #[error("Invalid parameter: {0}")]
    Parameter(&'static str),

    /// The container or payload is structurally wrong.
    #[error("Invalid format: {0}")]
    Format(&'static str),

    /// A declared length runs past the end of the available data.
    #[error("Truncated input, need at least {0} more bytes")]
    Truncated(usize),

    /// A CBOR length argument uses a reserved additional information value.
    #[error("Unsupported CBOR encoding, additional information {0}")]
    UnsupportedEncoding(u8),

    /// The capability container is valid but no NDEF record was found.
    #[error("No NDEF records found")]
    NotFound,

    /// NDEF records were found, but none could be decoded.
    #[error("No supported records found (expected '{}' or '{}')", MimeType::OpenPrintTag, MimeType::OpenSpool)]
    NoSupportedFormat,

    #[error(transparent)]
    InvalidCbor(cbor::decode::Error),

    #[error(transparent)]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidUtf8(#[from] core::str::Utf8Error),

    /// A field was present but could not be interpreted.
    #[error("Failed to parse {field}: {source}")]
    InvalidField {
        field: &'static str,
        source: Box<dyn core::error::Error + Send + Sync>,
    },
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Error::Parameter(_) => Status::ParameterError,
            Error::NotFound => Status::NotFound,
            Error::NoSupportedFormat => Status::NoSupportedFormat,
            Error::Format(_)
            | Error::Truncated(_)
            | Error::UnsupportedEncoding(_)
            | Error::InvalidCbor(_)
            | Error::InvalidJson(_)
            | Error::InvalidUtf8(_)
            | Error::InvalidField { .. } => Status::GenericError,
        }
    }
}

impl From<cbor::decode::Error> for Error {
    fn from(e: cbor::decode::Error) -> Self {
        match e {
            cbor::decode::Error::NeedMoreData(n) => Error::Truncated(n),
            cbor::decode::Error::InvalidMinorValue(v) => Error::UnsupportedEncoding(v),
            e => Error::InvalidCbor(e),
        }
    }
}

/// Attach the name of the field being decoded to an error.
pub trait CaptureFieldErr<T> {
    fn map_field_err(self, field: &'static str) -> Result<T, Error>;
}

impl<T, E: Into<Box<dyn core::error::Error + Send + Sync>>> CaptureFieldErr<T>
    for core::result::Result<T, E>
{
    fn map_field_err(self, field: &'static str) -> Result<T, Error> {
        self.map_err(|e| Error::InvalidField {
            field,
            source: e.into(),
        })
    }
}
