/// Outcome codes reported to the host firmware.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    Ok = 0,
    GenericError = -1,
    ParameterError = -2,
    NotFound = -3,
    NoSupportedFormat = -4,
}

impl From<Status> for i32 {
    fn from(value: Status) -> Self {
        value as i32
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Status::Ok => f.write_str("OK"),
            Status::GenericError => f.write_str("GENERIC_ERROR"),
            Status::ParameterError => f.write_str("PARAMETER_ERROR"),
            Status::NotFound => f.write_str("NOT_FOUND"),
            Status::NoSupportedFormat => f.write_str("NO_SUPPORTED_FORMAT"),
        }
    }
}
