/// NDEF MIME media types understood by the dispatcher.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MimeType {
    /// `application/vnd.openprinttag`
    OpenPrintTag,
    /// `application/json`, decoded as OpenSpool
    OpenSpool,
    Unsupported,
}

impl MimeType {
    pub const OPENPRINTTAG: &'static str = "application/vnd.openprinttag";
    pub const OPENSPOOL: &'static str = "application/json";

    pub fn from_type(mime_type: &str) -> Self {
        match mime_type {
            Self::OPENPRINTTAG => MimeType::OpenPrintTag,
            Self::OPENSPOOL => MimeType::OpenSpool,
            _ => MimeType::Unsupported,
        }
    }

    pub fn format_name(&self) -> &'static str {
        match self {
            MimeType::OpenPrintTag => "OpenPrintTag",
            MimeType::OpenSpool => "OpenSpool",
            MimeType::Unsupported => "unsupported",
        }
    }
}

impl core::fmt::Display for MimeType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MimeType::OpenPrintTag => f.write_str(Self::OPENPRINTTAG),
            MimeType::OpenSpool => f.write_str(Self::OPENSPOOL),
            MimeType::Unsupported => f.write_str("unsupported"),
        }
    }
}
