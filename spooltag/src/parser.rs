use super::*;

/// Lines of input shown in the debug hex dump.
const DUMP_LINES: usize = 16;

/// Decodes raw tag dumps into a [`FilamentDescriptor`].
///
/// The NDEF records are tried in the order they appear on the tag, and the
/// first one that decodes wins. Records in an unsupported format are skipped,
/// and a record that fails to decode is logged before moving on to the next.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: Config,
    card_uid: Vec<u8>,
}

impl Parser {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            card_uid: Vec::new(),
        }
    }

    /// The UID of the card the dump was read from, copied into the descriptor.
    pub fn with_card_uid(mut self, card_uid: impl Into<Vec<u8>>) -> Self {
        self.card_uid = card_uid.into();
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parse(&self, data: &[u8]) -> Result<FilamentDescriptor, Error> {
        if self.config.dump_input && enabled!(Level::DEBUG) {
            debug!(
                "NDEF tag data ({} bytes):\n{}",
                data.len(),
                hexdump::xxd(data, DUMP_LINES)
            );
        }

        let records = ndef::parse_with_config(data, &self.config)
            .inspect_err(|e| error!("NDEF parse failed: {e}"))?;

        for (index, record) in records.iter().enumerate() {
            let mime = record.mime();
            let decode: fn(&[u8], &Config) -> Result<FilamentDescriptor, Error> = match mime {
                MimeType::OpenPrintTag => openprinttag::decode_with_config,
                MimeType::OpenSpool => |payload, _| openspool::decode(payload),
                MimeType::Unsupported => {
                    warn!("Skipping unsupported MIME type '{}'", record.mime_type);
                    continue;
                }
            };

            info!(
                "Detected {} format in record {index}, parsing payload ({} bytes)",
                mime.format_name(),
                record.payload.len()
            );
            let result = decode(&record.payload, &self.config);

            match result {
                Ok(descriptor) => {
                    info!(
                        "{} parse success: vendor={}, type={}",
                        mime.format_name(),
                        descriptor.vendor,
                        descriptor.main_type
                    );
                    return Ok(FilamentDescriptor {
                        card_uid: self.card_uid.clone(),
                        ..descriptor
                    });
                }
                Err(e) => error!(
                    "{} parse failed for record {index}: {e}",
                    mime.format_name()
                ),
            }
        }

        error!(
            "No supported records found (expected '{}' or '{}')",
            MimeType::OpenPrintTag,
            MimeType::OpenSpool
        );
        Err(Error::NoSupportedFormat)
    }
}
