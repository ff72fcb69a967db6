/*!
Extraction of NDEF records from NFC Forum Type 2 Tag memory.

The data area starts with a 4 byte capability container, followed by a
sequence of TLV blocks. NDEF message blocks are split into records, and only
MIME media records are returned.
*/

use super::*;

const CC_MAGIC: u8 = 0xE1;
const CC_VERSIONS: [u8; 3] = [0x10, 0x11, 0x40];
const CC_LEN: usize = 4;

const TLV_NDEF_MESSAGE: u8 = 0x03;
const TLV_TERMINATOR: u8 = 0xFE;
const TLV_EXTENDED_LENGTH: u8 = 0xFF;

const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;
const TNF_MIME_MEDIA: u8 = 0x02;

/// A MIME media record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The record type, with any non-ASCII bytes dropped.
    pub mime_type: String,
    pub payload: Vec<u8>,
}

impl Record {
    pub fn mime(&self) -> MimeType {
        MimeType::from_type(&self.mime_type)
    }
}

/// Extract the MIME media records from a tag dump, using the default [`Config`].
pub fn parse(data: &[u8]) -> Result<Vec<Record>, Error> {
    parse_with_config(data, &Config::default())
}

/// Extract the MIME media records from a tag dump, in order of appearance.
///
/// Fails with [`Error::Parameter`] when no capability container can be found,
/// and with [`Error::NotFound`] when the walk yields no records. Truncated
/// blocks and records end the walk early without error.
pub fn parse_with_config(data: &[u8], config: &Config) -> Result<Vec<Record>, Error> {
    let start = find_capability_container(data, config.cc_scan_window);
    let cc = data
        .get(start..start + CC_LEN)
        .filter(|cc| cc[0] == CC_MAGIC)
        .ok_or(Error::Parameter("missing capability container"))?;

    debug!(
        "Capability container at offset {start}: version {:#04x}, data area {} bytes, access {:#04x}",
        cc[1],
        cc[2] as usize * 8,
        cc[3]
    );

    let mut records = Vec::new();
    for tlv in Tlvs::new(&data[start + CC_LEN..]) {
        if tlv.tag == TLV_NDEF_MESSAGE {
            parse_message(tlv.value, &mut records);
        } else {
            trace!("Skipping TLV {:#04x} ({} bytes)", tlv.tag, tlv.value.len());
        }
    }

    if records.is_empty() {
        Err(Error::NotFound)
    } else {
        Ok(records)
    }
}

/// Tags are sometimes read with leading UID or padding bytes.
fn find_capability_container(data: &[u8], window: usize) -> usize {
    if data.first() == Some(&CC_MAGIC) {
        return 0;
    }
    (0..window.min(data.len().saturating_sub(CC_LEN)))
        .find(|&i| data[i] == CC_MAGIC && CC_VERSIONS.contains(&data[i + 1]))
        .unwrap_or(0)
}

struct Tlv<'a> {
    tag: u8,
    value: &'a [u8],
}

/// Iterates TLV blocks until the terminator or the end of the data.
///
/// A declared length is clamped to the bytes remaining, so the last block may
/// be short.
struct Tlvs<'a> {
    data: &'a [u8],
}

impl<'a> Tlvs<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for Tlvs<'a> {
    type Item = Tlv<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.data;
        let [tag, len, rest @ ..] = data else {
            self.data = &[];
            return None;
        };
        if *tag == TLV_TERMINATOR {
            self.data = &[];
            return None;
        }

        let (len, rest) = if *len == TLV_EXTENDED_LENGTH {
            let [hi, lo, rest @ ..] = rest else {
                self.data = &[];
                return None;
            };
            (u16::from_be_bytes([*hi, *lo]) as usize, rest)
        } else {
            (*len as usize, rest)
        };

        let (value, rest) = rest.split_at(len.min(rest.len()));
        self.data = rest;
        Some(Tlv { tag: *tag, value })
    }
}

fn parse_message(mut message: &[u8], records: &mut Vec<Record>) {
    while message.len() > 2 {
        let mut reader = Reader(message);
        let Some((tnf, record)) = parse_record(&mut reader) else {
            trace!("Truncated NDEF record, {} bytes remaining", message.len());
            break;
        };
        message = reader.0;

        if tnf == TNF_MIME_MEDIA {
            info!(
                "NDEF record found: mime_type='{}', payload_len={}",
                record.mime_type,
                record.payload.len()
            );
            records.push(record);
        } else {
            trace!("Ignoring NDEF record with TNF {tnf}");
        }
    }
}

fn parse_record(reader: &mut Reader<'_>) -> Option<(u8, Record)> {
    let header = reader.u8()?;
    let type_len = reader.u8()? as usize;
    let payload_len = if header & FLAG_SR != 0 {
        reader.u8()? as usize
    } else {
        reader.u32()? as usize
    };
    let id_len = if header & FLAG_IL != 0 {
        reader.u8()? as usize
    } else {
        0
    };

    let mime_type = reader
        .take(type_len)?
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect();
    reader.take(id_len)?;
    let payload = reader.take(payload_len)?.to_vec();

    Some((header & TNF_MASK, Record { mime_type, payload }))
}

struct Reader<'a>(&'a [u8]);

impl<'a> Reader<'a> {
    fn u8(&mut self) -> Option<u8> {
        let (b, rest) = self.0.split_first()?;
        self.0 = rest;
        Some(*b)
    }

    fn u32(&mut self) -> Option<u32> {
        let (b, rest) = self.0.split_first_chunk::<4>()?;
        self.0 = rest;
        Some(u32::from_be_bytes(*b))
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if len > self.0.len() {
            return None;
        }
        let (b, rest) = self.0.split_at(len);
        self.0 = rest;
        Some(b)
    }
}
