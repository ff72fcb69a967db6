/// Tunables for [`Parser`](super::Parser).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Maximum array/map nesting accepted in CBOR payloads.
    pub max_depth: usize,

    /// Number of leading bytes searched for the capability container when
    /// the dump does not start with one.
    pub cc_scan_window: usize,

    /// Log a hex dump of the input at debug level.
    pub dump_input: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: spooltag_cbor::decode::DEFAULT_MAX_DEPTH,
            cc_scan_window: 16,
            dump_input: true,
        }
    }
}
