/*!
Decoder for OpenSpool payloads, a JSON object carried in an
`application/json` record.

```json
{"protocol":"openspool","version":"1.0","type":"PLA","color_hex":"#FFAABB","brand":"Generic","min_temp":"220","max_temp":"240"}
```
*/

use super::*;
use serde_json::{Map, Value};

const PROTOCOL: &str = "openspool";
const DEFAULT_VENDOR: &str = "Generic";
const DEFAULT_COLOR: u32 = 0xFFFFFF;

/// OpenSpool only describes 1.75 mm filament.
const DIAMETER: u32 = 175;

pub fn decode(payload: &[u8]) -> Result<FilamentDescriptor, Error> {
    let text = core::str::from_utf8(payload)?;
    debug!("OpenSpool JSON payload: {text}");

    let Value::Object(data) = serde_json::from_str(text)? else {
        return Err(Error::Format("OpenSpool payload is not a JSON object"));
    };
    if data.get("protocol").and_then(Value::as_str) != Some(PROTOCOL) {
        return Err(Error::Format("OpenSpool protocol is not 'openspool'"));
    }

    let mut b = FilamentDescriptor::builder();
    b.vendor(str_field(&data, "brand")?.unwrap_or(DEFAULT_VENDOR))
        .main_type(
            str_field(&data, "type")?
                .map_or(MaterialType::Reserved, |t| {
                    MaterialType::from_name(&t.to_uppercase())
                }),
        )
        .sub_type(SubType::Reserved)
        .add_color(color(str_field(&data, "color_hex")?), 0xFF)
        .diameter(DIAMETER);

    match (json_int(&data, "min_temp"), json_int(&data, "max_temp")) {
        (Some(min), Some(max)) => {
            b.hotend_temps(min, max);
        }
        _ => debug!("Ignoring invalid OpenSpool hotend temperatures"),
    }
    match (json_int(&data, "bed_min_temp"), json_int(&data, "bed_max_temp")) {
        (Some(min), Some(max)) => {
            b.bed_temp(if min > 0 { min } else { max });
        }
        _ => debug!("Ignoring invalid OpenSpool bed temperatures"),
    }

    Ok(b.build())
}

/// An optional string field, where `null` counts as absent. Any other JSON
/// type is an error.
fn str_field<'a>(data: &'a Map<String, Value>, key: &'static str) -> Result<Option<&'a str>, Error> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(v) => Err(Error::InvalidField {
            field: key,
            source: format!("expected a string, found {v}").into(),
        }),
    }
}

/// `RRGGBB` with an optional leading `#`. Anything unparseable is white.
fn color(hex: Option<&str>) -> u32 {
    let Some(hex) = hex else {
        return DEFAULT_COLOR;
    };
    let digits = hex.strip_prefix('#').unwrap_or(hex).trim();
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) if rgb <= 0xFFFFFF => rgb,
        _ => {
            debug!("Ignoring invalid OpenSpool color '{hex}'");
            DEFAULT_COLOR
        }
    }
}

/// A temperature given as a JSON number or a decimal string.
///
/// Absent fields are 0. Returns `None` for values that are not integers,
/// after truncating any fractional part of a number.
fn json_int(data: &Map<String, Value>, key: &str) -> Option<i32> {
    let Some(value) = data.get(key) else {
        return Some(0);
    };
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(v) => i32::try_from(v).ok(),
            None => n
                .as_f64()
                .map(f64::trunc)
                .filter(|f| (i32::MIN as f64..=i32::MAX as f64).contains(f))
                .map(|f| f as i32),
        },
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(*b as i32),
        _ => None,
    }
}
