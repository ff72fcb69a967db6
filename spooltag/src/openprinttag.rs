/*!
Decoder for OpenPrintTag payloads (`application/vnd.openprinttag`).

The payload starts with a CBOR meta map giving the offsets and sizes of the
main and auxiliary regions. The main region is a CBOR map of numeric field
keys, which is projected onto a [`FilamentDescriptor`].
*/

use super::*;
use cbor::value::{Map, Value};
use num_traits::NumCast;

const META_MAIN_OFFSET: u64 = 0;
const META_MAIN_SIZE: u64 = 1;
const META_AUX_OFFSET: u64 = 2;
const META_AUX_SIZE: u64 = 3;

const GTIN: u64 = 4;
const MATERIAL_TYPE: u64 = 9;
const BRAND_NAME: u64 = 11;
const MANUFACTURED_DATE: u64 = 14;
const FILAMENT_DIAMETER: u64 = 16;
const NOMINAL_WEIGHT: u64 = 18;
const COLORS: [(u64, &str); 4] = [
    (19, "primary_color"),
    (20, "secondary_color_0"),
    (21, "secondary_color_1"),
    (22, "secondary_color_2"),
];
const TAGS: u64 = 28;
const NOZZLE_TEMPERATURE: u64 = 34;
const BED_TEMPERATURE: u64 = 35;

/// Entry in the `tags` array marking a matte finish.
const TAG_MATTE: u64 = 16;

const DEFAULT_VENDOR: &str = "NONE";

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year][month][day]");

/// Decode a payload using the default [`Config`].
pub fn decode(payload: &[u8]) -> Result<FilamentDescriptor, Error> {
    decode_with_config(payload, &Config::default())
}

pub fn decode_with_config(payload: &[u8], config: &Config) -> Result<FilamentDescriptor, Error> {
    let (main, aux) = regions(payload, config)?;

    if !aux.is_empty() {
        match cbor::decode::decode_value_with_depth(aux, 0, config.max_depth) {
            Ok(Some((value, _))) => debug!("OpenPrintTag aux data: {value:?}"),
            Ok(None) => {}
            Err(e) => debug!("Ignoring undecodable OpenPrintTag aux region: {e}"),
        }
    }

    let Some((Value::Map(fields), _)) =
        cbor::decode::decode_value_with_depth(main, 0, config.max_depth)?
    else {
        return Err(Error::Format("OpenPrintTag main region is not a map"));
    };
    debug!("OpenPrintTag main data: {fields:?}");

    descriptor(&fields)
}

/// Split the payload into its main and aux regions.
///
/// Offsets and sizes are clamped to the payload, so a bad meta map yields
/// short or empty regions rather than an out of bounds read.
fn regions<'a>(payload: &'a [u8], config: &Config) -> Result<(&'a [u8], &'a [u8]), Error> {
    let Some((Value::Map(meta), meta_end)) =
        cbor::decode::decode_value_with_depth(payload, 0, config.max_depth)?
    else {
        return Err(Error::Format("OpenPrintTag meta section is not a map"));
    };

    let main_offset = meta_field(&meta, META_MAIN_OFFSET, "main_region_offset", meta_end)?;
    let aux_offset = meta_field(&meta, META_AUX_OFFSET, "aux_region_offset", payload.len())?;
    let main_size = meta_field(
        &meta,
        META_MAIN_SIZE,
        "main_region_size",
        aux_offset.saturating_sub(main_offset),
    )?;
    let aux_size = meta_field(
        &meta,
        META_AUX_SIZE,
        "aux_region_size",
        payload.len().saturating_sub(aux_offset),
    )?;

    trace!(
        "OpenPrintTag regions: main {main_offset}+{main_size}, aux {aux_offset}+{aux_size}, payload {} bytes",
        payload.len()
    );

    Ok((
        region(payload, main_offset, main_size),
        region(payload, aux_offset, aux_size),
    ))
}

fn region(payload: &[u8], offset: usize, size: usize) -> &[u8] {
    let start = offset.min(payload.len());
    &payload[start..offset.saturating_add(size).clamp(start, payload.len())]
}

fn meta_field(meta: &Map, key: u64, name: &'static str, default: usize) -> Result<usize, Error> {
    meta.get_uint(key)
        .filter(|v| !v.is_null())
        .map_or(Ok(default), |v| v.to_int())
        .map_field_err(name)
}

/// Integral floats are accepted, so `1.0` reads as id 1.
fn material_id(v: &Value) -> Option<u64> {
    match v {
        Value::Float(f) if f.fract() == 0.0 => v.to_int().ok(),
        _ => v.as_u64().ok(),
    }
}

/// A field that is present and not zero, empty, false or null.
fn field(fields: &Map, key: u64) -> Option<&Value> {
    fields.get_uint(key).filter(|v| !v.is_empty_or_zero())
}

fn int_field<T: NumCast + Default>(fields: &Map, key: u64, name: &'static str) -> Result<T, Error> {
    field(fields, key)
        .map_or(Ok(T::default()), |v| v.to_int())
        .map_field_err(name)
}

fn descriptor(fields: &Map) -> Result<FilamentDescriptor, Error> {
    let mut b = FilamentDescriptor::builder();

    b.vendor(match field(fields, BRAND_NAME) {
        Some(v) => v.as_text().map_field_err("brand_name")?,
        None => DEFAULT_VENDOR,
    });

    b.main_type(
        fields
            .get_uint(MATERIAL_TYPE)
            .and_then(material_id)
            .map_or(MaterialType::Reserved, MaterialType::from_id),
    );

    let matte = fields
        .get_uint(TAGS)
        .and_then(|v| v.as_array().ok())
        .is_some_and(|tags| tags.contains(&Value::Unsigned(TAG_MATTE)));
    b.sub_type(if matte { SubType::Matte } else { SubType::Basic });

    for (key, name) in COLORS {
        let Some(v) = field(fields, key) else {
            continue;
        };
        if let [r, g, bl, rest @ ..] = v.as_bytes().map_field_err(name)? {
            b.add_color(
                u32::from_be_bytes([0, *r, *g, *bl]),
                rest.first().copied().unwrap_or(0xFF),
            );
        }
    }

    if let Some(v) = field(fields, FILAMENT_DIAMETER) {
        b.diameter(diameter(v).map_field_err("filament_diameter")?);
    }
    b.weight(int_field(fields, NOMINAL_WEIGHT, "nominal_netto_full_weight")?);

    let nozzle = int_field(fields, NOZZLE_TEMPERATURE, "nozzle_temperature")?;
    b.hotend_temps(nozzle, nozzle)
        .bed_temp(int_field(fields, BED_TEMPERATURE, "bed_temperature")?)
        .sku(int_field(fields, GTIN, "gtin")?);

    if let Some(v) = field(fields, MANUFACTURED_DATE) {
        match mf_date(v) {
            Ok(date) => {
                b.mf_date(date);
            }
            Err(e) => debug!("Ignoring manufacture date {v:?}: {e}"),
        }
    }

    Ok(b.build())
}

/// Millimetres to hundredths of a millimetre, truncated.
fn diameter(v: &Value) -> Result<u32, cbor::decode::Error> {
    match v {
        Value::Float(mm) => Value::Float(mm * 100.0).to_int(),
        _ => v
            .to_int::<u32>()?
            .checked_mul(100)
            .ok_or(cbor::decode::Error::IntegerOverflow),
    }
}

/// A UNIX timestamp as a UTC `YYYYMMDD` date.
fn mf_date(v: &Value) -> Result<String, Error> {
    let timestamp = v.to_int::<i64>().map_field_err("manufactured_date")?;
    let date = time::OffsetDateTime::from_unix_timestamp(timestamp)
        .map_field_err("manufactured_date")?;
    if date.year() < 1 {
        return Err(Error::Format("manufacture date before year 1"));
    }
    date.format(DATE_FORMAT).map_field_err("manufactured_date")
}
