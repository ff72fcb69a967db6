use super::openprinttag::*;
use super::*;
use hex_literal::hex;
use proptest::prelude::*;

// Empty meta map, so the main region is the rest of the payload
const FULL: [u8; 63] = hex!(
    "A0 AB
    04 1B 00 00 01 1F 71 FB 04 CB
    09 01
    0B 69 50 72 75 73 61 6D 65 6E 74
    0E 1A 65 53 F1 00
    10 F9 3F 00
    12 19 03 E8
    13 43 FF 80 00
    14 44 00 00 FF 80
    18 1C 82 10 03
    18 22 18 D7
    18 23 18 3C"
);

fn field_err(result: Result<FilamentDescriptor, Error>) -> &'static str {
    match result {
        Err(Error::InvalidField { field, .. }) => field,
        r => panic!("Expected a field error, got {r:?}"),
    }
}

#[test]
fn full() {
    let d = decode(&FULL).expect("Failed to decode");
    assert_eq!(1, d.version);
    assert_eq!("Prusament", d.vendor);
    assert_eq!("Prusament", d.manufacturer);
    assert_eq!(MaterialType::PETG, d.main_type);
    assert_eq!(SubType::Matte, d.sub_type);
    assert_eq!(2, d.color_nums);
    assert_eq!(0xFF, d.alpha);
    assert_eq!(0xFF8000, d.rgb_1);
    assert_eq!(0x0000FF, d.rgb_2);
    assert_eq!(0, d.rgb_3);
    assert_eq!(0xFFFF8000, d.argb_color);
    assert_eq!(175, d.diameter);
    assert_eq!(1000, d.weight);
    assert_eq!(215, d.hotend_min_temp);
    assert_eq!(215, d.hotend_max_temp);
    assert_eq!(215, d.first_layer_temp);
    assert_eq!(215, d.other_layer_temp);
    assert_eq!(60, d.bed_temp);
    assert_eq!(1234567890123, d.sku);
    assert_eq!("20231114", d.mf_date);
    assert!(d.official);
    assert!(d.card_uid.is_empty());
}

#[test]
fn defaults() {
    // Only a brand name: no material type, no date
    let d = decode(&hex!("A0 A1 0B 63 41 42 43")).expect("Failed to decode");
    assert_eq!("ABC", d.vendor);
    assert_eq!(MaterialType::Reserved, d.main_type);
    assert_eq!("Reserved", d.main_type.as_str());
    assert_eq!(SubType::Basic, d.sub_type);
    assert_eq!(descriptor::DEFAULT_MF_DATE, d.mf_date);
    assert_eq!(1, d.color_nums);
    assert_eq!(0xFFFFFF, d.rgb_1);
    assert_eq!(0xFFFFFFFF, d.argb_color);
    assert_eq!(0, d.diameter);
    assert_eq!(0, d.sku);

    let d = decode(&hex!("A0 A0")).expect("Failed to decode");
    assert_eq!("NONE", d.vendor);
    assert_eq!("19700101", d.mf_date);

    // Zero and empty values count as absent, except for the material type
    let d = decode(&hex!("A0 A5 0B 60 10 00 18 22 00 0E 00 09 00")).expect("Failed to decode");
    assert_eq!("NONE", d.vendor);
    assert_eq!(MaterialType::PLA, d.main_type);
    assert_eq!(0, d.diameter);
    assert_eq!(0, d.hotend_min_temp);
    assert_eq!("19700101", d.mf_date);

    // Unknown or non-integer material type ids
    let d = decode(&hex!("A0 A1 09 18 29")).expect("Failed to decode");
    assert_eq!(MaterialType::Reserved, d.main_type);
    let d = decode(&hex!("A0 A1 09 61 31")).expect("Failed to decode");
    assert_eq!(MaterialType::Reserved, d.main_type);
    let d = decode(&hex!("A0 A1 09 F6")).expect("Failed to decode");
    assert_eq!(MaterialType::Reserved, d.main_type);
    let d = decode(&hex!("A0 A1 09 F9 3E 00")).expect("Failed to decode");
    assert_eq!(MaterialType::Reserved, d.main_type);

    // Integral float ids, 1.0 and 3.0
    let d = decode(&hex!("A0 A1 09 F9 3C 00")).expect("Failed to decode");
    assert_eq!(MaterialType::PETG, d.main_type);
    let d = decode(&hex!("A0 A1 09 FB 40 08 00 00 00 00 00 00")).expect("Failed to decode");
    assert_eq!(MaterialType::ABS, d.main_type);
}

#[test]
fn regions() {
    // Main region at 7 for 3 bytes, aux region at 10
    let d = decode(&hex!("A3 00 07 01 03 02 0A A1 09 03 A1 00 01")).expect("Failed to decode");
    assert_eq!(MaterialType::ABS, d.main_type);
    assert_eq!("NONE", d.vendor);

    // Null meta values take their defaults
    let d = decode(&hex!("A1 00 F6 A1 09 01")).expect("Failed to decode");
    assert_eq!(MaterialType::PETG, d.main_type);
    let d = decode(&hex!("A2 00 F6 01 F6 A1 09 03")).expect("Failed to decode");
    assert_eq!(MaterialType::ABS, d.main_type);

    // Undecodable aux regions are ignored
    let d = decode(&hex!("A2 00 05 02 08 A1 09 03 1C 1C")).expect("Failed to decode");
    assert_eq!(MaterialType::ABS, d.main_type);

    // Oversized main region is clamped to the payload
    let d = decode(&hex!("A1 01 1B FF FF FF FF FF FF FF FF A1 09 02")).expect("Failed to decode");
    assert_eq!(MaterialType::TPU, d.main_type);

    // Main region past the end of the payload
    assert!(matches!(
        decode(&hex!("A1 00 18 64 A1 09 02")),
        Err(Error::Format(_))
    ));

    assert_eq!(
        "main_region_offset",
        field_err(decode(&hex!("A1 00 20 A1 09 02")))
    );
}

#[test]
fn not_a_map() {
    assert!(matches!(decode(&[]), Err(Error::Format(_))));
    assert!(matches!(decode(&hex!("80")), Err(Error::Format(_))));
    assert!(matches!(decode(&hex!("A0")), Err(Error::Format(_))));
    assert!(matches!(decode(&hex!("A0 80")), Err(Error::Format(_))));
    assert!(matches!(decode(&hex!("A0 64 74 65 78 74")), Err(Error::Format(_))));
}

#[test]
fn bad_cbor() {
    assert!(matches!(decode(&hex!("A0 A2 09 01")), Err(Error::Truncated(_))));
    assert!(matches!(decode(&hex!("A1 00")), Err(Error::Truncated(_))));
    assert!(matches!(
        decode(&hex!("A0 A1 09 1C")),
        Err(Error::UnsupportedEncoding(28))
    ));
    assert!(matches!(
        decode(&hex!("A0 A1 0B 62 C3 28")),
        Err(Error::InvalidCbor(cbor::decode::Error::InvalidUtf8(_)))
    ));
    assert!(matches!(
        decode(&hex!("A0 C1 A0")),
        Err(Error::InvalidCbor(
            cbor::decode::Error::UnsupportedMajorType(6)
        ))
    ));
    assert_eq!(
        Status::GenericError,
        decode(&hex!("A0 A2 09 01")).unwrap_err().status()
    );
}

#[test]
fn bad_fields() {
    assert_eq!("brand_name", field_err(decode(&hex!("A0 A1 0B 05"))));
    assert_eq!(
        "primary_color",
        field_err(decode(&hex!("A0 A1 13 63 72 65 64")))
    );
    assert_eq!(
        "nominal_netto_full_weight",
        field_err(decode(&hex!("A0 A1 12 20")))
    );
    assert_eq!(
        "nozzle_temperature",
        field_err(decode(&hex!("A0 A1 18 22 1B 00 00 00 01 00 00 00 00")))
    );
    assert_eq!(
        "filament_diameter",
        field_err(decode(&hex!("A0 A1 10 1A 02 FA F0 80")))
    );
}

#[test]
fn colors() {
    // Too short to be a colour
    let d = decode(&hex!("A0 A1 13 42 FF 00")).expect("Failed to decode");
    assert_eq!(1, d.color_nums);
    assert_eq!(0xFFFFFF, d.rgb_1);

    // All four colour fields, alpha taken from the primary colour
    let d = decode(&hex!(
        "A0 A4
        13 44 11 22 33 40
        14 43 44 55 66
        15 43 77 88 99
        16 43 AA BB CC"
    ))
    .expect("Failed to decode");
    assert_eq!(4, d.color_nums);
    assert_eq!(0x40, d.alpha);
    assert_eq!(0x40112233, d.argb_color);
    assert_eq!(
        vec![0x112233, 0x445566, 0x778899, 0xAABBCC],
        d.colors().collect::<Vec<_>>()
    );
    assert_eq!(0, d.rgb_5);

    // A missing primary colour shifts the others up
    let d = decode(&hex!("A0 A1 14 43 44 55 66")).expect("Failed to decode");
    assert_eq!(1, d.color_nums);
    assert_eq!(0x445566, d.rgb_1);
}

#[test]
fn numbers() {
    // Integer diameter
    let d = decode(&hex!("A0 A1 10 03")).expect("Failed to decode");
    assert_eq!(300, d.diameter);

    // Double precision diameter is truncated, not rounded
    let d = decode(&hex!("A0 A1 10 FB 3F D2 8F 5C 28 F5 C2 8F")).expect("Failed to decode");
    assert_eq!(28, d.diameter);

    // Single precision diameter, float temperatures and weight
    let d = decode(&hex!(
        "A0 A4 10 FA 3F E0 00 00 18 22 F9 5A C8 18 23 F9 53 80 12 F9 63 D0"
    ))
    .expect("Failed to decode");
    assert_eq!(175, d.diameter);
    assert_eq!(217, d.hotend_min_temp);
    assert_eq!(60, d.bed_temp);
    assert_eq!(1000, d.weight);

    // Negative temperatures
    let d = decode(&hex!("A0 A1 18 23 38 09")).expect("Failed to decode");
    assert_eq!(-10, d.bed_temp);
}

#[test]
fn dates() {
    let d = decode(&hex!("A0 A1 0E 3A 00 01 51 7F")).expect("Failed to decode");
    assert_eq!("19691231", d.mf_date);

    let d = decode(&hex!("A0 A1 0E 1A 00 01 51 80")).expect("Failed to decode");
    assert_eq!("19700102", d.mf_date);

    // Out of range and non-numeric dates fall back to the default
    let d = decode(&hex!("A0 A1 0E 1B 7F FF FF FF FF FF FF FF")).expect("Failed to decode");
    assert_eq!("19700101", d.mf_date);
    let d = decode(&hex!("A0 A1 0E 3B 00 00 00 0E 77 91 F7 00")).expect("Failed to decode");
    assert_eq!("19700101", d.mf_date);
    let d = decode(&hex!("A0 A1 0E 61 31")).expect("Failed to decode");
    assert_eq!("19700101", d.mf_date);
}

#[test]
fn max_depth() {
    let payload = hex!("A0 A2 09 01 18 1C 81 81 81 81 10");
    assert!(decode(&payload).is_ok());
    assert!(matches!(
        decode_with_config(
            &payload,
            &Config {
                max_depth: 3,
                ..Default::default()
            }
        ),
        Err(Error::InvalidCbor(cbor::decode::Error::MaxRecursion))
    ));
}

proptest! {
    #[test]
    fn never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        _ = decode(&data);

        let mut payload = vec![0xA0];
        payload.extend(&data);
        _ = decode(&payload);
    }
}
