use super::decode::{Error, parse};
use super::value::*;
use hex_literal::hex;

#[test]
fn accessors() {
    let v = Value::Unsigned(42);
    assert_eq!(Ok(42), v.as_u64());
    assert_eq!(Ok(42), v.as_i64());
    assert_eq!(
        Err(Error::IncorrectType {
            expected: "text string",
            found: "unsigned integer"
        }),
        v.as_text()
    );
    assert!(v.as_map().is_err());
    assert!(v.as_f64().is_err());

    let v = Value::Text("PLA".into());
    assert_eq!(Ok("PLA"), v.as_text());
    assert!(v.as_bytes().is_err());

    let v = Value::Bytes(vec![0xff, 0x00, 0x00]);
    assert_eq!(Ok(&[0xff, 0x00, 0x00][..]), v.as_bytes());

    assert_eq!(Ok(true), Value::Bool(true).as_bool());
    assert!(Value::Null.is_null());
}

#[test]
fn to_int() {
    assert_eq!(Ok(175u32), Value::Float(1.75 * 100.0).to_int());
    assert_eq!(Ok(1u32), Value::Float(1.999).to_int());
    assert_eq!(Ok(-1i32), Value::Float(-1.5).to_int());
    assert_eq!(Ok(-5i32), Value::Negative(4).to_int());
    assert_eq!(Ok(1000u32), Value::Unsigned(1000).to_int());
    assert_eq!(Err(Error::IntegerOverflow), Value::Unsigned(1 << 40).to_int::<u32>());
    assert_eq!(Err(Error::IntegerOverflow), Value::Negative(0).to_int::<u32>());
    assert_eq!(Err(Error::IntegerOverflow), Value::Float(f64::NAN).to_int::<i64>());
    assert_eq!(
        Err(Error::IntegerOverflow),
        Value::Float(f64::INFINITY).to_int::<i64>()
    );
    assert!(matches!(
        Value::Text("1".into()).to_int::<u32>(),
        Err(Error::IncorrectType { .. })
    ));
}

#[test]
fn empty_or_zero() {
    assert!(Value::Unsigned(0).is_empty_or_zero());
    assert!(Value::Float(0.0).is_empty_or_zero());
    assert!(Value::Text(String::new()).is_empty_or_zero());
    assert!(Value::Bytes(Vec::new()).is_empty_or_zero());
    assert!(Value::Array(Vec::new()).is_empty_or_zero());
    assert!(Value::Map(Map::new()).is_empty_or_zero());
    assert!(Value::Bool(false).is_empty_or_zero());
    assert!(Value::Null.is_empty_or_zero());

    assert!(!Value::Unsigned(1).is_empty_or_zero());
    assert!(!Value::Negative(0).is_empty_or_zero());
    assert!(!Value::Text("x".into()).is_empty_or_zero());
}

#[test]
fn map_keys() {
    let (v, _) = parse(&hex!("a4 00 01 61 61 02 f9 3c00 03 20 04")).unwrap();
    let map = v.into_map().unwrap();
    assert_eq!(4, map.len());
    assert_eq!(Some(&Value::Unsigned(1)), map.get_uint(0));
    assert_eq!(Some(&Value::Unsigned(2)), map.get(&Value::from("a")));
    assert_eq!(Some(&Value::Unsigned(3)), map.get(&Value::Float(1.0)));
    assert_eq!(Some(&Value::Unsigned(4)), map.get(&Value::Negative(0)));
    assert_eq!(None, map.get_uint(1));

    // Integer and float keys are distinct
    assert_eq!(None, map.get(&Value::Float(0.0)));
}
