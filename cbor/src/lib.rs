/*!
A small, bounded CBOR (RFC 8949) decoder.

Values are decoded into an owned [`value::Value`] tree. Every read is checked
against the remaining input and nesting is limited, so decoding untrusted
bytes always terminates without panicking.
*/

pub mod decode;
pub mod value;


#[cfg(test)]
mod value_tests;
