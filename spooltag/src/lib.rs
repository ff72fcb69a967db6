/*!
Decoder for the metadata stored on filament spool NFC tags.

The raw tag memory is walked as a Type 2 Tag TLV area to find NDEF records,
and the first record in a supported format is decoded into a
[`FilamentDescriptor`]:

* `application/vnd.openprinttag`: CBOR encoded OpenPrintTag data.
* `application/json`: OpenSpool JSON.

```no_run
let data = std::fs::read("tag.bin").unwrap();
match spooltag::parse(&data) {
    Ok(descriptor) => println!("{descriptor}"),
    Err(e) => eprintln!("{} ({})", e, i32::from(e.status())),
}
```
*/

use spooltag_cbor as cbor;
use tracing::*;

mod config;
mod descriptor;
mod error;
mod material;
mod mime;
mod parser;
mod status;

pub mod hexdump;
pub mod ndef;
pub mod openprinttag;
pub mod openspool;

pub use config::Config;
pub use descriptor::{Builder, FilamentDescriptor};
pub use error::{CaptureFieldErr, Error};
pub use material::{MaterialType, SubType};
pub use mime::MimeType;
pub use parser::Parser;
pub use status::Status;


#[cfg(test)]
mod openprinttag_tests;



/// Decode a raw tag dump using the default [`Config`].
pub fn parse(data: &[u8]) -> Result<FilamentDescriptor, Error> {
    Parser::default().parse(data)
}

/// Decode a raw tag dump, reporting the outcome as a [`Status`] code.
///
/// The descriptor is only returned alongside [`Status::Ok`].
pub fn parse_status(data: &[u8]) -> (Status, Option<FilamentDescriptor>) {
    match parse(data) {
        Ok(descriptor) => (Status::Ok, Some(descriptor)),
        Err(e) => (e.status(), None),
    }
}
