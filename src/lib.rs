/*!
Strict, UTC-only date-time text for JSON.

The crate has three layers:

* [`AsciiWindow`]: a borrowed, bounds-checked view over part of a byte
  buffer, read as ASCII.
* [`parse_iso8601`] / [`ParsedFields`]: an allocation-free recognizer for
  `yyyy-MM-ddTHH:mm:ss[.fffffff][Z|±HH[:mm]]` that reports failure as `None`.
* [`UtcCodec`]: converts between [`Timestamp`] values and
  `yyyy-MM-ddTHH:mm:ss.fffffffZ` text, refusing anything that is not UTC.

With serde, `Timestamp` (de)serializes through the codec, and the helpers in
[`serde`](crate::serde) cover optional fields.

```
use utc_codec::UtcCodec;

let ts = UtcCodec::parse_str("2021-06-01T10:00:00.5Z")?;
assert_eq!(UtcCodec::format(ts)?.to_string(), "2021-06-01T10:00:00.5000000Z");

// Offsets are recognized by the parser but refused by the codec.
assert!(UtcCodec::parse_str("2021-06-01T10:00:00+02:00").is_err());
# Ok::<(), utc_codec::Error>(())
```
*/

#[macro_use]
mod logging;

mod codec;
mod consts;
mod options;
mod parser;
mod prelude;
pub mod serde;
mod types;
mod window;

pub use codec::{Formatted, Token, TokenKind, UtcCodec};
pub use consts::*;
pub use options::CodecOptions;
pub use parser::{ParsedFields, ZoneKind, parse_iso8601};
pub use types::{
    Civil, DateTimeKind, DateValue, OffsetTimestamp, Timestamp, days_in_month, is_leap_year,
};
pub use window::{AsciiWindow, WindowError};

/// Error type for the codec.
///
/// Every variant describes a broken contract between the caller and the data
/// (a value that is not UTC, a null where a value is required, text in the
/// wrong shape). None of them are retried or recovered inside the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A value on its way out was not in UTC.
    #[error("Unexpected time zone when converting date. Expected Utc, got {0}.")]
    TimeZoneMismatch(DateTimeKind),

    /// Null or empty input for a target that requires a value.
    #[error("Cannot convert null value to a date-time.")]
    NullValue,

    /// Input that is neither a string nor an already-parsed date.
    #[error("Unexpected token parsing date. Expected String, got {0}.")]
    UnexpectedToken(TokenKind),

    /// Text whose last character is not `Z` or `z`.
    #[error("Unexpected time-zone symbol. Expected 'Z', got '{0}'.")]
    UnexpectedZoneSymbol(char),

    /// Text that ends in `Z` but did not parse as UTC.
    #[error("Time-zone has changed after deserialization. Expected Utc, got {0}.")]
    ZoneChanged(ZoneKind),

    /// Text that does not follow the date-time grammar.
    #[error("Unexpected date-time format '{text}'. Expected '{expected}'.", expected = UTC_PATTERN)]
    InvalidFormat { text: String },

    /// A calendar field outside its range.
    #[error("Invalid {field}: {value}")]
    InvalidField { field: &'static str, value: u32 },

    /// An instant before year 1 or after year 9999.
    #[error("Date-time is outside the range 0001-01-01 to 9999-12-31.")]
    OutOfRange,
}
