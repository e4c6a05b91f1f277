use std::fmt;

use crate::Error;
use crate::consts::{
    DATE_SEPARATOR, FORMATTED_LEN, FRACTION_SEPARATOR, TIME_DESIGNATOR, TIME_SEPARATOR,
    UTC_DESIGNATOR,
};
use crate::options::CodecOptions;
use crate::parser::{ParsedFields, ZoneKind};
use crate::prelude::*;
use crate::types::{DateTimeKind, DateValue, Timestamp};
use crate::window::{AsciiWindow, ascii_char};

/// The kind of JSON token handed to [`UtcCodec::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    #[display(fmt = "Null")]
    Null,
    #[display(fmt = "Date")]
    Date,
    #[display(fmt = "String")]
    String,
    #[display(fmt = "Boolean")]
    Boolean,
    #[display(fmt = "Integer")]
    Integer,
    #[display(fmt = "Float")]
    Float,
    #[display(fmt = "StartObject")]
    StartObject,
    #[display(fmt = "StartArray")]
    StartArray,
}

/// One token from the surrounding JSON reader.
///
/// `String` holds the token's bytes with quotes stripped and escapes
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Null,
    /// A date the reader already recognized and converted itself.
    Date(Timestamp),
    String(&'a [u8]),
    Other(TokenKind),
}

impl Token<'_> {
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Null => TokenKind::Null,
            Self::Date(_) => TokenKind::Date,
            Self::String(_) => TokenKind::String,
            Self::Other(kind) => *kind,
        }
    }
}

/// A written date-time: `yyyy-MM-ddTHH:mm:ss.fffffffZ`, always 28 ASCII
/// bytes. Quoting is left to the JSON writer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Formatted {
    buf: [u8; FORMATTED_LEN],
}

impl Formatted {
    fn new(ts: Timestamp) -> Self {
        let civil = ts.to_civil();
        let mut buf = [0; FORMATTED_LEN];

        write_digits(&mut buf[0..4], civil.year.into());
        buf[4] = DATE_SEPARATOR;
        write_digits(&mut buf[5..7], civil.month.into());
        buf[7] = DATE_SEPARATOR;
        write_digits(&mut buf[8..10], civil.day.into());
        buf[10] = TIME_DESIGNATOR;
        write_digits(&mut buf[11..13], civil.hour.into());
        buf[13] = TIME_SEPARATOR;
        write_digits(&mut buf[14..16], civil.minute.into());
        buf[16] = TIME_SEPARATOR;
        write_digits(&mut buf[17..19], civil.second.into());
        buf[19] = FRACTION_SEPARATOR;
        write_digits(&mut buf[20..27], civil.fraction);
        // The kind is known to be UTC here, so the zone marker is always Z.
        buf[27] = UTC_DESIGNATOR;

        Self { buf }
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// The written bytes as a window, e.g. for handing to a reader.
    pub fn window(&self) -> AsciiWindow<'_> {
        AsciiWindow::from(self.as_bytes())
    }
}

impl AsRef<[u8]> for Formatted {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.window(), f)
    }
}

impl fmt::Debug for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Formatted({self})")
    }
}

/// Zero-padded decimal digits of `value`, right-aligned in `out`.
fn write_digits(out: &mut [u8], mut value: u32) {
    for b in out.iter_mut().rev() {
        *b = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

/// Converts [`Timestamp`] values to and from UTC text.
///
/// Everything passing through must be UTC. Values from any other zone are
/// reported as errors, never converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtcCodec {
    options: CodecOptions,
}

impl UtcCodec {
    pub const fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// A codec whose reads may yield `None`.
    pub const fn nullable() -> Self {
        Self::new(CodecOptions::new().nullable(true))
    }

    pub const fn options(&self) -> CodecOptions {
        self.options
    }

    /// Writes `value` as `yyyy-MM-ddTHH:mm:ss.fffffffZ`.
    ///
    /// `Unspecified` timestamps are taken to be UTC already. Offset values are
    /// resolved to the UTC instant they denote.
    ///
    /// # Errors
    /// Returns `Error::TimeZoneMismatch` for a `Local` timestamp, and
    /// `Error::OutOfRange` if resolving an offset leaves the valid range.
    pub fn format(value: impl Into<DateValue>) -> Result<Formatted, Error> {
        let utc = match value.into() {
            DateValue::Timestamp(ts) if ts.kind() == DateTimeKind::Unspecified => {
                ts.with_kind(DateTimeKind::Utc)
            }
            DateValue::Timestamp(ts) => ts,
            DateValue::Offset(offset) => offset.to_utc()?,
        };
        if utc.kind() != DateTimeKind::Utc {
            debug!("refusing to write a {} timestamp as UTC", utc.kind());
            return Err(Error::TimeZoneMismatch(utc.kind()));
        }
        Ok(Formatted::new(utc))
    }

    /// Reads one token.
    ///
    /// Dates the reader already parsed pass straight through. Null tokens and
    /// empty strings read as `None` when the options allow it. Strings go
    /// through [`UtcCodec::parse_bytes`].
    ///
    /// # Errors
    /// Returns `Error::NullValue` for null or empty input on a required
    /// target, `Error::UnexpectedToken` for tokens that are not strings, and
    /// anything [`UtcCodec::parse_bytes`] returns.
    pub fn read(&self, token: Token<'_>) -> Result<Option<Timestamp>, Error> {
        let text = match token {
            Token::Null => return self.absent(),
            Token::Date(ts) => return Ok(Some(ts)),
            Token::String([]) => return self.absent(),
            Token::String(text) => text,
            Token::Other(kind) => {
                debug!("expected a string date-time token, got {}", kind);
                return Err(Error::UnexpectedToken(kind));
            }
        };
        Self::parse_bytes(text).map(Some)
    }

    const fn absent(&self) -> Result<Option<Timestamp>, Error> {
        if self.options.nullable {
            Ok(None)
        } else {
            Err(Error::NullValue)
        }
    }

    /// Parses UTC date-time text into a `Utc` timestamp.
    ///
    /// Both the fixed seven-digit form written by [`UtcCodec::format`] and
    /// the general round-trip form (fewer or no fraction digits) are
    /// accepted, as long as the text ends in `Z` or `z`.
    ///
    /// # Errors
    /// Returns `Error::NullValue` for empty input,
    /// `Error::UnexpectedZoneSymbol` if the last character is not `Z`/`z`,
    /// `Error::InvalidFormat` if the text does not parse,
    /// `Error::ZoneChanged` if it parsed to a zone other than UTC, and
    /// `Error::OutOfRange` for `9999-12-31T24:00:00Z`.
    pub fn parse_bytes(text: &[u8]) -> Result<Timestamp, Error> {
        let window = AsciiWindow::from(text);
        let Some(&last) = text.last() else {
            return Err(Error::NullValue);
        };
        if !(window.ends_with("Z") || window.ends_with("z")) {
            debug!("date-time {:?} does not end in Z", window.to_text());
            return Err(Error::UnexpectedZoneSymbol(ascii_char(last)));
        }

        let Some(fields) = ParsedFields::parse_window(&window) else {
            trace!("{:?} is not a date-time", window.to_text());
            return Err(Error::InvalidFormat {
                text: window.to_text(),
            });
        };
        if fields.zone != ZoneKind::Utc {
            return Err(Error::ZoneChanged(fields.zone));
        }

        Timestamp::from_civil(fields.civil(), DateTimeKind::Utc)
    }

    /// [`UtcCodec::parse_bytes`] for text.
    ///
    /// # Errors
    /// See [`UtcCodec::parse_bytes`].
    pub fn parse_str(text: &str) -> Result<Timestamp, Error> {
        Self::parse_bytes(text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::consts::MAX_TICKS;
    use crate::types::{Civil, OffsetTimestamp};

    fn utc(text: &str) -> Timestamp {
        UtcCodec::parse_str(text).unwrap()
    }

    fn civil(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Civil {
        Civil {
            year,
            month,
            day,
            hour,
            minute,
            second,
            fraction: 0,
        }
    }

    #[test]
    fn test_format_fixed_pattern() {
        let ts = Timestamp::from_civil(
            Civil {
                fraction: 1_234_567,
                ..civil(2021, 6, 1, 10, 20, 30)
            },
            DateTimeKind::Utc,
        )
        .unwrap();
        let formatted = UtcCodec::format(ts).unwrap();
        assert_eq!(formatted.to_string(), "2021-06-01T10:20:30.1234567Z");
        assert_eq!(formatted.as_bytes(), b"2021-06-01T10:20:30.1234567Z");
        assert_eq!(formatted.as_bytes().len(), FORMATTED_LEN);
        assert!(formatted.window().ends_with("Z"));
    }

    #[test]
    fn test_format_pads_every_field() {
        assert_eq!(
            UtcCodec::format(Timestamp::MIN).unwrap().to_string(),
            "0001-01-01T00:00:00.0000000Z"
        );
        assert_eq!(
            UtcCodec::format(Timestamp::MAX).unwrap().to_string(),
            "9999-12-31T23:59:59.9999999Z"
        );
    }

    #[test]
    fn test_format_unspecified_is_utc() {
        let ts = utc("2021-06-01T10:00:00Z").with_kind(DateTimeKind::Unspecified);
        assert_eq!(
            UtcCodec::format(ts).unwrap().to_string(),
            "2021-06-01T10:00:00.0000000Z"
        );
    }

    #[test]
    fn test_format_rejects_local() {
        let ts = utc("2021-06-01T10:00:00Z").with_kind(DateTimeKind::Local);
        let err = UtcCodec::format(ts).unwrap_err();
        assert_eq!(err, Error::TimeZoneMismatch(DateTimeKind::Local));
        assert_eq!(
            err.to_string(),
            "Unexpected time zone when converting date. Expected Utc, got Local."
        );
    }

    #[test]
    fn test_format_offset_resolves_to_utc() {
        let offset = OffsetTimestamp::new(civil(2021, 6, 1, 12, 0, 0), 120).unwrap();
        assert_eq!(
            UtcCodec::format(offset).unwrap().to_string(),
            "2021-06-01T10:00:00.0000000Z"
        );

        let early = OffsetTimestamp::new(civil(1, 1, 1, 0, 0, 0), 60).unwrap();
        assert_eq!(UtcCodec::format(early), Err(Error::OutOfRange));
    }

    #[test]
    fn test_parse_fixed_and_round_trip_forms() {
        let fixed = utc("2021-06-01T10:00:00.0000000Z");
        let short = utc("2021-06-01T10:00:00Z");
        assert_eq!(fixed, short);
        assert_eq!(fixed.kind(), DateTimeKind::Utc);
        assert_eq!(utc("2021-06-01T10:00:00z"), short);
    }

    #[test]
    fn test_parse_rejects_non_utc_terminal_symbol() {
        for text in [
            "2021-06-01T10:00:00+02:00",
            "2021-06-01T10:00:00-0500",
            "2021-06-01T10:00:00",
            "2021-06-01T10:00:00.1234567",
            "not a date",
        ] {
            assert!(
                matches!(
                    UtcCodec::parse_str(text),
                    Err(Error::UnexpectedZoneSymbol(_))
                ),
                "{text}"
            );
        }
        assert_eq!(
            UtcCodec::parse_str("2021-06-01T10:00:00+02:00"),
            Err(Error::UnexpectedZoneSymbol('0'))
        );
        assert_eq!(
            UtcCodec::parse_bytes(b"2021-06-01T10:00:00\xC3"),
            Err(Error::UnexpectedZoneSymbol('\u{FFFD}'))
        );
    }

    #[test]
    fn test_parse_hour_24() {
        assert_eq!(utc("2021-06-01T24:00:00Z"), utc("2021-06-02T00:00:00Z"));
        assert_eq!(utc("2021-12-31T24:00:00Z"), utc("2022-01-01T00:00:00Z"));
        for text in ["2021-06-01T24:00:01Z", "2021-06-01T24:30:00Z"] {
            assert!(
                matches!(UtcCodec::parse_str(text), Err(Error::InvalidFormat { .. })),
                "{text}"
            );
        }
        assert_eq!(
            UtcCodec::parse_str("9999-12-31T24:00:00Z"),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn test_parse_leap_days() {
        assert!(UtcCodec::parse_str("2000-02-29T00:00:00.0000000Z").is_ok());
        assert!(UtcCodec::parse_str("1900-02-29T00:00:00.0000000Z").is_err());
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(
            utc("2021-06-01T10:00:00.5Z"),
            utc("2021-06-01T10:00:00.5000000Z")
        );
        assert_eq!(
            utc("2021-06-01T10:00:00.1234567Z").to_civil().fraction,
            1_234_567
        );
        assert_eq!(
            utc("2021-06-01T10:00:00.12345678Z"),
            utc("2021-06-01T10:00:00.1234567Z")
        );
    }

    #[test]
    fn test_parse_trailing_garbage() {
        // Ends in Z, so only the grammar can reject it.
        let err = UtcCodec::parse_str("2021-06-01T10:00:00ZgarbageZ").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidFormat {
                text: "2021-06-01T10:00:00ZgarbageZ".to_owned()
            }
        );
        assert!(matches!(
            UtcCodec::parse_str("2021-06-01T10:00:00Zgarbage"),
            Err(Error::UnexpectedZoneSymbol('e'))
        ));
    }

    #[test]
    fn test_parse_error_message_uses_lossy_text() {
        let err = UtcCodec::parse_bytes(b"2021-\xFF6-01T10:00:00Z").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected date-time format '2021-\u{FFFD}6-01T10:00:00Z'. Expected \
             'yyyy-MM-ddTHH:mm:ss.fffffffZ'."
        );
    }

    #[test]
    fn test_read_tokens() {
        let codec = UtcCodec::default();
        let ts = utc("2021-06-01T10:00:00Z");

        assert_eq!(
            codec.read(Token::String(b"2021-06-01T10:00:00Z")),
            Ok(Some(ts))
        );
        let local = ts.with_kind(DateTimeKind::Local);
        assert_eq!(codec.read(Token::Date(local)), Ok(Some(local)));
        assert_eq!(
            codec.read(Token::Other(TokenKind::Integer)),
            Err(Error::UnexpectedToken(TokenKind::Integer))
        );
        assert_eq!(
            Error::UnexpectedToken(TokenKind::StartObject).to_string(),
            "Unexpected token parsing date. Expected String, got StartObject."
        );
    }

    #[test]
    fn test_read_null_depends_on_options() {
        let required = UtcCodec::default();
        assert_eq!(required.read(Token::Null), Err(Error::NullValue));
        assert_eq!(required.read(Token::String(b"")), Err(Error::NullValue));

        let nullable = UtcCodec::nullable();
        assert!(nullable.options().nullable);
        assert_eq!(nullable.read(Token::Null), Ok(None));
        assert_eq!(nullable.read(Token::String(b"")), Ok(None));
        // A nullable target still rejects bad text.
        assert!(nullable.read(Token::String(b"2021")).is_err());
    }

    #[test]
    fn test_token_kind() {
        assert_eq!(Token::Null.kind(), TokenKind::Null);
        assert_eq!(Token::String(b"").kind(), TokenKind::String);
        assert_eq!(Token::Date(Timestamp::MIN).kind(), TokenKind::Date);
        assert_eq!(Token::Other(TokenKind::Float).kind(), TokenKind::Float);
    }

    #[test]
    fn test_write_digits() {
        let mut out = [0; 4];
        write_digits(&mut out, 42);
        assert_eq!(&out, b"0042");
    }

    #[quickcheck]
    fn prop_round_trip(ticks: u64) -> TestResult {
        let Ok(ts) = Timestamp::utc(ticks % (MAX_TICKS + 1)) else {
            return TestResult::discard();
        };
        let formatted = UtcCodec::format(ts).unwrap();
        TestResult::from_bool(UtcCodec::parse_bytes(formatted.as_bytes()) == Ok(ts))
    }
}
