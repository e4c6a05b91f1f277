/*!
Allocation-free recognizer for `yyyy-MM-ddTHH:mm:ss[.fffffff][Z|±HH[:mm]]`.

The grammar is walked by a handful of small functions, each taking the
unconsumed input and returning the value it recognized together with the
input that is left over. Every step returns `None` on a mismatch, and the
first `None` aborts the whole parse. Failing is cheap and expected: callers
routinely probe a string to see whether it looks like a date at all.

Nothing outside the supplied range is ever read.
*/

use crate::consts::{
    DATE_SEPARATOR, FRACTION_SEPARATOR, MAX_FRACTION_DIGITS, MAX_HOUR, MAX_MONTH, MIN_YEAR, POW10,
    SEXAGESIMAL, TIME_DESIGNATOR, TIME_SEPARATOR,
};
use crate::prelude::*;
use crate::types::{Civil, days_in_month};
use crate::window::AsciiWindow;

/// How the zone suffix of a parsed token was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum ZoneKind {
    /// No zone suffix at all.
    #[default]
    #[display(fmt = "Unspecified")]
    Unspecified,
    /// `Z` or `z`.
    #[display(fmt = "Utc")]
    Utc,
    /// `-HH[:mm]`
    #[display(fmt = "LocalWestOfUtc")]
    LocalWestOfUtc,
    /// `+HH[:mm]`
    #[display(fmt = "LocalEastOfUtc")]
    LocalEastOfUtc,
}

/// The fields of one successfully parsed date-time token.
///
/// This is a plain value: every call to [`ParsedFields::parse`] builds a new
/// one from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParsedFields {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    /// `0..=24`; 24 only together with zero minute, second and fraction.
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Ticks within the second, always scaled to seven digits.
    pub fraction: u32,
    pub zone: ZoneKind,
    /// Offset magnitude. Only two digits are enforced, so up to 99.
    pub zone_hour: u8,
    /// Offset magnitude. Only two digits are enforced, so up to 99.
    pub zone_minute: u8,
}

impl ParsedFields {
    /// Parses `buffer[start..start + len]` as a single date-time token.
    ///
    /// Returns `None` if the range does not fit in `buffer` or the bytes do
    /// not match the grammar exactly, including any trailing bytes.
    pub fn parse(buffer: &[u8], start: usize, len: usize) -> Option<Self> {
        let input = buffer.get(start..start.checked_add(len)?)?;
        parse_iso8601(input)
    }

    /// Parses the bytes covered by `window`.
    pub fn parse_window(window: &AsciiWindow<'_>) -> Option<Self> {
        parse_iso8601(window.as_bytes())
    }

    /// The calendar part of the token.
    pub const fn civil(&self) -> Civil {
        Civil {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            fraction: self.fraction,
        }
    }

    /// Signed offset from UTC in minutes; zero unless the zone is local.
    pub fn offset_minutes(&self) -> i32 {
        let magnitude = i32::from(self.zone_hour) * 60 + i32::from(self.zone_minute);
        match self.zone {
            ZoneKind::LocalEastOfUtc => magnitude,
            ZoneKind::LocalWestOfUtc => -magnitude,
            ZoneKind::Utc | ZoneKind::Unspecified => 0,
        }
    }
}

/// Parses a complete token. See the module docs for the grammar.
pub fn parse_iso8601(input: &[u8]) -> Option<ParsedFields> {
    let Parsed {
        value: (year, month, day),
        input,
    } = parse_date(input)?;
    let input = parse_literal(input, TIME_DESIGNATOR)?;
    let Parsed {
        value: (hour, minute, second),
        input,
    } = parse_time(input)?;
    let Parsed {
        value: fraction,
        input,
    } = parse_fraction(input)?;
    if hour == MAX_HOUR && fraction != 0 {
        return None;
    }
    let Parsed { value: zone, input } = parse_zone(input)?;

    // Nothing may follow the zone.
    if !input.is_empty() {
        return None;
    }

    Some(ParsedFields {
        year,
        month,
        day,
        hour,
        minute,
        second,
        fraction,
        zone: zone.kind,
        zone_hour: zone.hour,
        zone_minute: zone.minute,
    })
}

/// A recognized value and the input that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Parsed<'i, V> {
    value: V,
    input: &'i [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Zone {
    kind:   ZoneKind,
    hour:   u8,
    minute: u8,
}

// yyyy-MM-dd
fn parse_date(input: &[u8]) -> Option<Parsed<'_, (u16, u8, u8)>> {
    let Parsed { value: year, input } = parse_four_digits(input)?;
    if year < MIN_YEAR {
        return None;
    }
    let input = parse_literal(input, DATE_SEPARATOR)?;

    let Parsed { value: month, input } = parse_two_digits(input)?;
    if !(1..=MAX_MONTH).contains(&month) {
        return None;
    }
    let input = parse_literal(input, DATE_SEPARATOR)?;

    let Parsed { value: day, input } = parse_two_digits(input)?;
    if !(1..=days_in_month(year, month)).contains(&day) {
        return None;
    }

    Some(Parsed {
        value: (year, month, day),
        input,
    })
}

// HH:mm:ss
fn parse_time(input: &[u8]) -> Option<Parsed<'_, (u8, u8, u8)>> {
    let Parsed { value: hour, input } = parse_two_digits(input)?;
    if hour > MAX_HOUR {
        return None;
    }
    let input = parse_literal(input, TIME_SEPARATOR)?;

    let Parsed { value: minute, input } = parse_two_digits(input)?;
    if minute >= SEXAGESIMAL {
        return None;
    }
    let input = parse_literal(input, TIME_SEPARATOR)?;

    let Parsed { value: second, input } = parse_two_digits(input)?;
    if second >= SEXAGESIMAL {
        return None;
    }

    // 24:00:00 is the only form hour 24 may take.
    if hour == MAX_HOUR && (minute != 0 || second != 0) {
        return None;
    }

    Some(Parsed {
        value: (hour, minute, second),
        input,
    })
}

// [.fffffff]
//
// At least one digit must follow the dot. Up to seven are kept and scaled to
// ticks; any further digits are consumed and dropped.
fn parse_fraction(input: &[u8]) -> Option<Parsed<'_, u32>> {
    let Some(mut input) = input.strip_prefix(&[FRACTION_SEPARATOR]) else {
        return Some(Parsed { value: 0, input });
    };

    let mut fraction = 0_u32;
    let mut digits = 0;
    while digits < MAX_FRACTION_DIGITS {
        let Some((&b, rest)) = input.split_first().filter(|(b, _)| b.is_ascii_digit()) else {
            break;
        };
        fraction = fraction * 10 + u32::from(b - b'0');
        digits += 1;
        input = rest;
    }
    if digits == 0 {
        return None;
    }
    let skip = input.iter().take_while(|b| b.is_ascii_digit()).count();
    let input = &input[skip..];

    Some(Parsed {
        value: fraction * POW10[MAX_FRACTION_DIGITS - digits],
        input,
    })
}

// [Z|z|+HH[[:]mm]|-HH[[:]mm]]
//
// The offset magnitudes are only checked for being two digits each.
fn parse_zone(input: &[u8]) -> Option<Parsed<'_, Zone>> {
    let Some((&first, rest)) = input.split_first() else {
        return Some(Parsed {
            value: Zone::default(),
            input,
        });
    };

    let kind = match first {
        b'Z' | b'z' => {
            return Some(Parsed {
                value: Zone {
                    kind: ZoneKind::Utc,
                    ..Zone::default()
                },
                input: rest,
            });
        }
        b'+' => ZoneKind::LocalEastOfUtc,
        b'-' => ZoneKind::LocalWestOfUtc,
        // Leave it for the end-of-input check to reject.
        _ => {
            return Some(Parsed {
                value: Zone::default(),
                input,
            });
        }
    };

    let Parsed { value: hour, input } = parse_two_digits(rest)?;
    let Parsed {
        value: minute,
        input,
    } = match input.strip_prefix(&[TIME_SEPARATOR]) {
        Some(rest) => parse_two_digits(rest)?,
        None => parse_two_digits(input).unwrap_or(Parsed { value: 0, input }),
    };

    Some(Parsed {
        value: Zone { kind, hour, minute },
        input,
    })
}

fn parse_literal(input: &[u8], expected: u8) -> Option<&[u8]> {
    input.strip_prefix(&[expected])
}

fn parse_two_digits(input: &[u8]) -> Option<Parsed<'_, u8>> {
    let (digits, input) = input.split_first_chunk::<2>()?;
    let [a, b] = digits.map(digit);
    Some(Parsed {
        value: a? * 10 + b?,
        input,
    })
}

fn parse_four_digits(input: &[u8]) -> Option<Parsed<'_, u16>> {
    let (digits, input) = input.split_first_chunk::<4>()?;
    let value = digits
        .iter()
        .try_fold(0_u16, |acc, &b| Some(acc * 10 + u16::from(digit(b)?)))?;
    Some(Parsed { value, input })
}

const fn digit(b: u8) -> Option<u8> {
    if b.is_ascii_digit() {
        Some(b - b'0')
    } else {
        None
    }
}
