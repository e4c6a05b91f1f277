use crate::Error;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_ERA, DAYS_TO_YEAR_10000, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_HOUR, MAX_MONTH, MAX_OFFSET_MINUTES, MAX_TICKS, MAX_YEAR,
    MIN_YEAR, SEXAGESIMAL, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
use crate::prelude::*;

/// Where a [`Timestamp`] came from.
///
/// Only `Utc` values are allowed through the codec unchanged. `Unspecified`
/// values are taken to already be UTC when written; `Local` values are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum DateTimeKind {
    #[display(fmt = "Unspecified")]
    Unspecified,
    #[display(fmt = "Utc")]
    Utc,
    #[display(fmt = "Local")]
    Local,
}

/// Broken-down calendar fields of a date-time, without any zone.
///
/// `fraction` counts ticks (units of 100ns) within the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(
    fmt = "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{fraction:07}"
)]
pub struct Civil {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub fraction: u32,
}

impl Civil {
    /// Checks every field against the calendar.
    ///
    /// `hour` may be 24 only for the `24:00:00.0000000` form.
    ///
    /// # Errors
    /// Returns `Error::InvalidField` naming the first field that is out of
    /// range.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |field: &'static str, value: u32| Err(Error::InvalidField { field, value });

        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return invalid("year", self.year.into());
        }
        if !(1..=MAX_MONTH).contains(&self.month) {
            return invalid("month", self.month.into());
        }
        if !(1..=days_in_month(self.year, self.month)).contains(&self.day) {
            return invalid("day", self.day.into());
        }
        if self.hour > MAX_HOUR {
            return invalid("hour", self.hour.into());
        }
        if self.minute >= SEXAGESIMAL {
            return invalid("minute", self.minute.into());
        }
        if self.second >= SEXAGESIMAL {
            return invalid("second", self.second.into());
        }
        if u64::from(self.fraction) >= TICKS_PER_SECOND {
            return invalid("fraction", self.fraction);
        }
        if self.hour == MAX_HOUR && (self.minute, self.second, self.fraction) != (0, 0, 0) {
            return invalid("hour", self.hour.into());
        }
        Ok(())
    }

    /// Ticks since `0001-01-01T00:00:00`, without validation.
    fn ticks(&self) -> u64 {
        days_from_civil(self.year, self.month, self.day) * TICKS_PER_DAY
            + u64::from(self.hour) * TICKS_PER_HOUR
            + u64::from(self.minute) * TICKS_PER_MINUTE
            + u64::from(self.second) * TICKS_PER_SECOND
            + u64::from(self.fraction)
    }
}

/// A point in time as 100ns ticks since `0001-01-01T00:00:00`, tagged with
/// the kind of clock it was read from.
///
/// Ordering and equality take the kind into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    ticks: u64,
    kind:  DateTimeKind,
}

impl Timestamp {
    /// `0001-01-01T00:00:00Z`
    pub const MIN: Self = Self {
        ticks: 0,
        kind:  DateTimeKind::Utc,
    };

    /// `9999-12-31T23:59:59.9999999Z`
    pub const MAX: Self = Self {
        ticks: MAX_TICKS,
        kind:  DateTimeKind::Utc,
    };

    /// Creates a timestamp from a raw tick count.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if `ticks` is past `MAX_TICKS`.
    pub const fn new(ticks: u64, kind: DateTimeKind) -> Result<Self, Error> {
        if ticks > MAX_TICKS {
            return Err(Error::OutOfRange);
        }
        Ok(Self { ticks, kind })
    }

    /// Creates a UTC timestamp from a raw tick count.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if `ticks` is past `MAX_TICKS`.
    pub const fn utc(ticks: u64) -> Result<Self, Error> {
        Self::new(ticks, DateTimeKind::Utc)
    }

    /// Builds a timestamp from calendar fields. `24:00:00` is the first
    /// instant of the following day.
    ///
    /// # Errors
    /// Returns `Error::InvalidField` for an out of range field and
    /// `Error::OutOfRange` when `9999-12-31T24:00:00` would roll over into
    /// year 10000.
    pub fn from_civil(civil: Civil, kind: DateTimeKind) -> Result<Self, Error> {
        civil.validate()?;
        Self::new(civil.ticks(), kind)
    }

    #[inline]
    pub const fn ticks(self) -> u64 {
        self.ticks
    }

    #[inline]
    pub const fn kind(self) -> DateTimeKind {
        self.kind
    }

    /// Same instant, different kind. No conversion is applied.
    #[inline]
    pub const fn with_kind(self, kind: DateTimeKind) -> Self {
        Self { ticks: self.ticks, kind }
    }

    /// Splits the tick count back into calendar fields.
    pub fn to_civil(self) -> Civil {
        let (year, month, day) = civil_from_days(self.ticks / TICKS_PER_DAY);
        let rem = self.ticks % TICKS_PER_DAY;
        Civil {
            year,
            month,
            day,
            hour: (rem / TICKS_PER_HOUR) as u8,
            minute: (rem % TICKS_PER_HOUR / TICKS_PER_MINUTE) as u8,
            second: (rem % TICKS_PER_MINUTE / TICKS_PER_SECOND) as u8,
            fraction: (rem % TICKS_PER_SECOND) as u32,
        }
    }
}

/// A wall-clock reading together with its offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTimestamp {
    local:          u64,
    offset_minutes: i16,
}

impl OffsetTimestamp {
    /// Creates an offset timestamp from local calendar fields and an offset
    /// east of UTC in minutes (negative for west).
    ///
    /// # Errors
    /// Returns `Error::InvalidField` for an out of range field or offset.
    pub fn new(local: Civil, offset_minutes: i16) -> Result<Self, Error> {
        if offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES {
            return Err(Error::InvalidField {
                field: "offset",
                value: offset_minutes.unsigned_abs().into(),
            });
        }
        let local = Timestamp::from_civil(local, DateTimeKind::Unspecified)?;
        Ok(Self {
            local: local.ticks(),
            offset_minutes,
        })
    }

    #[inline]
    pub const fn offset_minutes(self) -> i16 {
        self.offset_minutes
    }

    /// The wall-clock reading, tagged `Unspecified`.
    pub const fn local(self) -> Timestamp {
        Timestamp {
            ticks: self.local,
            kind:  DateTimeKind::Unspecified,
        }
    }

    /// Resolves the reading to the instant it denotes in UTC.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the offset pushes the instant before
    /// year 1 or past year 9999.
    pub fn to_utc(self) -> Result<Timestamp, Error> {
        let shift = u64::from(self.offset_minutes.unsigned_abs()) * TICKS_PER_MINUTE;
        let ticks = if self.offset_minutes >= 0 {
            self.local.checked_sub(shift)
        } else {
            self.local.checked_add(shift)
        };
        Timestamp::utc(ticks.ok_or(Error::OutOfRange)?)
    }
}

/// Anything the codec knows how to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum DateValue {
    Timestamp(Timestamp),
    Offset(OffsetTimestamp),
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days elapsed from `0001-01-01` to the given proleptic Gregorian date.
///
/// Years are shifted to start in March so that the leap day falls at the
/// end of the year.
pub(crate) const fn days_from_civil(year: u16, month: u8, day: u8) -> u64 {
    let shifted = year as u64 - (month <= FEBRUARY) as u64;
    let era = shifted / GREGORIAN_CYCLE as u64;
    let yoe = shifted % GREGORIAN_CYCLE as u64;
    let mp = (month as u64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as u64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    // 0000-03-01 is 306 days before 0001-01-01.
    era * DAYS_PER_ERA + doe - 306
}

/// Inverse of [`days_from_civil`].
pub(crate) const fn civil_from_days(days: u64) -> (u16, u8, u8) {
    debug_assert!(days < DAYS_TO_YEAR_10000);

    let z = days + 306;
    let era = z / DAYS_PER_ERA;
    let doe = z % DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * GREGORIAN_CYCLE as u64 + (month <= FEBRUARY as u64) as u64;
    (year as u16, month as u8, day as u8)
}
