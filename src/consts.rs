/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Days in one full 400-year Gregorian cycle
pub(crate) const DAYS_PER_ERA: u64 = 146_097;

/// Largest hour accepted by the parser (only as `24:00:00`)
pub const MAX_HOUR: u8 = 24;
/// Minutes and seconds are both `0..60`
pub const SEXAGESIMAL: u8 = 60;

/// Largest offset from UTC a wall-clock reading may carry (14 hours)
pub const MAX_OFFSET_MINUTES: u16 = 14 * 60;

/// Number of fractional digits carried by a tick count
pub const MAX_FRACTION_DIGITS: usize = 7;

/// Scale factors used to right-pad a short fraction, indexed by the number
/// of digits that are missing.
pub(crate) const POW10: [u32; MAX_FRACTION_DIGITS] =
    [1, 10, 100, 1_000, 10_000, 100_000, 1_000_000];

/// One tick is 100 nanoseconds
pub const TICKS_PER_SECOND: u64 = 10_000_000;
pub const TICKS_PER_MINUTE: u64 = TICKS_PER_SECOND * 60;
pub const TICKS_PER_HOUR: u64 = TICKS_PER_MINUTE * 60;
pub const TICKS_PER_DAY: u64 = TICKS_PER_HOUR * 24;

/// Day number of `10000-01-01` counted from `0001-01-01`
pub(crate) const DAYS_TO_YEAR_10000: u64 = 3_652_059;

/// Last representable tick (`9999-12-31T23:59:59.9999999`)
pub const MAX_TICKS: u64 = DAYS_TO_YEAR_10000 * TICKS_PER_DAY - 1;

/// Date component separator
pub const DATE_SEPARATOR: u8 = b'-';
/// Separator between the date and time segments
pub const TIME_DESIGNATOR: u8 = b'T';
/// Time component separator
pub const TIME_SEPARATOR: u8 = b':';
/// Introduces the fractional seconds
pub const FRACTION_SEPARATOR: u8 = b'.';
/// Zone designator for UTC
pub const UTC_DESIGNATOR: u8 = b'Z';

/// Written pattern, always UTC with seven fraction digits
pub const UTC_PATTERN: &str = "yyyy-MM-ddTHH:mm:ss.fffffffZ";
/// Length in bytes of anything produced with `UTC_PATTERN`
pub const FORMATTED_LEN: usize = UTC_PATTERN.len();

/// Substituted for any non-ASCII byte when a window is rendered as text
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';
