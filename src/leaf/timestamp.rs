//! Lenient timestamp parsing for the `datetime` leaf
//!
//! Accepts machine formats (RFC 3339, RFC 2822, ISO-8601) and free-form
//! text such as `Wed Jul  8 08:52:01 EDT 2015` or `July 8th, 2015 8pm`.
//! Free-form input is tokenized; every token must be recognized, and the
//! collected parts must name a real calendar date and clock time. Parts
//! that are absent come from a default date; a lone weekday name moves
//! that date forward to the next matching day.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};

use super::errors::TimestampParseError;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Filler words skipped between components
const SKIP_WORDS: &[&str] = &["at", "on", "and", "of", "t"];

type ParseResult<T> = Result<T, TimestampParseError>;

/// Parses `input`, taking missing date parts from today (UTC).
pub fn parse(input: &str) -> ParseResult<DateTime<FixedOffset>> {
    parse_with_default(input, Utc::now().date_naive())
}

/// Parses `input`, taking missing date parts from `default`.
///
/// Inputs without a zone are read as UTC. A zone abbreviation that is not
/// in the built-in table is accepted after a clock time, also as UTC.
pub fn parse_with_default(input: &str, default: NaiveDate) -> ParseResult<DateTime<FixedOffset>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TimestampParseError::Empty);
    }

    if let Some(parsed) = parse_machine_format(input) {
        return Ok(parsed);
    }

    let mut parts = Parts::default();
    for token in input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        parts.push(token)?;
    }
    parts.build(default)
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn parse_machine_format(input: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(input) {
        return Some(parsed);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(utc().from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| utc().from_utc_datetime(&naive))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy)]
struct Clock {
    hour: u32,
    minute: u32,
    second: u32,
    nano: u32,
}

/// Components collected from free-form tokens.
#[derive(Debug, Default)]
struct Parts {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    clock: Option<Clock>,
    meridiem: Option<Meridiem>,
    offset: Option<FixedOffset>,
    zone_named: bool,
    /// Days from Monday
    weekday: Option<u32>,
    /// Unassigned 1-2 digit numbers, resolved once all tokens are seen
    numbers: Vec<u32>,
}

fn set_once<T>(slot: &mut Option<T>, value: T, what: &'static str) -> ParseResult<()> {
    if slot.is_some() {
        return Err(TimestampParseError::Duplicate(what));
    }
    *slot = Some(value);
    Ok(())
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

const WEEKDAY_ALIASES: &[(&str, usize)] = &[("tues", 1), ("thur", 3), ("thurs", 3)];
const MONTH_ALIASES: &[(&str, usize)] = &[("sept", 8)];

/// Index of a full name, 3-letter abbreviation or alias
fn lookup_name(names: &[&str], aliases: &[(&str, usize)], token: &str) -> Option<usize> {
    if token.len() < 3 {
        return None;
    }
    names
        .iter()
        .position(|name| *name == token || (token.len() == 3 && name.starts_with(token)))
        .or_else(|| {
            aliases
                .iter()
                .find(|(alias, _)| *alias == token)
                .map(|(_, idx)| *idx)
        })
}

fn zone_offset(token: &str) -> Option<i32> {
    let hours = match token {
        "utc" | "gmt" | "ut" | "z" => 0,
        "est" => -5,
        "edt" => -4,
        "cst" => -6,
        "cdt" => -5,
        "mst" => -7,
        "mdt" => -6,
        "pst" => -8,
        "pdt" => -7,
        _ => return None,
    };
    Some(hours * 3600)
}

/// `+HH`, `+HHMM` or `+HH:MM`, either sign
fn numeric_offset(token: &str) -> Option<FixedOffset> {
    let (sign, rest) = match token.as_bytes().first()? {
        b'+' => (1, &token[1..]),
        b'-' => (-1, &token[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !all_digits(&digits) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn two_digit_year(year: u32) -> i32 {
    if year <= 68 {
        2000 + year as i32
    } else {
        1900 + year as i32
    }
}

fn parse_year(s: &str) -> Option<i32> {
    match s.len() {
        4 => s.parse().ok(),
        1 | 2 => s.parse().ok().map(two_digit_year),
        _ => None,
    }
}

fn strip_ordinal(token: &str) -> &str {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if all_digits(stem) {
                return stem;
            }
        }
    }
    token
}

fn parse_clock(token: &str) -> Option<Clock> {
    let mut fields = token.split(':');
    let hour = fields.next().filter(|h| all_digits(h) && h.len() <= 2)?.parse().ok()?;
    let minute = fields.next().filter(|m| all_digits(m) && m.len() == 2)?.parse().ok()?;
    let (second, nano) = match fields.next() {
        None => (0, 0),
        Some(sec) => {
            let (whole, frac) = sec.split_once('.').unwrap_or((sec, ""));
            if !all_digits(whole) || whole.len() != 2 {
                return None;
            }
            let nano = if frac.is_empty() {
                0
            } else {
                if !all_digits(frac) {
                    return None;
                }
                let mut padded: String = frac.chars().take(9).collect();
                while padded.len() < 9 {
                    padded.push('0');
                }
                padded.parse().ok()?
            };
            (whole.parse().ok()?, nano)
        }
    };
    if fields.next().is_some() {
        return None;
    }
    Some(Clock {
        hour,
        minute,
        second,
        nano,
    })
}

impl Parts {
    fn push(&mut self, raw: &str) -> ParseResult<()> {
        let trimmed = raw.trim_end_matches('.');
        let lower = trimmed.to_ascii_lowercase();
        let unknown = || TimestampParseError::UnknownToken(raw.to_string());

        if lower.is_empty() || SKIP_WORDS.contains(&lower.as_str()) {
            return Ok(());
        }
        if let Some(idx) = lookup_name(&WEEKDAYS, WEEKDAY_ALIASES, &lower) {
            return set_once(&mut self.weekday, idx as u32, "weekday");
        }
        if let Some(idx) = lookup_name(&MONTHS, MONTH_ALIASES, &lower) {
            return set_once(&mut self.month, idx as u32 + 1, "month");
        }
        match lower.as_str() {
            "am" | "a.m" => return set_once(&mut self.meridiem, Meridiem::Am, "meridiem"),
            "pm" | "p.m" => return set_once(&mut self.meridiem, Meridiem::Pm, "meridiem"),
            _ => {}
        }
        if let Some(seconds) = zone_offset(&lower) {
            return self.set_zone(seconds);
        }
        if let Some(offset) = numeric_offset(trimmed) {
            return set_once(&mut self.offset, offset, "zone");
        }
        if self.could_be_zone_name(trimmed) {
            self.zone_named = true;
            return Ok(());
        }

        if lower.contains(':') {
            let (clock_text, meridiem) = split_meridiem(&lower);
            let clock = parse_clock(clock_text).ok_or_else(unknown)?;
            set_once(&mut self.clock, clock, "time")?;
            if let Some(meridiem) = meridiem {
                set_once(&mut self.meridiem, meridiem, "meridiem")?;
            }
            return Ok(());
        }
        if lower.contains('-') || lower.contains('/') || lower.contains('.') {
            return self.push_date(&lower).ok_or_else(unknown)?;
        }

        let (number_text, meridiem) = split_meridiem(&lower);
        if let Some(meridiem) = meridiem {
            // "8pm"
            let hour: u32 = number_text
                .parse()
                .ok()
                .filter(|_| all_digits(number_text) && number_text.len() <= 2)
                .ok_or_else(unknown)?;
            let clock = Clock {
                hour,
                minute: 0,
                second: 0,
                nano: 0,
            };
            set_once(&mut self.clock, clock, "time")?;
            return set_once(&mut self.meridiem, meridiem, "meridiem");
        }

        let digits = strip_ordinal(&lower);
        if !all_digits(digits) {
            return Err(unknown());
        }
        match digits.len() {
            1 | 2 => {
                self.numbers.push(digits.parse().map_err(|_| unknown())?);
                Ok(())
            }
            4 => set_once(&mut self.year, digits.parse().map_err(|_| unknown())?, "year"),
            8 => {
                let year = digits[..4].parse().map_err(|_| unknown())?;
                let month = digits[4..6].parse().map_err(|_| unknown())?;
                let day = digits[6..].parse().map_err(|_| unknown())?;
                set_once(&mut self.year, year, "year")?;
                set_once(&mut self.month, month, "month")?;
                set_once(&mut self.day, day, "day")
            }
            _ => Err(unknown()),
        }
    }

    fn set_zone(&mut self, seconds: i32) -> ParseResult<()> {
        let offset = FixedOffset::east_opt(seconds)
            .ok_or_else(|| TimestampParseError::UnknownToken(seconds.to_string()))?;
        set_once(&mut self.offset, offset, "zone")
    }

    /// Short all-caps word after a clock time, e.g. `CEST`
    fn could_be_zone_name(&self, token: &str) -> bool {
        self.clock.is_some()
            && self.offset.is_none()
            && !self.zone_named
            && (3..=5).contains(&token.len())
            && token.bytes().all(|b| b.is_ascii_uppercase())
    }

    /// `Y-M-D`, `M/D/Y`, `M/D` and the like; `None` if not a date
    fn push_date(&mut self, token: &str) -> Option<ParseResult<()>> {
        let fields: Vec<&str> = token.split(|c| matches!(c, '-' | '/' | '.')).collect();
        if fields.iter().any(|f| !all_digits(f)) {
            return None;
        }
        let (year, month, day) = match fields.as_slice() {
            [y, m, d] if y.len() == 4 => (Some(parse_year(y)?), m.parse().ok()?, d.parse().ok()?),
            [m, d, y] if m.len() <= 2 && d.len() <= 2 => {
                (Some(parse_year(y)?), m.parse().ok()?, d.parse().ok()?)
            }
            [m, d] if m.len() <= 2 && d.len() <= 2 => (None, m.parse().ok()?, d.parse().ok()?),
            _ => return None,
        };
        let result = (|| {
            if let Some(year) = year {
                set_once(&mut self.year, year, "year")?;
            }
            set_once(&mut self.month, month, "month")?;
            set_once(&mut self.day, day, "day")
        })();
        Some(result)
    }

    fn resolve_numbers(&mut self) -> ParseResult<()> {
        let numbers = std::mem::take(&mut self.numbers);
        let mut rest = numbers.into_iter();
        if self.month.is_none() && self.day.is_none() && rest.len() >= 2 {
            self.month = rest.next();
        }
        for n in rest {
            if self.day.is_none() {
                self.day = Some(n);
            } else if self.month.is_none() {
                self.month = Some(n);
            } else if self.year.is_none() {
                self.year = Some(two_digit_year(n));
            } else {
                return Err(TimestampParseError::UnknownToken(n.to_string()));
            }
        }
        Ok(())
    }

    fn build(mut self, default: NaiveDate) -> ParseResult<DateTime<FixedOffset>> {
        self.resolve_numbers()?;

        let has_date = self.year.is_some()
            || self.month.is_some()
            || self.day.is_some()
            || self.weekday.is_some();
        if !has_date && self.clock.is_none() {
            return Err(TimestampParseError::NoComponents);
        }

        let year = self.year.unwrap_or_else(|| default.year());
        let month = self.month.unwrap_or_else(|| default.month());
        let day = match self.day {
            Some(day) => day,
            None => clamp_day(year, month, default.day()),
        };
        let mut date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(TimestampParseError::InvalidDate { year, month, day })?;
        // A weekday only moves the date when no day was given: it picks the
        // first matching day on or after the date built so far.
        if let (Some(target), None) = (self.weekday, self.day) {
            let ahead = (target + 7 - date.weekday().num_days_from_monday()) % 7;
            date = date
                .checked_add_days(Days::new(u64::from(ahead)))
                .ok_or(TimestampParseError::InvalidDate { year, month, day })?;
        }

        let clock = self.clock.unwrap_or(Clock {
            hour: 0,
            minute: 0,
            second: 0,
            nano: 0,
        });
        let hour = match self.meridiem {
            None => clock.hour,
            Some(_) if clock.hour == 0 || clock.hour > 12 => {
                return Err(TimestampParseError::InvalidTime {
                    hour: clock.hour,
                    minute: clock.minute,
                    second: clock.second,
                })
            }
            Some(Meridiem::Am) => clock.hour % 12,
            Some(Meridiem::Pm) => clock.hour % 12 + 12,
        };
        let time = NaiveTime::from_hms_nano_opt(hour, clock.minute, clock.second, clock.nano)
            .ok_or(TimestampParseError::InvalidTime {
                hour,
                minute: clock.minute,
                second: clock.second,
            })?;

        let offset = self.offset.unwrap_or_else(utc);
        offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .ok_or(TimestampParseError::InvalidDate { year, month, day })
    }
}

fn split_meridiem(token: &str) -> (&str, Option<Meridiem>) {
    if let Some(stem) = token.strip_suffix("am") {
        (stem, Some(Meridiem::Am))
    } else if let Some(stem) = token.strip_suffix("pm") {
        (stem, Some(Meridiem::Pm))
    } else {
        (token, None)
    }
}

/// Largest valid day of `year-month` not above `day`
fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    (28..=day.max(28))
        .rev()
        .find(|d| NaiveDate::from_ymd_opt(year, month, *d).is_some())
        .map_or(day, |d| d.min(day))
}
