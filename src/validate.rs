//! Value validators for command-line arguments.
//!
//! Every validator turns one raw argument into a typed value or rejects it
//! with an [`Error::Validation`] whose message quotes the raw text. They are
//! plugged into clap as `value_parser`s, so a rejected value stops the
//! program before any request is made.

use std::{fmt::Display, path::Path, str::FromStr, sync::LazyLock};

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone};
use reqwest::Url;

use crate::{
    Res,
    error::Error,
    sniff::{ImageFile, Sniffer},
};

/// Value standing for "no delay" when the delay argument is empty.
pub const NO_DELAY: &str = "0001-01-01T00:00:00Z";

static SNIFFER: LazyLock<Sniffer> = LazyLock::new(Sniffer::standard);

/// Accepts numbers of kind `T` that are greater than or equal to a lower bound.
///
/// There is no upper bound. Values that do not compare with the bound (such
/// as `NaN`) are rejected.
#[derive(Debug, Clone, Copy)]
pub struct PositiveNumber<T> {
    min: T,
}

impl<T> PositiveNumber<T>
where
    T: FromStr + PartialOrd + Copy,
{
    pub fn new(min: T) -> Self {
        Self { min }
    }

    pub fn parse(&self, raw: &str) -> Res<T> {
        match raw.trim().parse::<T>() {
            Ok(value) if value >= self.min => Ok(value),
            _ => Err(Error::Validation(format!(
                "\"{raw}\" is not a positive number"
            ))),
        }
    }
}

impl<T: FromStr + PartialOrd + Copy + Default> Default for PositiveNumber<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Real number `>= 0`.
pub fn parse_positive_real(raw: &str) -> Res<f64> {
    PositiveNumber::<f64>::default().parse(raw)
}

/// Integer `>= 0`.
pub fn parse_positive_integer(raw: &str) -> Res<u64> {
    PositiveNumber::<u64>::default().parse(raw)
}

/// Parses an ISO-8601 date-time and returns it in canonical form.
///
/// # Accepted Input
///
/// - Empty text, meaning "no delay", which maps to [`NO_DELAY`]
/// - A date in extended (`2024-03-01`) or basic (`20240301`) form, taken as
///   midnight when nothing follows
/// - A date, one separator character (usually `T`) and a time of day given
///   as `HH`, `HH:MM`, `HH:MM:SS` or the basic `HHMM`/`HHMMSS`, optionally
///   with up to nine fractional digits after the seconds
/// - An optional offset after the time: `Z`, `+HH`, `+HH:MM`, `+HHMM`, or
///   the same with seconds
///
/// Date-times with an offset come back as RFC 3339 with a numeric offset,
/// the others as `YYYY-MM-DDTHH:MM:SS`. Fractional seconds are kept only
/// when non-zero.
///
/// # Example
///
/// ```
/// assert_eq!(parse_datetime("")?, NO_DELAY);
/// assert_eq!(parse_datetime("2024-03-01")?, "2024-03-01T00:00:00");
/// assert_eq!(parse_datetime("2024-03-01T12:00Z")?, "2024-03-01T12:00:00+00:00");
/// assert_eq!(parse_datetime("20240301T1200")?, "2024-03-01T12:00:00");
/// ```
pub fn parse_datetime(raw: &str) -> Res<String> {
    if raw.is_empty() {
        return Ok(NO_DELAY.to_string());
    }

    iso_datetime(raw).ok_or_else(|| {
        Error::Validation(format!("\"{raw}\" is not a valid ISO date-time"))
    })
}

fn iso_datetime(raw: &str) -> Option<String> {
    // all slicing below relies on one byte per character
    if !raw.is_ascii() {
        return None;
    }

    let (date, rest) = iso_date(raw)?;
    if rest.is_empty() {
        return Some(canonical_naive(date.and_hms_opt(0, 0, 0)?));
    }

    let (time, offset) = match rest[1..].find(['Z', 'z', '+', '-']) {
        Some(i) => (&rest[1..=i], Some(&rest[i + 1..])),
        None => (&rest[1..], None),
    };
    let naive = date.and_time(iso_time(time)?);

    match offset {
        None => Some(canonical_naive(naive)),
        Some(offset) => {
            let dt = iso_offset(offset)?.from_local_datetime(&naive).single()?;
            Some(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
        }
    }
}

fn iso_date(raw: &str) -> Option<(NaiveDate, &str)> {
    let (year, month, day, rest) = if raw.get(4..5) == Some("-") {
        if raw.get(7..8) != Some("-") {
            return None;
        }
        (raw.get(..4)?, raw.get(5..7)?, raw.get(8..10)?, raw.get(10..)?)
    } else {
        (raw.get(..4)?, raw.get(4..6)?, raw.get(6..8)?, raw.get(8..)?)
    };

    let date = NaiveDate::from_ymd_opt(digits(year)? as i32, digits(month)?, digits(day)?)?;
    Some((date, rest))
}

fn iso_time(time: &str) -> Option<NaiveTime> {
    let (clock, fraction) = match time.find(['.', ',']) {
        Some(i) => (&time[..i], Some(&time[i + 1..])),
        None => (time, None),
    };

    let fields = two_digit_fields(clock)?;
    let mut hms = [0u32; 3];
    for (slot, field) in hms.iter_mut().zip(&fields) {
        *slot = digits(field)?;
    }

    let nanos = match fraction {
        Some(f) if fields.len() == 3 && (1..=9).contains(&f.len()) => {
            digits(f)? * 10u32.pow(9 - f.len() as u32)
        }
        Some(_) => return None,
        None => 0,
    };

    NaiveTime::from_hms_nano_opt(hms[0], hms[1], hms[2], nanos)
}

fn iso_offset(offset: &str) -> Option<FixedOffset> {
    if offset.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }

    let sign = match offset.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let mut seconds = 0;
    for (field, unit) in two_digit_fields(&offset[1..])?.iter().zip([3600, 60, 1]) {
        let value = digits(field)? as i32;
        if unit < 3600 && value >= 60 {
            return None;
        }
        seconds += value * unit;
    }
    FixedOffset::east_opt(sign * seconds)
}

/// Splits `HH[:MM[:SS]]` or `HH[MM[SS]]` into its fields.
fn two_digit_fields(s: &str) -> Option<Vec<&str>> {
    let fields: Vec<&str> = if s.contains(':') {
        s.split(':').collect()
    } else {
        (0..s.len())
            .step_by(2)
            .map(|i| s.get(i..i + 2))
            .collect::<Option<_>>()?
    };

    let valid = (1..=3).contains(&fields.len()) && fields.iter().all(|f| f.len() == 2);
    valid.then_some(fields)
}

fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn canonical_naive(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Accepts absolute URLs that have a host, e.g. `https://example.com/raw`.
pub fn parse_url(raw: &str) -> Res<String> {
    match Url::parse(raw) {
        Ok(url) if url.has_host() => Ok(raw.to_string()),
        _ => Err(Error::Validation(format!("\"{raw}\" is not a valid URL"))),
    }
}

/// Opens `raw` as an image file checked against the standard signatures.
pub fn parse_image_file(raw: &str) -> Res<ImageFile> {
    open_image(raw, &SNIFFER)
}

/// Same as [`parse_image_file`] with an explicit sniffer.
///
/// I/O failures are reported with the offending path so that clap can show
/// a useful message.
pub fn open_image(path: impl AsRef<Path>, sniffer: &Sniffer) -> Res<ImageFile> {
    let path = path.as_ref();
    ImageFile::open(path, sniffer).map_err(|e| match e {
        Error::Io(io) => Error::Validation(with_path(path.display(), io)),
        other => other,
    })
}

fn with_path(path: impl Display, err: std::io::Error) -> String {
    format!("can't open \"{path}\": {err}")
}
