//! Duration Parser — turns free-text work periods ("2019 - 2022", "03/2021 - Present",
//! "Jan 2023 -") into fractional years relative to a fixed reference month.
//!
//! Rules are tried in a fixed precedence order; the first one that matches wins.
//! The parser never calls the LLM and is usable for local pre-checks.

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Tokens meaning "still employed here".
const PRESENT_TOKENS: [&str; 4] = ["present", "current", "now", "ongoing"];

/// Assumed duration when only the current year is mentioned.
const CURRENT_YEAR_ONLY_YEARS: f64 = 0.5;
/// Assumed duration when only a past year is mentioned.
const PAST_YEAR_ONLY_YEARS: f64 = 1.0;

static MONTH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(\d{4})\b",
    )
    .expect("month name pattern")
});
static OPEN_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^/\d])(\d{4})\s*[-–—]$").expect("open year pattern"));
static YEAR_TO_PRESENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^/\d])(\d{4})\s*(?:-|–|—|to)\s*(?:present|current|now|ongoing)\b")
        .expect("year to present pattern")
});
static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^/\d])(\d{4})\s*(?:-|–|—|to)\s*(\d{4})(?:[^/\d]|$)")
        .expect("year range pattern")
});
static MONTH_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})/(\d{4})\s*(?:-|–|—|to)\s*(\d{1,2})/(\d{4})")
        .expect("month range pattern")
});
static OPEN_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})/(\d{4})\s*(?:-|–|—|to)\s*(?:present|current|now|ongoing)?$")
        .expect("open month pattern")
});
static ANY_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("year pattern"));

/// A calendar month, used as the parser's notion of "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }
}

/// Result of parsing a duration expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedDuration {
    Years(f64),
    /// The expression was only a present-like token; the caller must compute
    /// the duration from the paired start date.
    DeferToStart,
}

impl ParsedDuration {
    /// Plain year count; the deferred sentinel counts as zero.
    pub fn years(self) -> f64 {
        match self {
            ParsedDuration::Years(years) => years,
            ParsedDuration::DeferToStart => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DurationParser {
    now: YearMonth,
}

impl DurationParser {
    pub fn new(now: YearMonth) -> Self {
        Self { now }
    }

    pub fn parse(&self, text: &str) -> ParsedDuration {
        let normalized = normalize(text);

        if PRESENT_TOKENS.contains(&normalized.as_str()) {
            return ParsedDuration::DeferToStart;
        }

        let months = self
            .open_year(&normalized)
            .or_else(|| self.year_to_present(&normalized))
            .or_else(|| year_range(&normalized))
            .or_else(|| month_range(&normalized))
            .or_else(|| self.open_month(&normalized));

        if let Some(months) = months {
            return ParsedDuration::Years(months_to_years(months));
        }

        let years = match ANY_YEAR
            .captures(&normalized)
            .and_then(|caps| capture_i32(&caps, 1))
        {
            Some(year) if year == self.now.year => CURRENT_YEAR_ONLY_YEARS,
            Some(_) => PAST_YEAR_ONLY_YEARS,
            None => 0.0,
        };
        ParsedDuration::Years(years)
    }

    /// Convenience wrapper returning a plain number.
    pub fn years(&self, text: &str) -> f64 {
        self.parse(text).years()
    }

    /// Months from January of `start_year` up to the reference month.
    fn months_since_year(&self, start_year: i32) -> i64 {
        i64::from(self.now.year - start_year) * 12 + i64::from(self.now.month) - 1
    }

    // `YYYY-`
    fn open_year(&self, text: &str) -> Option<i64> {
        let caps = OPEN_YEAR.captures(text)?;
        Some(self.months_since_year(capture_i32(&caps, 1)?))
    }

    // `YYYY to Present`
    fn year_to_present(&self, text: &str) -> Option<i64> {
        let caps = YEAR_TO_PRESENT.captures(text)?;
        Some(self.months_since_year(capture_i32(&caps, 1)?))
    }

    // `MM/YYYY-` or `MM/YYYY - Present`
    fn open_month(&self, text: &str) -> Option<i64> {
        let caps = OPEN_MONTH.captures(text)?;
        let start = YearMonth::new(capture_i32(&caps, 2)?, capture_u32(&caps, 1)?)?;
        Some(months_between(start, self.now))
    }
}

// `YYYY-YYYY`
fn year_range(text: &str) -> Option<i64> {
    let caps = YEAR_RANGE.captures(text)?;
    let start = capture_i32(&caps, 1)?;
    let end = capture_i32(&caps, 2)?;
    Some(i64::from(end - start) * 12)
}

// `MM/YYYY-MM/YYYY`
fn month_range(text: &str) -> Option<i64> {
    let caps = MONTH_RANGE.captures(text)?;
    let start = YearMonth::new(capture_i32(&caps, 2)?, capture_u32(&caps, 1)?)?;
    let end = YearMonth::new(capture_i32(&caps, 4)?, capture_u32(&caps, 3)?)?;
    Some(months_between(start, end))
}

fn months_between(start: YearMonth, end: YearMonth) -> i64 {
    i64::from(end.year - start.year) * 12 + i64::from(end.month) - i64::from(start.month)
}

fn months_to_years(months: i64) -> f64 {
    months.max(0) as f64 / 12.0
}

/// Lowercases, trims, and rewrites "Mar 2021" style dates as "03/2021".
fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    MONTH_NAME
        .replace_all(&lowered, |caps: &Captures| {
            let month = month_number(&caps[1][..3]);
            format!("{month:02}/{}", &caps[2])
        })
        .into_owned()
}

fn month_number(prefix: &str) -> u32 {
    match prefix {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        _ => 12,
    }
}

fn capture_i32(caps: &Captures, index: usize) -> Option<i32> {
    caps.get(index)?.as_str().parse().ok()
}

fn capture_u32(caps: &Captures, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}
