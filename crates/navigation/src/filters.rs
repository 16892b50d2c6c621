//! Filter selection and its URL form.
//!
//! The URL shape is `/videos[?city=<string>][&year=<int>][&month=<int>]`.
//! A parameter is present only when its value is non-empty / non-zero, and the
//! order is always city, year, month. Shared links depend on this exact form.

use crate::{NavigationError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Path the filtered video list lives under.
pub const DEFAULT_BASE_PATH: &str = "/videos";

/// The (city, year, month) triple selecting which videos are shown.
///
/// Empty city and zero year/month mean "no filter" on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub month: u32,
}

impl FilterState {
    pub fn new(city: impl Into<String>, year: u32, month: u32) -> Self {
        Self {
            city: city.into(),
            year,
            month,
        }
    }

    /// True when no field filters anything.
    pub fn is_empty(&self) -> bool {
        self.city.is_empty() && self.year == 0 && self.month == 0
    }

    /// Query string without the leading `?`; empty when no filter is set.
    ///
    /// # Example
    /// ```
    /// use clipmap_navigation::FilterState;
    ///
    /// assert_eq!(FilterState::new("Juneau", 2020, 0).query_string(), "city=Juneau&year=2020");
    /// assert_eq!(FilterState::new("", 0, 7).query_string(), "month=7");
    /// ```
    pub fn query_string(&self) -> String {
        let mut params: Vec<String> = Vec::with_capacity(3);

        if !self.city.is_empty() {
            params.push(format!("city={}", escape_component(&self.city)));
        }
        if self.year != 0 {
            params.push(format!("year={}", self.year));
        }
        if self.month != 0 {
            params.push(format!("month={}", self.month));
        }

        params.join("&")
    }

    /// `base` followed by the query string, if there is one.
    pub fn to_path(&self, base: &str) -> String {
        let query = self.query_string();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, query)
        }
    }

    /// Decodes a query string, with or without its leading `?`.
    ///
    /// Unknown parameters are ignored; a repeated parameter keeps its last value.
    pub fn from_query(search: &str) -> Result<Self> {
        let query = search.strip_prefix('?').unwrap_or(search);
        let mut filters = Self::default();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "city" => filters.city = unescape_component(value)?,
                "year" => filters.year = parse_number(key, value)?,
                "month" => {
                    let month = parse_number(key, value)?;
                    if month > 12 {
                        return Err(NavigationError::InvalidQuery(format!(
                            "month {} is not in 1..=12",
                            month
                        )));
                    }
                    filters.month = month;
                }
                _ => {}
            }
        }

        Ok(filters)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| NavigationError::InvalidQuery(format!("{}={:?} is not a number", key, value)))
}

/// Escapes the characters that would break the query string apart.
/// Plain names come back borrowed and unchanged.
fn escape_component(value: &str) -> Cow<'_, str> {
    const RESERVED: &[char] = &['%', ' ', '&', '#', '?', '/', '=', '+'];

    if !value.contains(RESERVED) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            ' ' => escaped.push_str("%20"),
            '&' => escaped.push_str("%26"),
            '#' => escaped.push_str("%23"),
            '?' => escaped.push_str("%3F"),
            '/' => escaped.push_str("%2F"),
            '=' => escaped.push_str("%3D"),
            '+' => escaped.push_str("%2B"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Decodes `%XX` sequences and `+` (as a space, the way browsers submit forms).
fn unescape_component(value: &str) -> Result<String> {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| {
                        NavigationError::InvalidQuery(format!("bad escape sequence in {:?}", value))
                    })?;
                decoded.push(hex);
                i += 3;
            }
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b => {
                decoded.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded)
        .map_err(|_| NavigationError::InvalidQuery(format!("{:?} is not UTF-8 once decoded", value)))
}
