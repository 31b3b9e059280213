// File: src/filter.rs
// Purpose: Value filters declared with data-filters, applied before validation

use serde::Serialize;

/// A transformation applied to the submitted value before any validator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    StringTrim,
    StringToLower,
    StringToUpper,
    Digits,
    StripNewlines,
}

impl Filter {
    /// Look up a filter by its markup name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "stringtrim" => Some(Filter::StringTrim),
            "stringtolower" => Some(Filter::StringToLower),
            "stringtoupper" => Some(Filter::StringToUpper),
            "digits" => Some(Filter::Digits),
            "stripnewlines" => Some(Filter::StripNewlines),
            _ => None,
        }
    }

    pub fn apply(&self, value: &str) -> String {
        match self {
            Filter::StringTrim => value.trim().to_string(),
            Filter::StringToLower => value.to_lowercase(),
            Filter::StringToUpper => value.to_uppercase(),
            Filter::Digits => value.chars().filter(char::is_ascii_digit).collect(),
            Filter::StripNewlines => value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect(),
        }
    }
}

/// Split a `data-filters` value on `|` or `,`, dropping blanks
pub fn split_names(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(['|', ','])
        .map(str::trim)
        .filter(|name| !name.is_empty())
}
