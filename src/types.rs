use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::normalize;

/// Length of a bare winning suffix such as `"1122"`.
pub const SUFFIX_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draw {
    pub id: String,
    pub name: String,
    pub series: String,
    pub draw_number: u32,
    pub date: NaiveDate,
    /// Publication order. Never reordered.
    pub prizes: Vec<Prize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<GroundingSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub category: String,
    pub amount: u64,
    pub numbers: Vec<WinningNumber>,
}

impl Prize {
    pub fn new<I, S>(category: &str, amount: u64, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.to_string(),
            amount,
            numbers: numbers
                .into_iter()
                .map(|n| WinningNumber::new(n.into()))
                .collect(),
        }
    }
}

/// A published winning number, kept as the provider wrote it alongside the
/// comparison rule it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct WinningNumber {
    raw: String,
    entry: WinningEntry,
}

impl WinningNumber {
    pub fn new(raw: String) -> Self {
        let entry = WinningEntry::classify(&raw);
        Self { raw, entry }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn entry(&self) -> &WinningEntry {
        &self.entry
    }
}

impl From<String> for WinningNumber {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for WinningNumber {
    fn from(raw: &str) -> Self {
        Self::new(raw.to_string())
    }
}

impl From<WinningNumber> for String {
    fn from(number: WinningNumber) -> Self {
        number.raw
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinningEntry {
    /// Whole normalized ticket, e.g. `WN123456`.
    Full(String),
    /// Any ticket ending in these characters wins.
    Suffix([char; SUFFIX_LEN]),
}

impl WinningEntry {
    pub fn classify(raw: &str) -> Self {
        let normalized = normalize(raw);
        let chars: Vec<char> = normalized.chars().collect();
        match <[char; SUFFIX_LEN]>::try_from(chars.as_slice()) {
            Ok(suffix) => WinningEntry::Suffix(suffix),
            Err(_) => WinningEntry::Full(normalized),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Win,
    Miss,
}

/// Outcome of checking one ticket against one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    Win(&'a Prize),
    Miss,
}

impl<'a> Verdict<'a> {
    pub fn status(&self) -> CheckStatus {
        match self {
            Verdict::Win(_) => CheckStatus::Win,
            Verdict::Miss => CheckStatus::Miss,
        }
    }

    pub fn prize(&self) -> Option<&'a Prize> {
        match self {
            Verdict::Win(prize) => Some(*prize),
            Verdict::Miss => None,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Verdict::Win(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MissType {
    One,
    Two,
    Shuffle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseMiss {
    pub prize_category: String,
    pub prize_amount: u64,
    pub winning_number: String,
    pub diff_count: usize,
    pub miss_type: MissType,
}
