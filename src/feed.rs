use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::types::{Draw, GroundingSource, Prize};

/// Lower tiers, in the order they are published after the consolation prize.
pub const NUMBERED_TIERS: [&str; 8] = ["2nd", "3rd", "4th", "5th", "6th", "7th", "8th", "9th"];

#[derive(Deserialize, Debug)]
pub struct HistoryResponse {
    #[serde(default)]
    pub items: Vec<FeedDraw>,
}

#[derive(Deserialize, Debug)]
pub struct FeedDraw {
    pub draw_code: Option<String>,
    pub draw_name: Option<String>,
    pub draw_date: String,
    pub first: Option<FirstPrize>,
    pub first_ticket: Option<String>,
    #[serde(default)]
    pub prizes: FeedPrizes,
    pub sources: Option<Vec<GroundingSource>>,
}

#[derive(Deserialize, Debug)]
pub struct FirstPrize {
    pub ticket: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct FeedPrizes {
    #[serde(default)]
    pub amounts: HashMap<String, Value>,
    /// `consolation`, `2nd` .. `9th`, each a list of winning numbers.
    #[serde(flatten)]
    pub lists: HashMap<String, Value>,
}

impl FeedPrizes {
    fn amount(&self, key: &str) -> u64 {
        match self.amounts.get(key) {
            Some(Value::String(text)) => parse_amount(text),
            Some(Value::Number(number)) => match number.as_u64() {
                Some(amount) => amount,
                // whole rupees; fractions are dropped, negatives are 0
                None => number.as_f64().map(|f| f.max(0.0) as u64).unwrap_or(0),
            },
            _ => 0,
        }
    }

    fn numbers(&self, key: &str) -> Option<Vec<String>> {
        let list = self.lists.get(key)?.as_array()?;
        Some(
            list.iter()
                .filter_map(|n| n.as_str())
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Keeps the digits of an amount label like `"₹75,00,000/-"`. Empty means 0,
/// anything past `u64::MAX` saturates.
pub fn parse_amount(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or_else(|_| {
        debug!("Amount {} does not fit, saturating", text);
        u64::MAX
    })
}

fn leading_number(text: &str) -> u32 {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl FeedDraw {
    pub fn into_draw(self) -> Result<Draw> {
        let date = NaiveDate::parse_from_str(&self.draw_date, "%Y-%m-%d")
            .with_context(|| format!("Invalid draw_date: {}", self.draw_date))?;

        let mut prizes = Vec::new();

        let first_ticket = non_empty(self.first.and_then(|f| f.ticket))
            .or_else(|| non_empty(self.first_ticket));
        if let Some(ticket) = first_ticket {
            prizes.push(Prize::new("1st Prize", self.prizes.amount("1st"), [ticket]));
        }

        if let Some(numbers) = self.prizes.numbers("consolation") {
            prizes.push(Prize::new(
                "Consolation Prize",
                self.prizes.amount("consolation"),
                numbers,
            ));
        }

        for key in NUMBERED_TIERS {
            if let Some(numbers) = self.prizes.numbers(key) {
                let category = format!("{} Prize", key);
                prizes.push(Prize::new(&category, self.prizes.amount(key), numbers));
            }
        }

        let code = non_empty(self.draw_code);
        let (series, draw_number) = match code.as_deref() {
            Some(code) => {
                let mut parts = code.split('-');
                let series = parts.next().unwrap_or_default().to_string();
                let number = parts.next().map(leading_number).unwrap_or(0);
                (series, number)
            }
            None => (String::new(), 0),
        };

        let draw = Draw {
            id: code.unwrap_or_else(|| format!("ID-{}", self.draw_date)),
            name: self.draw_name.unwrap_or_default(),
            series,
            draw_number,
            date,
            prizes,
            sources: self.sources.unwrap_or_default(),
        };

        debug!(
            "Mapped feed draw {} ({}) with {} prize tiers",
            draw.id,
            draw.date,
            draw.prizes.len()
        );
        Ok(draw)
    }
}

/// Maps one feed item into a [`Draw`].
pub fn parse_draw(raw_json: &str) -> Result<Draw> {
    let item: FeedDraw = serde_json::from_str(raw_json).context("Invalid draw JSON")?;
    item.into_draw()
}

/// Maps a `{ "items": [...] }` history page, keeping the feed's order.
pub fn parse_history(raw_json: &str) -> Result<Vec<Draw>> {
    let page: HistoryResponse =
        serde_json::from_str(raw_json).context("Invalid history JSON")?;
    page.items.into_iter().map(FeedDraw::into_draw).collect()
}
