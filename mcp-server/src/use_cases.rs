use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use lotto_check::{CloseMissBuckets, Draw, DrawProvider, close_misses, parse_draw, verify};

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| anyhow!("Invalid date {} (expected YYYY-MM-DD): {}", date, e))
}

fn draw_summary(draw: &Draw) -> Value {
    json!({
        "id": draw.id,
        "name": draw.name,
        "series": draw.series,
        "drawNumber": draw.draw_number,
        "date": draw.date,
    })
}

pub struct TicketUseCase {
    provider: Arc<dyn DrawProvider>,
}

impl TicketUseCase {
    pub fn new(provider: Arc<dyn DrawProvider>) -> Self {
        Self { provider }
    }

    pub async fn check_ticket(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let ticket_number = arguments
            .get("ticket_number")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Missing ticket_number parameter"))?;

        let draw = match arguments.get("date").and_then(|v| v.as_str()) {
            Some(date) => {
                let date = parse_date(date)?;
                self.provider
                    .get_draw_by_date(date)?
                    .ok_or_else(|| anyhow!("No draw found for date: {}", date))?
            }
            None => self
                .provider
                .latest_draw()?
                .ok_or_else(|| anyhow!("No draws available"))?,
        };

        let verdict = verify(&draw, ticket_number);
        let misses = if verdict.is_win() {
            Vec::new()
        } else {
            close_misses(&draw, ticket_number)
        };
        let buckets = CloseMissBuckets::split(&misses);

        info!(
            "🎫 Checked ticket against {} ({}): {:?}, {} close misses",
            draw.id,
            draw.date,
            verdict.status(),
            misses.len()
        );

        Ok(json!({
            "success": true,
            "ticket_number": ticket_number,
            "draw": draw_summary(&draw),
            "status": verdict.status(),
            "prize": verdict.prize(),
            "close_misses": misses,
            "buckets": buckets,
        })
        .to_string())
    }
}

pub struct DrawUseCase {
    provider: Arc<dyn DrawProvider>,
    default_limit: usize,
}

impl DrawUseCase {
    pub fn new(provider: Arc<dyn DrawProvider>, default_limit: usize) -> Self {
        Self {
            provider,
            default_limit,
        }
    }

    pub async fn get_latest_draws(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let limit = arguments
            .get("limit")
            .and_then(|v| v.as_u64())
            .map(|l| l as usize)
            .unwrap_or(self.default_limit);

        let offset = arguments
            .get("offset")
            .and_then(|v| v.as_u64())
            .map(|o| o as usize)
            .unwrap_or(0);

        let draws = self.provider.list_draws(limit, offset)?;

        Ok(json!({
            "success": true,
            "count": draws.len(),
            "draws": draws
        })
        .to_string())
    }

    pub async fn get_draw_by_date(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let date = arguments
            .get("date")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Missing date parameter"))?;

        let date = parse_date(date)?;
        let draw = self
            .provider
            .get_draw_by_date(date)?
            .ok_or_else(|| anyhow!("No draw found for date: {}", date))?;

        Ok(json!({
            "success": true,
            "draw": draw
        })
        .to_string())
    }

    pub async fn get_draw_by_id(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let id = arguments
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Missing id parameter"))?;

        let draw = self
            .provider
            .get_draw_by_id(id)?
            .ok_or_else(|| anyhow!("No draw found for id: {}", id))?;

        Ok(json!({
            "success": true,
            "draw": draw
        })
        .to_string())
    }

    pub async fn parse_draw_feed(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let raw_json = arguments
            .get("raw_json")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Missing raw_json parameter"))?;

        let draw = parse_draw(raw_json)?;

        Ok(json!({
            "success": true,
            "draw": draw
        })
        .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_check::SeedProvider;

    fn provider() -> Arc<dyn DrawProvider> {
        Arc::new(SeedProvider::builtin().unwrap())
    }

    fn args(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    fn parse(output: String) -> Value {
        serde_json::from_str(&output).unwrap()
    }

    #[tokio::test]
    async fn test_check_ticket_win_has_no_close_misses() {
        let use_case = TicketUseCase::new(provider());
        let out = parse(
            use_case
                .check_ticket(&args(json!({ "ticket_number": "wn 123456" })))
                .await
                .unwrap(),
        );

        assert_eq!(out["status"], "WIN");
        assert_eq!(out["prize"]["category"], "1st Prize");
        assert_eq!(out["prize"]["amount"], 7_500_000);
        assert_eq!(out["draw"]["id"], "1");
        assert_eq!(out["close_misses"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_check_ticket_miss_lists_close_misses() {
        let use_case = TicketUseCase::new(provider());
        let out = parse(
            use_case
                .check_ticket(&args(json!({ "ticket_number": "SS 556678", "date": "2024-05-19" })))
                .await
                .unwrap(),
        );

        assert_eq!(out["status"], "MISS");
        assert!(out["prize"].is_null());
        assert_eq!(out["draw"]["name"], "Sthree Sakthi");

        let misses = out["close_misses"].as_array().unwrap();
        assert_eq!(misses.len(), 1);
        assert_eq!(misses[0]["winningNumber"], "SS 556677");
        assert_eq!(misses[0]["missType"], "ONE");
        assert_eq!(misses[0]["diffCount"], 1);
        assert_eq!(out["buckets"]["one"].as_array().unwrap().len(), 1);
        assert_eq!(out["buckets"]["shuffle"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_check_ticket_errors() {
        let use_case = TicketUseCase::new(provider());

        let err = use_case.check_ticket(&args(json!({}))).await.unwrap_err();
        assert!(err.to_string().contains("Missing ticket_number"));

        let err = use_case
            .check_ticket(&args(json!({ "ticket_number": "1", "date": "2020-01-01" })))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No draw found"));

        let err = use_case
            .check_ticket(&args(json!({ "ticket_number": "1", "date": "May 19" })))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
    }

    #[tokio::test]
    async fn test_get_latest_draws_paging() {
        let use_case = DrawUseCase::new(provider(), 2);

        let out = parse(use_case.get_latest_draws(&args(json!({}))).await.unwrap());
        assert_eq!(out["count"], 2);
        assert_eq!(out["draws"][0]["date"], "2024-05-20");

        let out = parse(
            use_case
                .get_latest_draws(&args(json!({ "limit": 5, "offset": 2 })))
                .await
                .unwrap(),
        );
        assert_eq!(out["count"], 1);
        assert_eq!(out["draws"][0]["series"], "FF");
    }

    #[tokio::test]
    async fn test_draw_lookups() {
        let use_case = DrawUseCase::new(provider(), 15);

        let out = parse(
            use_case
                .get_draw_by_date(&args(json!({ "date": "2024-05-18" })))
                .await
                .unwrap(),
        );
        assert_eq!(out["draw"]["drawNumber"], 69);

        let out = parse(use_case.get_draw_by_id(&args(json!({ "id": "3" }))).await.unwrap());
        assert_eq!(out["draw"]["name"], "Fifty-Fifty");

        let err = use_case
            .get_draw_by_id(&args(json!({ "id": "nope" })))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No draw found for id: nope"));

        let err = use_case
            .get_draw_by_date(&args(json!({ "date": "2020-01-01" })))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No draw found for date: 2020-01-01"));
    }

    #[tokio::test]
    async fn test_parse_draw_feed() {
        let use_case = DrawUseCase::new(provider(), 15);
        let raw = r#"{ "draw_code": "AK-650", "draw_name": "Akshaya", "draw_date": "2024-05-22",
                       "first_ticket": "AK 111222", "prizes": { "3rd": ["4455"] } }"#;

        let out = parse(
            use_case
                .parse_draw_feed(&args(json!({ "raw_json": raw })))
                .await
                .unwrap(),
        );
        assert_eq!(out["draw"]["id"], "AK-650");
        assert_eq!(out["draw"]["prizes"][1]["category"], "3rd Prize");
        assert_eq!(out["draw"]["prizes"][1]["numbers"][0], "4455");

        assert!(use_case.parse_draw_feed(&args(json!({}))).await.is_err());
    }
}
