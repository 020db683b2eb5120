use std::collections::HashSet;

use serde::Serialize;

use crate::types::{CloseMiss, Draw, MissType, SUFFIX_LEN, WinningEntry};
use crate::utils::{digits_only, is_shuffle, mismatches, normalize};

/// Shortest digit run the length-mismatch fallback will still compare.
const MIN_FALLBACK_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Comparison {
    diff_count: usize,
    shuffled: bool,
}

impl Comparison {
    fn between(left: &[char], right: &[char]) -> Self {
        Self {
            diff_count: mismatches(left, right),
            shuffled: is_shuffle(left, right),
        }
    }

    fn miss_type(&self) -> Option<MissType> {
        if self.shuffled {
            return Some(MissType::Shuffle);
        }
        match self.diff_count {
            1 => Some(MissType::One),
            2 => Some(MissType::Two),
            _ => None,
        }
    }
}

/// `None` means the pair cannot be meaningfully compared and is left out.
fn compare(ticket: &[char], entry: &WinningEntry) -> Option<Comparison> {
    match entry {
        WinningEntry::Suffix(suffix) => {
            let start = ticket.len().checked_sub(SUFFIX_LEN)?;
            Some(Comparison::between(&ticket[start..], suffix))
        }
        WinningEntry::Full(full) => {
            let winning: Vec<char> = full.chars().collect();
            if ticket.len() == winning.len() {
                return Some(Comparison::between(ticket, &winning));
            }

            let ticket_digits = digits_only(ticket);
            let winning_digits = digits_only(&winning);
            if ticket_digits.len() == winning_digits.len()
                && ticket_digits.len() >= MIN_FALLBACK_DIGITS
            {
                Some(Comparison::between(&ticket_digits, &winning_digits))
            } else {
                None
            }
        }
    }
}

/// Lists the winning numbers a losing ticket came close to.
///
/// Every winning number of every tier is compared with the ticket. Four
/// character entries are compared against the ticket's last four characters,
/// longer ones against the whole ticket (or, when the lengths differ, against
/// the digits of both sides). A permutation of the winning number is reported
/// as [`MissType::Shuffle`] whatever its position-wise distance; otherwise a
/// distance of one or two yields [`MissType::One`] or [`MissType::Two`].
///
/// Repeated winning numbers are reported once, at their first occurrence.
/// The result is ordered by prize amount, highest first, and keeps scan order
/// among equal amounts.
///
/// Only meaningful after [`crate::checker::verify`] reported a miss.
pub fn close_misses(draw: &Draw, ticket_number: &str) -> Vec<CloseMiss> {
    let ticket: Vec<char> = normalize(ticket_number).chars().collect();

    let mut misses = Vec::new();
    for prize in &draw.prizes {
        for number in &prize.numbers {
            let Some(comparison) = compare(&ticket, number.entry()) else {
                continue;
            };
            if let Some(miss_type) = comparison.miss_type() {
                misses.push(CloseMiss {
                    prize_category: prize.category.clone(),
                    prize_amount: prize.amount,
                    winning_number: number.raw().to_string(),
                    diff_count: comparison.diff_count,
                    miss_type,
                });
            }
        }
    }

    let mut seen = HashSet::new();
    misses.retain(|miss| seen.insert(miss.winning_number.clone()));

    // stable: equal amounts keep scan order
    misses.sort_by(|a, b| b.prize_amount.cmp(&a.prize_amount));
    misses
}

/// Close misses split by kind, each bucket in the order it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CloseMissBuckets {
    pub shuffle: Vec<CloseMiss>,
    pub one: Vec<CloseMiss>,
    pub two: Vec<CloseMiss>,
}

impl CloseMissBuckets {
    pub fn split(misses: &[CloseMiss]) -> Self {
        let mut buckets = Self::default();
        for miss in misses {
            let bucket = match miss.miss_type {
                MissType::Shuffle => &mut buckets.shuffle,
                MissType::One => &mut buckets.one,
                MissType::Two => &mut buckets.two,
            };
            bucket.push(miss.clone());
        }
        buckets
    }

    pub fn is_empty(&self) -> bool {
        self.shuffle.is_empty() && self.one.is_empty() && self.two.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::verify;
    use crate::types::Prize;
    use chrono::NaiveDate;

    fn draw(prizes: Vec<Prize>) -> Draw {
        Draw {
            id: "W-755".to_string(),
            name: "Win-Win".to_string(),
            series: "W".to_string(),
            draw_number: 755,
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            prizes,
            sources: Vec::new(),
        }
    }

    fn win_win() -> Draw {
        draw(vec![
            Prize::new("1st Prize", 7_500_000, ["WN 123456"]),
            Prize::new("Consolation", 8_000, ["WA 123456", "WB 123456", "WC 123456"]),
            Prize::new("2nd Prize", 500_000, ["WB 987654"]),
            Prize::new("3rd Prize", 100_000, ["1122", "3344", "5566", "7788", "9900"]),
            Prize::new("4th Prize", 5_000, ["1234", "5678", "9012", "3456"]),
            Prize::new("5th Prize", 2_000, ["1111", "2222", "3333", "4444"]),
        ])
    }

    fn summary(misses: &[CloseMiss]) -> Vec<(&str, MissType, usize)> {
        misses
            .iter()
            .map(|m| (m.winning_number.as_str(), m.miss_type, m.diff_count))
            .collect()
    }

    #[test]
    fn test_suffix_two_away() {
        let draw = draw(vec![Prize::new("3rd Prize", 100_000, ["1122", "3344"])]);
        let misses = close_misses(&draw, "9933441");
        assert_eq!(
            misses,
            vec![CloseMiss {
                prize_category: "3rd Prize".to_string(),
                prize_amount: 100_000,
                winning_number: "3344".to_string(),
                diff_count: 2,
                miss_type: MissType::Two,
            }]
        );
    }

    #[test]
    fn test_shuffle_beats_two() {
        let draw = draw(vec![Prize::new("3rd Prize", 100_000, ["1122", "3344"])]);
        let misses = close_misses(&draw, "1221");
        assert_eq!(summary(&misses), vec![("1122", MissType::Shuffle, 2)]);
    }

    #[test]
    fn test_reversed_suffix_is_shuffle() {
        let draw = draw(vec![Prize::new("4th Prize", 5_000, ["1234"])]);
        let misses = close_misses(&draw, "WX 98 4321");
        assert_eq!(summary(&misses), vec![("1234", MissType::Shuffle, 4)]);
    }

    #[test]
    fn test_short_ticket_skips_suffix_entries() {
        let draw = draw(vec![Prize::new("4th Prize", 5_000, ["1234"])]);
        assert!(close_misses(&draw, "124").is_empty());
        assert!(close_misses(&draw, "").is_empty());
    }

    #[test]
    fn test_full_ticket_one_and_shuffle() {
        let draw = draw(vec![Prize::new("1st Prize", 7_500_000, ["WN 123456"])]);

        let misses = close_misses(&draw, "wn 123457");
        assert_eq!(summary(&misses), vec![("WN 123456", MissType::One, 1)]);

        let misses = close_misses(&draw, "WN 123465");
        assert_eq!(summary(&misses), vec![("WN 123456", MissType::Shuffle, 2)]);
    }

    #[test]
    fn test_length_mismatch_falls_back_to_digits() {
        let draw = draw(vec![Prize::new("1st Prize", 7_500_000, ["WN 123456"])]);

        let misses = close_misses(&draw, "123457");
        assert_eq!(summary(&misses), vec![("WN 123456", MissType::One, 1)]);

        let misses = close_misses(&draw, "X 654321");
        assert_eq!(summary(&misses), vec![("WN 123456", MissType::Shuffle, 6)]);

        // four digits a side is the shortest run still compared
        let bonus = Draw {
            prizes: vec![Prize::new("Bonus", 50, ["AB1234X"])],
            ..draw
        };
        let misses = close_misses(&bonus, "1235");
        assert_eq!(summary(&misses), vec![("AB1234X", MissType::One, 1)]);
    }

    #[test]
    fn test_length_mismatch_without_matching_digits_is_excluded() {
        let draw = draw(vec![
            Prize::new("1st Prize", 7_500_000, ["WN 123456"]),
            Prize::new("Bonus", 10, ["AB123"]),
        ]);
        // five digits against six
        assert!(close_misses(&draw, "WN12345").is_empty());
        // three digits on both sides is too short to compare
        assert!(close_misses(&draw, "ABC124").is_empty());
    }

    #[test]
    fn test_two_kept_three_dropped() {
        let draw = draw(vec![Prize::new("1st Prize", 7_500_000, ["WN 123456"])]);
        let misses = close_misses(&draw, "WN 129956");
        assert_eq!(summary(&misses), vec![("WN 123456", MissType::Two, 2)]);

        assert!(close_misses(&draw, "WN 999456").is_empty());
    }

    #[test]
    fn test_duplicate_winning_numbers_reported_once() {
        let draw = draw(vec![
            Prize::new("Consolation", 8_000, ["WA 123456"]),
            Prize::new("Special", 9_000_000, ["WA 123456"]),
        ]);
        let misses = close_misses(&draw, "WA 123457");
        assert_eq!(misses.len(), 1);
        assert_eq!(misses[0].prize_category, "Consolation");
        assert_eq!(misses[0].prize_amount, 8_000);
    }

    #[test]
    fn test_sorted_by_amount_with_stable_ties() {
        let draw = win_win();
        let ticket = "WN 123457";
        assert_eq!(verify(&draw, ticket).prize(), None);

        let misses = close_misses(&draw, ticket);
        assert_eq!(
            summary(&misses),
            vec![
                ("WN 123456", MissType::One, 1),
                ("WA 123456", MissType::Two, 2),
                ("WB 123456", MissType::Two, 2),
                ("WC 123456", MissType::Two, 2),
                ("3456", MissType::One, 1),
            ]
        );
        assert!(misses
            .windows(2)
            .all(|pair| pair[0].prize_amount >= pair[1].prize_amount));
    }

    #[test]
    fn test_repeated_calls_agree() {
        let draw = win_win();
        assert_eq!(
            close_misses(&draw, "WB 123465"),
            close_misses(&draw, "WB 123465")
        );
    }

    #[test]
    fn test_buckets_keep_order() {
        let draw = win_win();
        let misses = close_misses(&draw, "WN 123457");
        let buckets = CloseMissBuckets::split(&misses);

        assert!(buckets.shuffle.is_empty());
        let one: Vec<_> = buckets.one.iter().map(|m| m.winning_number.as_str()).collect();
        assert_eq!(one, vec!["WN 123456", "3456"]);
        let two: Vec<_> = buckets.two.iter().map(|m| m.winning_number.as_str()).collect();
        assert_eq!(two, vec!["WA 123456", "WB 123456", "WC 123456"]);
        assert!(!buckets.is_empty());
        assert!(CloseMissBuckets::split(&[]).is_empty());
    }
}
