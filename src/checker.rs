use crate::types::{Draw, Verdict, WinningEntry};
use crate::utils::normalize;

/// Checks `ticket_number` against every winning number of `draw`.
///
/// Tiers are scanned in publication order and the first matching entry wins,
/// even if a later tier pays more. A full entry must equal the ticket; a
/// suffix entry only has to match the ticket's trailing characters. Anything
/// that matches nothing, empty input included, is a miss.
pub fn verify<'a>(draw: &'a Draw, ticket_number: &str) -> Verdict<'a> {
    let ticket = normalize(ticket_number);
    let ticket_chars: Vec<char> = ticket.chars().collect();

    for prize in &draw.prizes {
        for number in &prize.numbers {
            let hit = match number.entry() {
                WinningEntry::Full(full) => *full == ticket,
                WinningEntry::Suffix(suffix) => ticket_chars.ends_with(suffix),
            };
            if hit {
                return Verdict::Win(prize);
            }
        }
    }

    Verdict::Miss
}
