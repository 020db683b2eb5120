/// Strips every whitespace character and uppercases what is left.
///
/// Tickets and winning numbers go through this exactly once before they are
/// compared. Applying it twice gives the same string.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn digits_only(chars: &[char]) -> Vec<char> {
    chars.iter().copied().filter(char::is_ascii_digit).collect()
}

/// Position-wise mismatch count. Both sides must have the same length.
pub fn mismatches(a: &[char], b: &[char]) -> usize {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// True when `a` and `b` are different arrangements of the same characters.
pub fn is_shuffle(a: &[char], b: &[char]) -> bool {
    if a.len() != b.len() || a == b {
        return false;
    }
    let mut sorted_a = a.to_vec();
    let mut sorted_b = b.to_vec();
    sorted_a.sort_unstable();
    sorted_b.sort_unstable();
    sorted_a == sorted_b
}
