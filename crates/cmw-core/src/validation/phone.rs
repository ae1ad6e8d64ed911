const MAX_DIGITS: usize = 10;

/// Strip everything but ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Group digits into `(xxx) xxx-xxxx` as the user types.
///
/// Up to three digits are returned bare; anything past ten digits is dropped.
pub fn format_phone_as_typed(raw: &str) -> String {
    let digits = digits_only(raw);
    let digits = &digits[..digits.len().min(MAX_DIGITS)];

    match digits.len() {
        0..=3 => digits.to_string(),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
