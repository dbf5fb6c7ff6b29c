//! Field validators and the phone auto-formatter.
//!
//! Validators are pure predicates over the raw input text; the caller decides
//! how to surface the message strings. There is no error taxonomy beyond
//! "valid / invalid plus message" — invalid input is presentation state, not
//! a fault.
//!
//! Messages are hardcoded in Lithuanian, the site's single locale.

pub const MSG_REQUIRED: &str = "Šis laukas yra privalomas";
pub const MSG_LETTERS_ONLY: &str = "Naudok tik raides";
pub const MSG_EMAIL: &str = "Neteisingas el. pašto formatas";
pub const MSG_RATING: &str = "Įvesk skaičių nuo 1 iki 10";
pub const MSG_PHONE: &str = "Numeris turi būti formato +370 6xx xxxxx";

/// Lithuanian diacritics accepted by the name validator in addition to ASCII
/// letters.
const LITHUANIAN_LETTERS: &str = "ĄČĘĖĮŠŲŪŽąčęėįšųūž";

/// Local numbers are `+370 6xx xxxxx`: 11 digits, "3706" prefix.
const PHONE_DIGITS: usize = 11;
const PHONE_PREFIX: &str = "3706";

/// True when the value is missing or whitespace-only.
pub fn is_empty(value: &str) -> bool {
    value.trim().is_empty()
}

/// Name fields: letters (ASCII or Lithuanian), spaces and hyphens only.
pub fn is_only_letters(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed.chars().all(|c| {
            c.is_ascii_alphabetic() || LITHUANIAN_LETTERS.contains(c) || c.is_whitespace() || c == '-'
        })
}

/// Email: no whitespace, exactly one `@`, and a `.` strictly inside the
/// domain part (something before the first dot and after the last).
pub fn is_valid_email(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = trimmed.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars
        .iter()
        .enumerate()
        .any(|(i, &c)| c == '.' && i > 0 && i < chars.len() - 1)
}

/// Ratings: any finite number in `[1, 10]` (decimals included).
pub fn is_valid_rating(value: &str) -> bool {
    match value.trim().parse::<f64>() {
        Ok(n) => n.is_finite() && (1.0..=10.0).contains(&n),
        Err(_) => false,
    }
}

/// Digit-only projection of a phone value, capped at [`PHONE_DIGITS`].
pub fn phone_digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect()
}

/// Re-render a phone value as `+370 6xx xxxxx`, progressively while digits
/// accumulate: `"370"` → `"+370"`, `"37061"` → `"+370 61"`, a full number →
/// `"+370 612 34567"`. Anything that is not a digit is dropped first.
pub fn format_phone(raw: &str) -> String {
    let digits = phone_digits(raw);

    let country: String = digits.chars().take(3).collect();
    let first: String = digits.chars().skip(3).take(1).collect();
    let mid: String = digits.chars().skip(4).take(2).collect();
    let last: String = digits.chars().skip(6).take(5).collect();

    let mut formatted = String::new();
    if !country.is_empty() {
        formatted.push('+');
        formatted.push_str(&country);
    }
    if !first.is_empty() {
        formatted.push(' ');
        formatted.push_str(&first);
        formatted.push_str(&mid);
    }
    if !last.is_empty() {
        formatted.push(' ');
        formatted.push_str(&last);
    }
    formatted
}

/// True iff the digit projection is exactly 11 digits starting with "3706".
pub fn is_valid_phone(value: &str) -> bool {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.len() == PHONE_DIGITS && digits.starts_with(PHONE_PREFIX)
}
