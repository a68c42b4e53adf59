use std::sync::OnceLock;

use regex::Regex;

use super::digits_up_to;

/// Mask up to 8 digits as `XXXXX-XXX`.
pub fn format(value: &str) -> String {
    let d = digits_up_to(value, 8);
    if d.len() <= 5 {
        return d;
    }
    format!("{}-{}", &d[..5], &d[5..])
}

/// Accepts `12345-678` or `12345678`.
pub fn is_valid(value: &str) -> bool {
    static CEP_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CEP_REGEX
        .get_or_init(|| Regex::new(r"^\d{5}-?\d{3}$").expect("Failed to compile CEP regex"));
    regex.is_match(value)
}
