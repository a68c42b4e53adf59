use super::{all_same, digit_values, digits_up_to, only_digits};

/// Mask up to 11 digits as `XXX.XXX.XXX-XX`, adding separators only once the
/// following group has started.
pub fn format(value: &str) -> String {
    let d = digits_up_to(value, 11);
    let groups: Vec<&str> = [(0, 3), (3, 6), (6, 9)]
        .iter()
        .filter_map(|&(start, end)| d.get(start..end.min(d.len())))
        .filter(|g| !g.is_empty())
        .collect();

    let mut out = groups.join(".");
    if let Some(check) = d.get(9..).filter(|c| !c.is_empty()) {
        out.push('-');
        out.push_str(check);
    }
    out
}

/// Validate a CPF: 11 digits, not a repeated digit, both check digits correct.
pub fn is_valid(value: &str) -> bool {
    let digits = only_digits(value);
    if digits.len() != 11 {
        return false;
    }

    let d = digit_values(&digits);
    if all_same(&d) {
        return false;
    }

    check_digit(&d[..9]) == d[9] && check_digit(&d[..10]) == d[10]
}

/// Weights run from `len + 1` down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    match 11 - sum % 11 {
        10 | 11 => 0,
        r => r,
    }
}
