use super::{all_same, digit_values, digits_up_to, only_digits};

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Mask up to 14 digits as `XX.XXX.XXX/XXXX-XX`.
pub fn format(value: &str) -> String {
    let d = digits_up_to(value, 14);
    let part = |start: usize, end: usize| d.get(start..end.min(d.len())).unwrap_or("");

    let mut out = [part(0, 2), part(2, 5), part(5, 8)]
        .into_iter()
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(".");

    let branch = part(8, 12);
    if !branch.is_empty() {
        out.push('/');
        out.push_str(branch);
    }
    let check = part(12, 14);
    if !check.is_empty() {
        out.push('-');
        out.push_str(check);
    }
    out
}

/// Validate a CNPJ: 14 digits, not a repeated digit, both check digits correct.
pub fn is_valid(value: &str) -> bool {
    let digits = only_digits(value);
    if digits.len() != 14 {
        return false;
    }

    let d = digit_values(&digits);
    if all_same(&d) {
        return false;
    }

    check_digit(&d[..12], &FIRST_WEIGHTS) == d[12] && check_digit(&d[..13], &SECOND_WEIGHTS) == d[13]
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}
