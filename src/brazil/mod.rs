//! Formatting masks and validators for Brazilian identity and contact fields.
//!
//! Every formatter strips non-digits first and truncates to the field's
//! maximum length, so it can be applied to partially typed input as well as
//! to stored values.

pub mod birth_date;
pub mod cep;
pub mod cnpj;
pub mod cpf;
pub mod phone;

/// Strip every character that is not an ASCII digit.
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// First `max` digits of `value`.
pub(crate) fn digits_up_to(value: &str, max: usize) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

/// Digit values of an all-digit string.
pub(crate) fn digit_values(digits: &str) -> Vec<u32> {
    digits.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// True when every digit is the same, e.g. `111.111.111-11`.
pub(crate) fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_digits_strips_punctuation_and_letters() {
        assert_eq!(only_digits("529.982.247-25"), "52998224725");
        assert_eq!(only_digits("(11) 9 8765-4321"), "11987654321");
        assert_eq!(only_digits("abc"), "");
    }

    #[test]
    fn digits_up_to_truncates() {
        assert_eq!(digits_up_to("12.345.678-90123", 8), "12345678");
    }

    #[test]
    fn all_same_detects_repeated_digits() {
        assert!(all_same(&[7, 7, 7]));
        assert!(!all_same(&[7, 7, 1]));
    }
}
