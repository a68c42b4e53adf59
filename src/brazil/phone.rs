use super::digits_up_to;

/// Mask up to 11 digits as `(DD) NNNN-NNNN` for landlines or
/// `(DD) NNNNN-NNNN` for mobiles. The opening parenthesis is emitted even for
/// empty input, matching what the signup form shows while typing.
pub fn format(value: &str) -> String {
    let d = digits_up_to(value, 11);
    match d.len() {
        0..=2 => format!("({d}"),
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_partial_input() {
        assert_eq!(format(""), "(");
        assert_eq!(format("1"), "(1");
        assert_eq!(format("119"), "(11) 9");
        assert_eq!(format("119876"), "(11) 9876");
    }

    #[test]
    fn formats_landline_and_mobile() {
        assert_eq!(format("1132654321"), "(11) 3265-4321");
        assert_eq!(format("11987654321"), "(11) 98765-4321");
        assert_eq!(format("+55 (11) 98765-4321"), "(55) 11987-6543");
    }
}
