/// Center `text` within `width` columns, putting the odd padding space on the right.
///
/// Text that is already at least `width` wide is returned unchanged.
pub fn center_text(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }

    let padding = width - len;
    let left = padding / 2;
    let right = padding - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PID", 5, " PID ")]
    #[case("HELLO", 5, "HELLO")]
    #[case("TOOLONG", 5, "TOOLONG")]
    #[case("HI", 6, "  HI  ")]
    #[case("HI", 5, " HI  ")]
    #[case("", 3, "   ")]
    fn test_center_text(#[case] text: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(center_text(text, width), expected);
    }
}
