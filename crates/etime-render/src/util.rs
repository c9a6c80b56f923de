//! Padding helpers shared by the template functions.

use unicode_width::UnicodeWidthStr;

/// Justifies `s` within `width` terminal columns, printf `%*s` style.
///
/// A positive width right-justifies (pads on the left), a negative width
/// left-justifies to `|width|`. Text already wider than the target is
/// returned unchanged, never truncated. Width is measured in display columns,
/// so CJK and other wide characters count as two.
///
/// # Example
///
/// ```rust
/// use etime_render::justify;
///
/// assert_eq!(justify("12.00", 8), "   12.00");
/// assert_eq!(justify("12.00", -8), "12.00   ");
/// assert_eq!(justify("12.00", 2), "12.00");
/// ```
pub fn justify(s: &str, width: i64) -> String {
    let target = usize::try_from(width.unsigned_abs()).unwrap_or(usize::MAX);
    let padding = target.saturating_sub(s.width());
    if padding == 0 {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len() + padding);
    if width < 0 {
        result.push_str(s);
        result.extend(std::iter::repeat(' ').take(padding));
    } else {
        result.extend(std::iter::repeat(' ').take(padding));
        result.push_str(s);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_justify() {
        assert_eq!(justify("9.53", 6), "  9.53");
    }

    #[test]
    fn test_left_justify_negative_width() {
        assert_eq!(justify("9.53", -6), "9.53  ");
    }

    #[test]
    fn test_zero_width_and_overflow() {
        assert_eq!(justify("abc", 0), "abc");
        assert_eq!(justify("abcdef", 3), "abcdef");
        assert_eq!(justify("", 3), "   ");
    }

    #[test]
    fn test_wide_characters() {
        // Each CJK character occupies two columns
        assert_eq!(justify("日本", 6), "  日本");
    }
}
