//! Inline text normalisation.

/// Characters replaced by a plain space before collapsing.
const NOISE: [char; 5] = ['\u{00A0}', '\t', '\u{000C}', '\r', '\n'];

/// Flatten whitespace noise to single spaces and trim the ends.
///
/// Non-breaking spaces, tabs, form feeds, carriage returns and newlines
/// become spaces, runs of two or more spaces collapse to one, and leading
/// and trailing spaces are removed. Applying it twice gives the same result.
///
/// # Examples
///
/// ```
/// use longan::layout::normalize::normalize_text;
///
/// assert_eq!(normalize_text("  Name:\u{a0}\u{a0}\tJohn\r\n"), "Name: John");
/// assert_eq!(normalize_text(""), "");
/// ```
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        let c = if NOISE.contains(&c) { ' ' } else { c };
        if c == ' ' {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapses_and_trims() {
        assert_eq!(normalize_text("a  b   c"), "a b c");
        assert_eq!(normalize_text("\n\n"), "");
        assert_eq!(normalize_text("\u{000C}page\u{000C}"), "page");
        assert_eq!(normalize_text("中\u{00A0}文"), "中 文");
    }

    #[test]
    fn test_keeps_other_characters() {
        // Ideographic space is content, not noise.
        assert_eq!(normalize_text("a\u{3000}b"), "a\u{3000}b");
        assert_eq!(normalize_text("_1_ ___"), "_1_ ___");
    }

    proptest! {
        #[test]
        fn prop_idempotent(s in "[ a-z\t\r\n\u{a0}\u{c}中_]{0,40}") {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once.clone());
            prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
            prop_assert!(!once.contains("  "));
        }
    }
}
