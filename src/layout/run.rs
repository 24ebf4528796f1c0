//! Run classification.
//!
//! Every run of a paragraph falls into one of three classes:
//!
//! - plain text, emitted as is;
//! - a blank underlined run (only whitespace), which marks a fill-in line;
//! - underlined text, which is an answer or a number inside a blank and is
//!   rewritten with underscore markers.
//!
//! Within underlined text, each maximal digit group becomes `_d_` and every
//! other stretch becomes `___t___`. Whitespace separating groups stays as it
//! is, outside the markers.

use crate::document::Run;

/// Marker wrapped around underlined digits.
const DIGIT_MARK: &str = "_";
/// Marker wrapped around other underlined text.
const TEXT_MARK: &str = "___";

/// Outcome of classifying a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunClass {
    /// Plain text. `real` is true when it holds a non-whitespace character.
    Text { text: String, real: bool },
    /// An underlined run holding nothing but whitespace.
    BlankUnderline,
    /// Underlined content rewritten with underscore markers.
    Marked(String),
}

impl RunClass {
    /// Whether the run contributes visible content.
    #[inline]
    pub fn is_real(&self) -> bool {
        match self {
            RunClass::Text { real, .. } => *real,
            RunClass::BlankUnderline => false,
            RunClass::Marked(_) => true,
        }
    }

    /// The text this run contributes to the paragraph.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            RunClass::Text { text, .. } => text,
            RunClass::BlankUnderline => "",
            RunClass::Marked(text) => text,
        }
    }
}

/// Classify a run.
///
/// # Examples
///
/// ```
/// use longan::document::Run;
/// use longan::layout::run::{classify_run, RunClass};
///
/// assert_eq!(classify_run(&Run::underlined("   ")), RunClass::BlankUnderline);
/// assert_eq!(
///     classify_run(&Run::underlined("12")),
///     RunClass::Marked("_12_".to_string())
/// );
/// assert_eq!(
///     classify_run(&Run::underlined(" Beijing ")),
///     RunClass::Marked("___Beijing___".to_string())
/// );
/// ```
pub fn classify_run(run: &Run) -> RunClass {
    if !run.underlined {
        return RunClass::Text {
            real: !run.text.trim().is_empty(),
            text: run.text.clone(),
        };
    }

    let content = run.text.trim();
    if content.is_empty() {
        return RunClass::BlankUnderline;
    }
    RunClass::Marked(mark_underlined(content))
}

/// ASCII and full-width decimal digits.
#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('\u{FF10}'..='\u{FF19}').contains(&c)
}

/// Rewrite trimmed underlined content with digit and text markers.
pub fn mark_underlined(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 8);
    let mut rest = content;

    while let Some(first) = rest.chars().next() {
        let digits = is_digit(first);
        let end = rest
            .char_indices()
            .find(|&(_, c)| is_digit(c) != digits)
            .map_or(rest.len(), |(i, _)| i);
        let (group, tail) = rest.split_at(end);
        if digits {
            push_marked(&mut out, group, DIGIT_MARK);
        } else {
            push_text_group(&mut out, group);
        }
        rest = tail;
    }

    out
}

fn push_text_group(out: &mut String, group: &str) {
    let core = group.trim();
    if core.is_empty() {
        out.push_str(group);
        return;
    }
    let lead = &group[..group.len() - group.trim_start().len()];
    let trail = &group[group.trim_end().len()..];
    out.push_str(lead);
    push_marked(out, core, TEXT_MARK);
    out.push_str(trail);
}

#[inline]
fn push_marked(out: &mut String, core: &str, mark: &str) {
    out.push_str(mark);
    out.push_str(core);
    out.push_str(mark);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_runs() {
        assert_eq!(
            classify_run(&Run::plain("  ")),
            RunClass::Text {
                text: "  ".to_string(),
                real: false
            }
        );
        let class = classify_run(&Run::plain("Name:"));
        assert!(class.is_real());
        assert_eq!(class.as_str(), "Name:");
    }

    #[test]
    fn test_blank_underline() {
        let class = classify_run(&Run::underlined("\u{00A0}\t "));
        assert_eq!(class, RunClass::BlankUnderline);
        assert!(!class.is_real());
        assert_eq!(class.as_str(), "");
        assert_eq!(classify_run(&Run::underlined("")), RunClass::BlankUnderline);
    }

    #[test]
    fn test_mixed_digits_and_text() {
        assert_eq!(mark_underlined("Q12a"), "___Q____12____a___");
        assert_eq!(mark_underlined("1 2"), "_1_ _2_");
        assert_eq!(mark_underlined("第 12 题"), "___第___ _12_ ___题___");
        assert_eq!(mark_underlined("２０"), "_２０_");
    }

    #[test]
    fn test_whitespace_is_trimmed_before_marking() {
        assert_eq!(
            classify_run(&Run::underlined("  7  ")),
            RunClass::Marked("_7_".to_string())
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_digits_are_wrapped_once(digits in "[0-9]{1,12}") {
                let marked = mark_underlined(&digits);
                prop_assert_eq!(marked, format!("_{digits}_"));
            }

            #[test]
            fn prop_letters_are_wrapped_once(word in "[a-zA-Z]{1,12}") {
                let marked = mark_underlined(&word);
                prop_assert_eq!(marked, format!("___{word}___"));
            }
        }
    }
}
