//! Display-width arithmetic.
//!
//! CJK ideographs, CJK punctuation and full-width forms occupy two columns in
//! a monospace rendering; every other code point occupies one. Column
//! alignment in tables is computed with this metric, never with `len()`.

/// Rendering width of a single code point.
///
/// # Examples
///
/// ```
/// use longan::layout::width::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('。'), 2);
/// assert_eq!(char_width('Ａ'), 2);
/// ```
#[inline]
pub fn char_width(c: char) -> usize {
    match c {
        // CJK unified ideographs
        '\u{4E00}'..='\u{9FFF}'
        // CJK symbols and punctuation
        | '\u{3000}'..='\u{303F}'
        // Half-width and full-width forms
        | '\u{FF00}'..='\u{FFEF}' => 2,
        _ => 1,
    }
}

/// Rendering width of a string.
///
/// # Examples
///
/// ```
/// use longan::layout::width::display_width;
///
/// assert_eq!(display_width(""), 0);
/// assert_eq!(display_width("Dear Sir,"), 9);
/// assert_eq!(display_width("作文Essay"), 9);
/// ```
#[inline]
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Right-pad `text` with spaces until it is `width` columns wide.
///
/// Text that is already at least `width` wide is returned unchanged.
pub fn pad_right(text: &str, width: usize) -> String {
    let current = display_width(text);
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(current));
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(current)));
    padded
}

/// A run of `count` underscores.
#[inline]
pub fn underscores(count: usize) -> String {
    "_".repeat(count)
}
