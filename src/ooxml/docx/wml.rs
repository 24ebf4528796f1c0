//! WordprocessingML vocabulary shared by both walkers.
//!
//! Element names are matched by local name, so documents using unusual
//! namespace prefixes walk the same way as Word's `w:` output.

/// Wrappers whose children are walked as if they stood in the parent.
pub(crate) fn is_transparent(local: &[u8]) -> bool {
    matches!(
        local,
        b"sdt"
            | b"sdtContent"
            | b"customXml"
            | b"ins"
            | b"moveTo"
            | b"smartTag"
            | b"hyperlink"
            | b"fldSimple"
            | b"dir"
            | b"bdo"
            | b"ruby"
            | b"rubyBase"
    )
}

/// Subtrees that never contribute text.
///
/// Math zones carry their own `m:r`/`m:t` runs, and the `*PrChange`
/// elements hold superseded formatting that must not override the current
/// `w:rPr`.
pub(crate) fn is_skipped(local: &[u8]) -> bool {
    matches!(
        local,
        b"del"
            | b"moveFrom"
            | b"drawing"
            | b"pict"
            | b"AlternateContent"
            | b"object"
            | b"delText"
            | b"delInstrText"
            | b"instrText"
            | b"rt"
            | b"sdtPr"
            | b"sdtEndPr"
            | b"oMath"
            | b"oMathPara"
            | b"rPrChange"
            | b"pPrChange"
    )
}

/// Whether a `w:u` element with the given `w:val` underlines its run.
///
/// A missing value counts as underlined.
#[inline]
pub(crate) fn underline_on(val: Option<&str>) -> bool {
    !matches!(val, Some("none"))
}

/// Text produced by an empty run-content element such as `w:tab`.
///
/// `br_type` is the `w:type` of a `w:br`; page and column breaks produce
/// nothing.
pub(crate) fn run_content_char(local: &[u8], br_type: Option<&str>) -> Option<char> {
    match local {
        b"tab" | b"ptab" => Some('\t'),
        b"br" => match br_type {
            Some("page") | Some("column") => None,
            _ => Some('\n'),
        },
        b"cr" => Some('\n'),
        b"noBreakHyphen" => Some('-'),
        _ => None,
    }
}
