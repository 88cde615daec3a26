/// The shape of one keyword-operand token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TokenForm<'t> {
    /// `WORD` with no value attached.
    Bare,
    /// `WORD(value)`: the raw text between the parens.
    Value(&'t str),
    /// `WORD('value')`: the text between the quotes.
    Quoted(&'t str),
}

/// One token consumed from the keyword-operand text.
///
/// `span` is the full consumed text (word and any parenthesized value, without
/// the trailing delimiter), used to carry unmatched tokens into the leftover.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawToken<'t> {
    pub(crate) word: &'t str,
    pub(crate) form: TokenForm<'t>,
    pub(crate) span: &'t str,
}

/// The outcome of scanning the keyword-operand text for one target keyword.
///
/// `value` is `None` when the target never occurred; `rest` is the unmatched
/// text, re-scannable for the next target.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct KeyScan {
    pub(crate) value: Option<String>,
    pub(crate) rest: String,
}
