use crate::constant::*;
use crate::model::{ParamSpec, ProcSpec, ResolveError};
use crate::scan::model::*;
use crate::spec::abbrev_matches;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Extract the next positional value.
///
/// A leading quote runs to the next `' ` sequence (closing quote retained); a
/// leading paren runs to the next `) ` sequence (closing paren retained);
/// anything else runs to the next blank. A missing close consumes the whole
/// text, without complaint.
pub(crate) fn take_positional(text: &str) -> (&str, &str) {
    let text = text.trim_start_matches(BLANK);

    let end = match text.chars().next() {
        Some(QUOTE) => match text[1..].find(QUOTE_BLANK) {
            Some(at) => at + 2,
            None => text.trim_end_matches(BLANK).len(),
        },
        Some(OPEN_PAREN) => match text[1..].find(PAREN_BLANK) {
            Some(at) => at + 2,
            None => text.trim_end_matches(BLANK).len(),
        },
        _ => text.find(BLANK).unwrap_or(text.len()),
    };

    text.split_at(end)
}

/// Scan the keyword-operand text for `target`, token by token.
///
/// Matched occurrences resolve per the target's declaration (the last one
/// wins); unmatched tokens accumulate into `rest` for the next target's scan.
/// The text must carry a trailing blank so the two-character closing
/// delimiters terminate at end of input.
pub(crate) fn scan_key(
    text: &str,
    spec: &ProcSpec,
    target: &ParamSpec,
) -> Result<KeyScan, ResolveError> {
    let min_len = spec.min_abbrev(target.name());
    let mut remaining = text;
    let mut leftover = String::default();
    let mut value: Option<String> = None;

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Scanning for '{name}' at minimum abbreviation {min_len}.",
            name = target.name()
        );
    }

    for _ in 0..SCAN_LIMIT {
        remaining = remaining.trim_start_matches(BLANK);

        if remaining.is_empty() {
            return Ok(KeyScan {
                value,
                rest: leftover,
            });
        }

        let (token, rest) = next_token(remaining)?;
        remaining = rest;

        if token.word.is_empty() && token.form == TokenForm::Bare {
            // Consecutive delimiters; nothing to keep.
            continue;
        }

        if abbrev_matches(token.word, target.name(), min_len) {
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Token '{word}' matched '{name}'.",
                    word = token.word,
                    name = target.name()
                );
            }

            value = Some(resolve_token(target, &token)?);
        } else {
            leftover.push_str(token.span);
            leftover.push(BLANK);
        }
    }

    Err(ResolveError::IterationLimit)
}

fn resolve_token(target: &ParamSpec, token: &RawToken<'_>) -> Result<String, ResolveError> {
    match token.form {
        TokenForm::Bare => {
            if target.value_required() {
                return Err(ResolveError::MissingValue {
                    name: target.name().to_string(),
                });
            }

            // A bare keyword resolves to its own full name, not the
            // abbreviation the user typed.
            Ok(target.name().to_string())
        }
        TokenForm::Value(value) => {
            if !target.value_required() {
                return Err(ResolveError::UnexpectedValue {
                    name: target.name().to_string(),
                });
            }

            Ok(value.to_string())
        }
        TokenForm::Quoted(value) => {
            if !target.value_required() {
                return Err(ResolveError::UnexpectedValue {
                    name: target.name().to_string(),
                });
            }

            Ok(format!("{QUOTE}{value}{QUOTE}"))
        }
    }
}

/// Split the next token off the front of `text`.
///
/// The earliest of blank, comma, `(` decides the form: a comma delimits a bare
/// word exactly like a blank; a paren opens a value, quoted or not.
pub(crate) fn next_token(text: &str) -> Result<(RawToken<'_>, &str), ResolveError> {
    let blank_at = text.find(BLANK).unwrap_or(text.len());
    let comma_at = text.find(COMMA).unwrap_or(text.len());
    let open_at = text.find(OPEN_PAREN).unwrap_or(text.len());

    if open_at < blank_at && open_at < comma_at {
        let word = &text[..open_at];
        let inner = &text[open_at + 1..];

        if let Some(quoted) = inner.strip_prefix(QUOTE) {
            let (at, by_comma) = find_close(quoted, QUOTE_PAREN_COMMA, QUOTE_PAREN_BLANK)
                .ok_or_else(|| ResolveError::UnterminatedQuote {
                    word: word.to_string(),
                })?;
            let value = &quoted[..at];
            // word, open paren, quote, value, closing quote-paren.
            let span_end = open_at + 2 + at + 2;
            let span = &text[..span_end];
            let rest = skip_comma(&text[span_end..], by_comma);

            Ok((
                RawToken {
                    word,
                    form: TokenForm::Quoted(value),
                    span,
                },
                rest,
            ))
        } else {
            let (value, span, rest) = match find_close(inner, PAREN_COMMA, PAREN_BLANK) {
                Some((at, by_comma)) => {
                    // word, open paren, value, closing paren.
                    let span_end = open_at + 1 + at + 1;
                    (
                        &inner[..at],
                        &text[..span_end],
                        skip_comma(&text[span_end..], by_comma),
                    )
                }
                None => {
                    // No close; the value runs to the end of the text.
                    (
                        inner.trim_end_matches(BLANK),
                        text.trim_end_matches(BLANK),
                        "",
                    )
                }
            };

            if value.contains(BLANK) || value.contains(QUOTE) {
                return Err(ResolveError::InvalidValue {
                    word: word.to_string(),
                    value: value.to_string(),
                });
            }

            Ok((
                RawToken {
                    word,
                    form: TokenForm::Value(value),
                    span,
                },
                rest,
            ))
        }
    } else {
        let end = std::cmp::min(blank_at, comma_at);
        let word = &text[..end];
        let rest = if end < text.len() { &text[end + 1..] } else { "" };

        Ok((
            RawToken {
                word,
                form: TokenForm::Bare,
                span: word,
            },
            rest,
        ))
    }
}

/// Position of whichever closing delimiter occurs first, and whether that
/// close is the comma form (whose comma must also be consumed).
fn find_close(text: &str, comma_close: &str, blank_close: &str) -> Option<(usize, bool)> {
    match (text.find(comma_close), text.find(blank_close)) {
        (Some(comma), Some(blank)) if comma < blank => Some((comma, true)),
        (_, Some(blank)) => Some((blank, false)),
        (Some(comma), None) => Some((comma, true)),
        (None, None) => None,
    }
}

fn skip_comma(rest: &str, by_comma: bool) -> &str {
    if by_comma {
        &rest[1..]
    } else {
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn spec(text: &str) -> ProcSpec {
        text.parse().unwrap()
    }

    #[rstest]
    #[case("ABC ", "ABC", "")]
    #[case("  ABC DEF ", "ABC", " DEF ")]
    #[case("'A B C' DEF ", "'A B C'", " DEF ")]
    #[case("'USER1.A.LIST' ", "'USER1.A.LIST'", " ")]
    #[case("(X Y) DEF ", "(X Y)", " DEF ")]
    #[case("", "", "")]
    #[case("   ", "", "")]
    fn positional(#[case] text: &str, #[case] expected: &str, #[case] rest: &str) {
        assert_eq!(take_positional(text), (expected, rest));
    }

    #[rstest]
    #[case("'abc ", "'abc")]
    #[case("(abc ", "(abc")]
    #[case("'abc def ", "'abc def")]
    fn positional_unclosed_consumes_to_end(#[case] text: &str, #[case] expected: &str) {
        let (value, rest) = take_positional(text);

        assert_eq!(value, expected);
        assert_eq!(rest.trim_matches(BLANK), "");
    }

    #[rstest]
    #[case("LIST MORE ", "LIST", TokenForm::Bare, "MORE ")]
    #[case("LIST,MORE ", "LIST", TokenForm::Bare, "MORE ")]
    #[case("CHARS(60) MORE ", "CHARS", TokenForm::Value("60"), " MORE ")]
    #[case("CHARS(60),MORE ", "CHARS", TokenForm::Value("60"), "MORE ")]
    #[case("CHARS() MORE ", "CHARS", TokenForm::Value(""), " MORE ")]
    #[case("CHARS(a)b ", "CHARS", TokenForm::Value("a)b"), "")]
    #[case("TITLE('a b') MORE ", "TITLE", TokenForm::Quoted("a b"), " MORE ")]
    #[case("TITLE('a b'),MORE ", "TITLE", TokenForm::Quoted("a b"), "MORE ")]
    #[case("TITLE('') ", "TITLE", TokenForm::Quoted(""), " ")]
    #[case("(60) MORE ", "", TokenForm::Value("60"), " MORE ")]
    fn token_forms(
        #[case] text: &str,
        #[case] word: &str,
        #[case] form: TokenForm<'_>,
        #[case] rest: &str,
    ) {
        // Execute
        let (token, remaining) = next_token(text).unwrap();

        // Verify
        assert_eq!(token.word, word);
        assert_eq!(token.form, form);
        assert_eq!(remaining, rest);
    }

    #[rstest]
    #[case("LIST MORE ", "LIST")]
    #[case("CHARS(60),MORE ", "CHARS(60)")]
    #[case("TITLE('a b') MORE ", "TITLE('a b')")]
    fn token_spans(#[case] text: &str, #[case] span: &str) {
        let (token, _) = next_token(text).unwrap();

        assert_eq!(token.span, span);
    }

    #[rstest]
    #[case("CHARS(a b) ", "CHARS", "a b")]
    #[case("CHARS(a'b) ", "CHARS", "a'b")]
    #[case("CHARS(a b", "CHARS", "a b")]
    fn token_invalid_value(#[case] text: &str, #[case] word: &str, #[case] value: &str) {
        assert_eq!(
            next_token(text).unwrap_err(),
            ResolveError::InvalidValue {
                word: word.to_string(),
                value: value.to_string(),
            }
        );
    }

    #[rstest]
    #[case("NAME('abc ")]
    #[case("NAME('abc")]
    #[case("NAME(' ")]
    fn token_unterminated_quote(#[case] text: &str) {
        assert_eq!(
            next_token(text).unwrap_err(),
            ResolveError::UnterminatedQuote {
                word: "NAME".to_string(),
            }
        );
    }

    #[rstest]
    #[case("LIST ", Some("LIST"), "")]
    #[case("L ", Some("LIST"), "")]
    #[case("", None, "")]
    #[case("   ", None, "")]
    #[case("MOOT ", None, "MOOT ")]
    #[case("MOOT LIST ", Some("LIST"), "MOOT ")]
    #[case("LIST MOOT ", Some("LIST"), "MOOT ")]
    fn scan_bare(#[case] text: &str, #[case] value: Option<&str>, #[case] rest: &str) {
        // Setup
        let spec = spec("PROC 0 LIST");
        let target = spec.keywords()[0].clone();

        // Execute
        let scan = scan_key(text, &spec, &target).unwrap();

        // Verify
        assert_eq!(scan.value.as_deref(), value);
        assert_eq!(scan.rest, rest);
    }

    #[rstest]
    #[case("CHARS(60) ", Some("60"))]
    #[case("CHARS() ", Some(""))]
    #[case("CH(60) ", Some("60"))]
    #[case("CHARS('a b') ", Some("'a b'"))]
    #[case("", None)]
    fn scan_value(#[case] text: &str, #[case] value: Option<&str>) {
        // Setup
        let spec = spec("PROC 0 CHARS(80)");
        let target = spec.keywords()[0].clone();

        // Execute
        let scan = scan_key(text, &spec, &target).unwrap();

        // Verify
        assert_eq!(scan.value.as_deref(), value);
    }

    #[test]
    fn scan_last_occurrence_wins() {
        // Setup
        let spec = spec("PROC 0 CHARS(80)");
        let target = spec.keywords()[0].clone();

        // Execute
        let scan = scan_key("CHARS(60) CHARS(72) ", &spec, &target).unwrap();

        // Verify
        assert_eq!(scan.value.as_deref(), Some("72"));
        assert_eq!(scan.rest, "");
    }

    #[test]
    fn scan_missing_value() {
        let spec = spec("PROC 0 LIST(X)");
        let target = spec.keywords()[0].clone();

        assert_eq!(
            scan_key("LIST ", &spec, &target).unwrap_err(),
            ResolveError::MissingValue {
                name: "LIST".to_string(),
            }
        );
    }

    #[rstest]
    #[case("LIST(X) ")]
    #[case("LIST('X') ")]
    fn scan_unexpected_value(#[case] text: &str) {
        let spec = spec("PROC 0 LIST");
        let target = spec.keywords()[0].clone();

        assert_eq!(
            scan_key(text, &spec, &target).unwrap_err(),
            ResolveError::UnexpectedValue {
                name: "LIST".to_string(),
            }
        );
    }

    #[test]
    fn scan_ambiguous_abbreviation_matches_neither() {
        // Setup
        let spec = spec("PROC 0 KEY1 KEY9");
        let key1 = spec.keywords()[0].clone();
        let key9 = spec.keywords()[1].clone();

        // Execute & verify: 'KEY' is below both minimums.
        let scan = scan_key("KEY ", &spec, &key1).unwrap();
        assert_eq!(scan.value, None);
        assert_eq!(scan.rest, "KEY ");

        let scan = scan_key("KEY ", &spec, &key9).unwrap();
        assert_eq!(scan.value, None);
        assert_eq!(scan.rest, "KEY ");
    }

    #[test]
    fn scan_comma_delimited_words() {
        // Setup
        let spec = spec("PROC 0 KEY1 KEY2");
        let key1 = spec.keywords()[0].clone();

        // Execute
        let scan = scan_key("KEY1,KEY2 ", &spec, &key1).unwrap();

        // Verify
        assert_eq!(scan.value.as_deref(), Some("KEY1"));
        assert_eq!(scan.rest, "KEY2 ");
    }

    #[test]
    fn scan_invalid_value_fires_without_match() {
        // The tokenizer rejects a malformed unquoted value even when the word
        // is not the scan target.
        let spec = spec("PROC 0 LIST OTHER(X)");
        let target = spec.keywords()[0].clone();

        assert_eq!(
            scan_key("OTHER(a b) LIST ", &spec, &target).unwrap_err(),
            ResolveError::InvalidValue {
                word: "OTHER".to_string(),
                value: "a b".to_string(),
            }
        );
    }

    #[test]
    fn scan_iteration_limit() {
        // Setup
        let spec = spec("PROC 0 LIST");
        let target = spec.keywords()[0].clone();
        let text = "X ".repeat(SCAN_LIMIT + 1);

        // Execute & verify
        assert_eq!(
            scan_key(&text, &spec, &target).unwrap_err(),
            ResolveError::IterationLimit
        );
    }
}
