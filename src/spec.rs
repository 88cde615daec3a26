use thiserror::Error;

use crate::constant::*;
use crate::model::{ParamSpec, ProcSpec};

/// A malformed PROC statement.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid PROC statement: {0}")]
pub struct SpecError(pub(crate) String);

/// Parse `PROC <n> <param-list>` into a [`ProcSpec`].
///
/// The first `n` names after the count declare the positional parameters, in
/// order; every remaining token declares a keyword, either bare (`LIST`) or
/// with a default value attached (`CHARS(80)`, `MEMBER()`).
pub(crate) fn parse(text: &str) -> Result<ProcSpec, SpecError> {
    let mut tokens = text.split(BLANK).filter(|token| !token.is_empty());

    match tokens.next() {
        Some(PROC_HEADER) => {}
        Some(header) => {
            return Err(SpecError(format!(
                "expected '{PROC_HEADER}', found '{header}'."
            )));
        }
        None => {
            return Err(SpecError("empty statement.".to_string()));
        }
    };

    let count: usize = match tokens.next() {
        Some(count) => count.parse().map_err(|_| {
            SpecError(format!(
                "positional count '{count}' is not a non-negative integer."
            ))
        })?,
        None => {
            return Err(SpecError("missing positional count.".to_string()));
        }
    };

    let mut positionals: Vec<ParamSpec> = Vec::default();
    let mut keywords: Vec<ParamSpec> = Vec::default();

    for token in tokens {
        if positionals.len() < count {
            if token.contains(OPEN_PAREN) {
                return Err(SpecError(format!(
                    "positional parameter '{token}' cannot declare a value."
                )));
            }

            validate_name(token)?;
            positionals.push(ParamSpec::positional(token));
        } else {
            let keyword = match token.split_once(OPEN_PAREN) {
                Some((name, rest)) => {
                    let default = rest.strip_suffix(CLOSE_PAREN).ok_or_else(|| {
                        SpecError(format!("no closing ')' in '{token}'."))
                    })?;
                    validate_name(name)?;
                    ParamSpec::keyword_with_value(name, default)
                }
                None => {
                    validate_name(token)?;
                    ParamSpec::keyword(token)
                }
            };

            // The last declaration of a name wins.
            keywords.retain(|existing| existing.name() != keyword.name());
            keywords.push(keyword);
        }
    }

    if positionals.len() < count {
        return Err(SpecError(format!(
            "{count} positional parameters declared, only {named} named.",
            named = positionals.len()
        )));
    }

    Ok(ProcSpec::new(positionals, keywords))
}

fn validate_name(name: &str) -> Result<(), SpecError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_uppercase()
                && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(SpecError(format!(
            "'{name}' is not an uppercase parameter name."
        )))
    }
}

/// The length of the shared leading substring of `a` and `b`.
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes()
        .zip(b.bytes())
        .take_while(|(left, right)| left == right)
        .count()
}

/// The smallest prefix length of `target` that no sibling keyword shares,
/// at least 1 and capped at the full name length.
pub(crate) fn min_abbrev(target: &str, keywords: &[ParamSpec]) -> usize {
    let longest_shared = keywords
        .iter()
        .filter(|keyword| keyword.name() != target)
        .map(|keyword| common_prefix_len(target, keyword.name()))
        .max()
        .unwrap_or(0);

    std::cmp::min(std::cmp::max(1, longest_shared + 1), target.len())
}

/// Whether `token` is an acceptable abbreviation of `keyword`: a case-sensitive
/// prefix no shorter than the computed minimum length.
pub(crate) fn abbrev_matches(token: &str, keyword: &str, min_len: usize) -> bool {
    token.len() >= min_len && keyword.starts_with(token)
}
