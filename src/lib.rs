//! `procarg` parses command arguments in the classic command-procedure style:
//! positional parameters followed by keyword parameters of the forms
//! `KEYWORD`, `KEY(value)`, and `KEY('quoted value')`, with
//! minimum-unambiguous-abbreviation matching and declared default values.
//!
//! The expected parameters are declared by a PROC statement, for example
//! `PROC 1 DSN LIST CHARS(80)`: one positional (`DSN`), a keyword that takes
//! no value (`LIST`), and a keyword that requires a value and defaults to `80`
//! (`CHARS`). Resolving an argument string against such a statement yields a
//! [`Resolution`] mapping each declared name to its value, or a
//! [`ResolveError`] describing exactly what was malformed.
//!
//! # Usage
//!
//! Resolve everything the statement declares:
//! ```
//! use procarg::resolve;
//!
//! let resolution = resolve(
//!     "'SYS1.PROCLIB' L CHARS(60)",
//!     "PROC 1 DSN LIST CHARS(80)",
//! )
//! .unwrap();
//!
//! // The positional keeps its quotes; the abbreviated keyword resolves to
//! // its full name.
//! assert_eq!(resolution.get("DSN"), Some("'SYS1.PROCLIB'"));
//! assert_eq!(resolution.get("LIST"), Some("LIST"));
//! assert_eq!(resolution.get("CHARS"), Some("60"));
//! ```
//!
//! Or resolve a single key, falling back to its default:
//! ```
//! use procarg::resolve_key;
//!
//! let resolution = resolve_key("", "PROC 0 COLOR(RED)", "COLOR").unwrap();
//!
//! assert_eq!(resolution.get("COLOR"), Some("RED"));
//! ```
//!
//! # Abbreviations
//!
//! A keyword may be abbreviated down to its shortest prefix that no sibling
//! keyword shares. Given `PROC 0 KEY1 KEY9`, neither `K` nor `KEY` matches
//! anything (ambiguous), while `KEY1` matches exactly `KEY1`. Matching is
//! case-sensitive and uppercase only.
//!
//! # Errors
//!
//! Malformed PROC statements fail with [`SpecError`]; malformed input fails
//! with the specific [`ResolveError`] condition (a required value missing, an
//! unexpected value supplied, an embedded blank or quote in an unquoted
//! value, an unterminated quoted value, or unrecognized trailing text).
//! Resolution is all-or-nothing: the first error discards any partially
//! resolved values.
#![deny(missing_docs)]
mod constant;
mod model;
mod quote;
mod resolve;
mod scan;
mod spec;

pub use model::{ParamKind, ParamSpec, ProcSpec, ResolveError};
pub use quote::quote;
pub use resolve::{resolve, resolve_key, Resolution};
pub use spec::SpecError;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
