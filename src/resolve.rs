use crate::constant::BLANK;
use crate::model::{ProcSpec, ResolveError};
use crate::quote::quote;
use crate::scan;

/// The values resolved from one argument string.
///
/// Entries keep the declaration order of the PROC statement: positionals
/// first, then keywords. `Display` renders each entry as `NAME=<value>` with
/// the value re-quoted into a parsable literal.
#[derive(Debug, PartialEq, Eq)]
pub struct Resolution {
    entries: Vec<(String, String)>,
    leftover: String,
}

impl Resolution {
    /// The resolved value for `name`, if that parameter was resolved.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value.as_str())
    }

    /// The `(name, value)` entries, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The number of resolved entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Input text that matched no declared parameter.
    ///
    /// Always empty in full mode, where leftover text is an error instead.
    pub fn leftover(&self) -> &str {
        &self.leftover
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .entries
            .iter()
            .map(|(name, value)| format!("{name}={}", quote(value)))
            .collect::<Vec<String>>()
            .join("\n");
        write!(f, "{rendered}")
    }
}

/// Resolve `input` against every parameter the PROC statement declares.
///
/// Positionals are extracted first, in declared order; each keyword is then
/// scanned in declared order over the text the previous scans left behind.
/// Keywords absent from the input resolve to their defaults. The first scan
/// error aborts the whole resolution, and any text left after all scans is an
/// [`ResolveError::UnrecognizedInput`] error.
///
/// ```
/// use procarg::resolve;
///
/// let resolution = resolve(
///     "'SYS1.PROCLIB' LIST CHARS(60)",
///     "PROC 1 DSN LIST CHARS(80)",
/// )
/// .unwrap();
///
/// assert_eq!(resolution.get("DSN"), Some("'SYS1.PROCLIB'"));
/// assert_eq!(resolution.get("LIST"), Some("LIST"));
/// assert_eq!(resolution.get("CHARS"), Some("60"));
/// ```
pub fn resolve(input: &str, spec: &str) -> Result<Resolution, ResolveError> {
    let spec: ProcSpec = spec.parse()?;
    resolve_with(input, &spec, None)
}

/// Resolve only `key` from `input`, ignoring every other keyword.
///
/// The key must be declared by the PROC statement, by its full name. When the
/// input never mentions it, the declared default comes back with no error.
/// Unrecognized text is not an error in this mode; it is carried in
/// [`Resolution::leftover`] for the caller.
///
/// ```
/// use procarg::resolve_key;
///
/// let resolution = resolve_key("", "PROC 0 COLOR(RED)", "COLOR").unwrap();
///
/// assert_eq!(resolution.get("COLOR"), Some("RED"));
/// ```
pub fn resolve_key(input: &str, spec: &str, key: &str) -> Result<Resolution, ResolveError> {
    let spec: ProcSpec = spec.parse()?;
    resolve_with(input, &spec, Some(key))
}

fn resolve_with(
    input: &str,
    spec: &ProcSpec,
    key: Option<&str>,
) -> Result<Resolution, ResolveError> {
    // The trailing blank terminates the two-character closing delimiters at
    // end of input.
    let padded = format!("{input}{BLANK}");
    let mut cursor = padded.as_str();
    let mut entries: Vec<(String, String)> = Vec::default();

    for positional in spec.positionals() {
        let (value, rest) = scan::take_positional(cursor);
        entries.push((positional.name().to_string(), value.to_string()));
        cursor = rest;
    }

    match key {
        Some(name) => {
            let target = spec.keyword(name).ok_or_else(|| ResolveError::UnknownKey {
                name: name.to_string(),
            })?;
            let scanned = scan::scan_key(cursor, spec, target)?;
            let value = scanned
                .value
                .unwrap_or_else(|| target.default_value().to_string());
            entries.push((target.name().to_string(), value));

            Ok(Resolution {
                entries,
                leftover: scanned.rest.trim_matches(BLANK).to_string(),
            })
        }
        None => {
            let mut remaining = cursor.to_string();

            for target in spec.keywords() {
                let scanned = scan::scan_key(&remaining, spec, target)?;
                let value = scanned
                    .value
                    .unwrap_or_else(|| target.default_value().to_string());
                entries.push((target.name().to_string(), value));
                remaining = scanned.rest;
            }

            let leftover = remaining.trim_matches(BLANK).to_string();

            if !leftover.is_empty() {
                return Err(ResolveError::UnrecognizedInput { leftover });
            }

            Ok(Resolution {
                entries,
                leftover,
            })
        }
    }
}
