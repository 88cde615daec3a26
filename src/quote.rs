/// Render `value` as a quoted literal that scans back to the same text.
///
/// A value without single quotes is wrapped in single quotes; failing that, a
/// value without double quotes is wrapped in double quotes; failing both,
/// every embedded single quote is doubled and the result is wrapped in single
/// quotes.
///
/// ```
/// use procarg::quote;
///
/// assert_eq!(quote("SYS1.PROCLIB"), "'SYS1.PROCLIB'");
/// assert_eq!(quote("it's"), "\"it's\"");
/// assert_eq!(quote("both \" and '"), "'both \" and '''");
/// ```
pub fn quote(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{value}'")
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}
