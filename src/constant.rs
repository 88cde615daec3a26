pub(crate) const PROC_HEADER: &str = "PROC";

pub(crate) const BLANK: char = ' ';
pub(crate) const COMMA: char = ',';
pub(crate) const OPEN_PAREN: char = '(';
pub(crate) const CLOSE_PAREN: char = ')';
pub(crate) const QUOTE: char = '\'';

// Two-character closing delimiters; scanning appends a trailing blank so these
// are well-defined at end of input.
pub(crate) const QUOTE_BLANK: &str = "' ";
pub(crate) const PAREN_BLANK: &str = ") ";
pub(crate) const PAREN_COMMA: &str = "),";
pub(crate) const QUOTE_PAREN_BLANK: &str = "') ";
pub(crate) const QUOTE_PAREN_COMMA: &str = "'),";

// Upper bound on any single scanning loop.
pub(crate) const SCAN_LIMIT: usize = 255;
