//! Row intake: CSV parsing, structural validation, reference resolution
//!
//! The import pipeline feeds raw CSV through these stages in order. Parsing
//! is fatal as a group (any structural error rejects the whole file), while
//! validation and resolution accumulate per-row errors so every row gets
//! reported in one pass.

pub mod parse;
pub mod resolve;
pub mod validate;

pub use parse::{ParsedRows, RawRow, parse_rows};
pub use resolve::{find_named, resolve_row, suggest};
pub use validate::{parse_due_date, validate_row};
