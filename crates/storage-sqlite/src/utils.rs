//! Utility functions for SQLite storage operations.

use log::error;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Batch size for multi-row inserts.
///
/// SQLite has a compile-time limit on the number of parameters in a SQL
/// statement (SQLITE_MAX_VARIABLE_NUMBER, typically 999). Chunking inserts
/// at 100 rows keeps even the widest artifact row comfortably under it.
pub const SQLITE_INSERT_CHUNK: usize = 100;

/// Parses a TEXT-encoded decimal column.
///
/// Returns `None` (and logs) when the stored value is not a valid decimal,
/// so callers can apply their incomplete-row policy instead of receiving a
/// fabricated zero.
pub fn parse_decimal_text(value: &str, table: &str, column: &str) -> Option<Decimal> {
    match Decimal::from_str(value).or_else(|_| Decimal::from_scientific(value)) {
        Ok(decimal) => Some(decimal),
        Err(e) => {
            error!("Ignoring unparsable {table}.{column} value '{value}': {e}");
            None
        }
    }
}

/// Encodes a decimal for a TEXT column. Normalized so equal values always
/// produce the same stored text.
pub fn decimal_to_text(value: Decimal) -> String {
    value.normalize().to_string()
}
