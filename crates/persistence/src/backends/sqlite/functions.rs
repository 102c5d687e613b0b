//! SQL functions registered on every pooled connection.

use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

use crate::types::fold_case;

/// Unicode case folding, `bizdir_fold(text) -> text`. NULL passes through.
pub const FOLD_FUNCTION: &str = "bizdir_fold";

/// Registers the crate's scalar functions on a connection.
pub(crate) fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| fold_case(&v)))
        },
    )
}
