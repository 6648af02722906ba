//! Terminal output helpers.
//!
//! Command results are printed to stdout as JSON so they can be piped;
//! status lines are styled and go to stderr.

use console::style;
use serde::Serialize;

use crate::errors::{ConjureError, Result};

/// Body printed by `list`.
#[derive(Serialize)]
pub struct ListResponse<'a> {
    pub secrets: &'a [String],
}

/// Body printed by `set` and `delete`.
#[derive(Serialize)]
pub struct NameResponse<'a> {
    pub name: &'a str,
}

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    eprintln!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Pretty-print `value` as JSON on stdout.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| ConjureError::SerializationError(format!("output: {e}")))?;
    println!("{rendered}");
    Ok(())
}
