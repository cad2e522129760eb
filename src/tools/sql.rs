//! Structured queries against a local SQLite database.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{Batch, Connection};
use thiserror::Error;

use super::Tool;

/// Prefix of every error reported by the SQL tool.
pub const SQL_ERROR_PREFIX: &str = "Chyba SQL: ";

/// Execute one SQL statement and return the rows as text.
pub struct SqlQuery {
    path: PathBuf,
}

impl SqlQuery {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Tool for SqlQuery {
    fn name(&self) -> &str {
        "SQL"
    }

    fn description(&self) -> &str {
        "Run a single SQL statement against the local SQLite database and return the resulting rows."
    }

    async fn invoke(&self, argument: &str) -> String {
        let path = self.path.clone();
        let sql = argument.to_string();

        // rusqlite is synchronous; keep it off the async workers.
        match tokio::task::spawn_blocking(move || run_statement(&path, &sql)).await {
            Ok(Ok(rows)) => rows,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "SQL statement failed");
                format!("{}{}", SQL_ERROR_PREFIX, e)
            }
            Err(e) => format!("{}{}", SQL_ERROR_PREFIX, e),
        }
    }
}

#[derive(Debug, Error)]
enum StatementError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("You can only execute one statement at a time.")]
    MultipleStatements,
}

fn run_statement(path: &Path, sql: &str) -> Result<String, StatementError> {
    if sql.trim().is_empty() {
        return Ok(render_rows(&[]));
    }

    let conn = Connection::open(path)?;
    let mut batch = Batch::new(&conn, sql);

    // Whitespace and comments alone compile to nothing.
    let Some(mut stmt) = batch.next()? else {
        return Ok(render_rows(&[]));
    };

    // Anything after the first statement, even if it fails to compile, is a
    // second statement. Reject before running the first one.
    if !matches!(batch.next(), Ok(None)) {
        return Err(StatementError::MultipleStatements);
    }

    let columns = stmt.column_count();
    let mut rows = stmt.query([])?;

    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns);
        for idx in 0..columns {
            values.push(Value::from(row.get_ref(idx)?));
        }
        collected.push(values);
    }

    Ok(render_rows(&collected))
}

/// Render rows as a list of tuples: `[(1, 'alice'), (2, None)]`.
///
/// Single-value rows keep the trailing comma (`(3,)`) so the shape of the
/// result is unambiguous to the synthesis model.
pub fn render_rows(rows: &[Vec<Value>]) -> String {
    let rendered: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = row.iter().map(render_value).collect();
            if values.len() == 1 {
                format!("({},)", values[0])
            } else {
                format!("({})", values.join(", "))
            }
        })
        .collect();
    format!("[{}]", rendered.join(", "))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => render_real(*f),
        Value::Text(s) => quote_text(s),
        Value::Blob(bytes) => quote_blob(bytes),
    }
}

/// Shortest round-trip form with a signed, two-digit exponent: `2.0`,
/// `1e+20`, `1e-05`.
fn render_real(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }

    let shortest = format!("{:?}", f);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => shortest,
    }
}

fn quote_text(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn quote_blob(bytes: &[u8]) -> String {
    let mut out = String::from("b'");
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }
    out.push('\'');
    out
}
