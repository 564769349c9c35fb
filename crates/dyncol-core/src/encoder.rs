//! Dynamic-column encoder: converts a document tree into a MariaDB
//! `COLUMN_CREATE(...)` or `COLUMN_ADD(...)` expression.
//!
//! Both flavours share one traversal:
//!
//! - **Scalars** of a mapping are emitted in place, in key order.
//! - **Nested mappings** are deferred onto a pending stack and expanded
//!   depth-first once the enclosing mapping's scalars are written. The most
//!   recently deferred sibling is expanded first.
//! - **Closing parentheses** come from a second stack holding one entry per
//!   open call. When a call has no pending children left it is closed, and
//!   consecutive drained calls close together.
//!
//! Neither stack lives on the call stack, so the nesting depth of the input is
//! bounded only by memory.
//!
//! Value rendering:
//!
//! | value | rendering |
//! |---|---|
//! | bool | `1 AS unsigned integer` / `0 AS unsigned integer` |
//! | number | `12 AS double` |
//! | text | `'text'` |
//! | empty mapping | `NULL` |
//! | null | omitted by `COLUMN_CREATE`, `'NULL'` in `COLUMN_ADD` |
//!
//! # Example
//! ```
//! use dyncol_core::create_query;
//! let sql = create_query(r#"{"name":"Alice","tags":{"admin":true}}"#).unwrap();
//! assert_eq!(
//!     sql,
//!     "COLUMN_CREATE('name', 'Alice', 'tags', COLUMN_CREATE('admin', 1 AS unsigned integer))"
//! );
//! ```

use crate::error::{DynColError, Result};
use crate::escape::{push_quoted_identifier, push_quoted_literal};
use crate::value::Value;
use serde::Serialize;

/// How keys and text values reach the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Params {
    /// Literals are escaped and written into the expression.
    #[default]
    Inline,
    /// Literals are replaced by `?` and collected, in output order, into
    /// [`Expression::params`] for positional binding.
    Positional,
}

/// An encoded expression together with the literals it expects to be bound.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Expression {
    pub sql: String,
    /// Raw, unescaped values for each `?` in `sql`, left to right. Always empty
    /// for [`Params::Inline`].
    pub params: Vec<String>,
}

/// Parse a JSON object and encode it as a `COLUMN_CREATE(...)` expression with
/// inlined literals.
pub fn create_query(json: &str) -> Result<String> {
    let value = Value::from_json(&serde_json::from_str(json)?);
    Ok(create_expression(&value, Params::Inline)?.sql)
}

/// Parse a JSON object and encode it as a `COLUMN_ADD(...)` expression that
/// updates the dynamic column `column` in place.
pub fn update_query(column: &str, json: &str) -> Result<String> {
    let value = Value::from_json(&serde_json::from_str(json)?);
    Ok(update_expression(column, &value, Params::Inline)?.sql)
}

/// Encode `root` as a `COLUMN_CREATE(...)` expression.
///
/// Returns [`DynColError::InvalidRoot`] unless `root` is a mapping.
pub fn create_expression(root: &Value, params: Params) -> Result<Expression> {
    encode(root, Target::Create, params)
}

/// Encode `root` as a `COLUMN_ADD(...)` expression against the dynamic column
/// `column`.
///
/// Every nested mapping is layered onto the blob already stored at its path,
/// read back with a chain of `COLUMN_GET(... AS BLOB)` calls, one per ancestor
/// key:
///
/// ```
/// use dyncol_core::update_query;
/// let sql = update_query("attrs", r#"{"a":{"b":{"c":"x"}}}"#).unwrap();
/// assert_eq!(
///     sql,
///     "COLUMN_ADD(`attrs`, 'a', COLUMN_ADD(COLUMN_GET(`attrs`, 'a' AS BLOB), \
///      'b', COLUMN_ADD(COLUMN_GET(COLUMN_GET(`attrs`, 'a' AS BLOB), 'b' AS BLOB), \
///      'c', 'x')))"
/// );
/// ```
pub fn update_expression(column: &str, root: &Value, params: Params) -> Result<Expression> {
    encode(root, Target::Update { column }, params)
}

#[derive(Clone, Copy)]
enum Target<'c> {
    Create,
    Update { column: &'c str },
}

impl Target<'_> {
    fn name(self) -> &'static str {
        match self {
            Target::Create => "create",
            Target::Update { .. } => "update",
        }
    }
}

/// A nested mapping waiting to be expanded.
struct Pending<'a> {
    key: &'a str,
    entries: &'a [(String, Value)],
    /// Keys from the root down to and including `key`. Only tracked for
    /// updates, where it drives the `COLUMN_GET` chain.
    path: Vec<&'a str>,
}

/// Bookkeeping for one open constructor call.
struct Level {
    /// Nested children of this call still on the pending stack.
    pending: usize,
    /// Whether an argument has been written, i.e. the next needs a separator.
    has_args: bool,
}

fn encode(root: &Value, target: Target<'_>, params: Params) -> Result<Expression> {
    let entries = root
        .as_mapping()
        .ok_or(DynColError::InvalidRoot { found: root.kind() })?;

    let mut out = Writer::new(params);
    let mut pending: Vec<Pending<'_>> = Vec::new();
    let mut levels: Vec<Level> = Vec::new();

    let mut root_level = match target {
        Target::Create => {
            out.sql.push_str("COLUMN_CREATE(");
            Level {
                pending: 0,
                has_args: false,
            }
        }
        Target::Update { column } => {
            out.sql.push_str("COLUMN_ADD(");
            push_quoted_identifier(column, &mut out.sql);
            Level {
                pending: 0,
                has_args: true,
            }
        }
    };
    emit_entries(&mut out, target, entries, &[], &mut root_level, &mut pending);
    levels.push(root_level);

    loop {
        while levels.last().is_some_and(|level| level.pending == 0) {
            levels.pop();
            out.sql.push(')');
        }

        let Some(next) = pending.pop() else { break };
        // The top pending mapping always belongs to the innermost open call.
        let Some(parent) = levels.last_mut() else { break };
        parent.pending -= 1;

        out.separator(parent);
        out.literal(next.key);
        tracing::trace!(depth = levels.len(), key = next.key, "opening nested call");

        let mut level = match target {
            Target::Create => {
                out.sql.push_str(", COLUMN_CREATE(");
                Level {
                    pending: 0,
                    has_args: false,
                }
            }
            Target::Update { column } => {
                out.sql.push_str(", COLUMN_ADD(");
                out.read_chain(column, &next.path);
                Level {
                    pending: 0,
                    has_args: true,
                }
            }
        };
        emit_entries(&mut out, target, next.entries, &next.path, &mut level, &mut pending);
        levels.push(level);
    }

    tracing::debug!(
        kind = target.name(),
        bytes = out.sql.len(),
        params = out.params.len(),
        "encoded dynamic-column expression"
    );
    Ok(out.finish())
}

/// Write the scalar entries of one mapping into the current call and defer its
/// non-empty nested mappings onto `pending`.
fn emit_entries<'a>(
    out: &mut Writer,
    target: Target<'_>,
    entries: &'a [(String, Value)],
    path: &[&'a str],
    level: &mut Level,
    pending: &mut Vec<Pending<'a>>,
) {
    for (key, value) in entries {
        match value {
            Value::Null => match target {
                Target::Create => {}
                Target::Update { .. } => {
                    out.key(level, key);
                    out.sql.push_str("'NULL'");
                }
            },
            Value::Mapping(children) if children.is_empty() => {
                out.key(level, key);
                out.sql.push_str("NULL");
            }
            Value::Mapping(children) => {
                let path = match target {
                    Target::Create => Vec::new(),
                    Target::Update { .. } => {
                        let mut child_path = Vec::with_capacity(path.len() + 1);
                        child_path.extend_from_slice(path);
                        child_path.push(key.as_str());
                        child_path
                    }
                };
                pending.push(Pending {
                    key: key.as_str(),
                    entries: children,
                    path,
                });
                level.pending += 1;
            }
            Value::Bool(b) => {
                out.key(level, key);
                out.sql.push_str(if *b { "1" } else { "0" });
                out.sql.push_str(" AS unsigned integer");
            }
            Value::Number(n) => {
                out.key(level, key);
                match format_number(*n) {
                    Some(number) => {
                        out.sql.push_str(&number);
                        out.sql.push_str(" AS double");
                    }
                    None => out.sql.push_str("NULL"),
                }
            }
            Value::Text(s) => {
                out.key(level, key);
                out.literal(s);
            }
        }
    }
}

/// Output buffer plus the positional parameters collected so far.
struct Writer {
    sql: String,
    params: Vec<String>,
    mode: Params,
}

impl Writer {
    fn new(mode: Params) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            mode,
        }
    }

    /// Write a key or text literal, or its placeholder.
    fn literal(&mut self, s: &str) {
        match self.mode {
            Params::Inline => push_quoted_literal(s, &mut self.sql),
            Params::Positional => {
                self.sql.push('?');
                self.params.push(s.to_string());
            }
        }
    }

    fn separator(&mut self, level: &mut Level) {
        if level.has_args {
            self.sql.push_str(", ");
        }
        level.has_args = true;
    }

    /// Write `key, ` so the value can follow.
    fn key(&mut self, level: &mut Level, key: &str) {
        self.separator(level);
        self.literal(key);
        self.sql.push_str(", ");
    }

    /// `COLUMN_GET(COLUMN_GET(`col`, 'k1' AS BLOB), 'k2' AS BLOB)` for `path = [k1, k2]`.
    fn read_chain(&mut self, column: &str, path: &[&str]) {
        for _ in path {
            self.sql.push_str("COLUMN_GET(");
        }
        push_quoted_identifier(column, &mut self.sql);
        for key in path {
            self.sql.push_str(", ");
            self.literal(key);
            self.sql.push_str(" AS BLOB)");
        }
    }

    fn finish(self) -> Expression {
        Expression {
            sql: self.sql,
            params: self.params,
        }
    }
}

/// Format a number for a `AS double` literal:
/// - Integral values print without a fractional part
/// - Magnitudes of at least 1e21 or below 1e-6 use exponent notation with a
///   signed exponent (`1e+300`, `1.5e-7`), the others print in full
/// - Negative zero normalizes to 0
///
/// Returns `None` for NaN and infinities, which have no SQL literal.
fn format_number(n: f64) -> Option<String> {
    if !n.is_finite() {
        return None;
    }
    let n = if n == 0.0 { 0.0 } else { n };
    let magnitude = n.abs();
    if magnitude >= 1e21 || (magnitude > 0.0 && magnitude < 1e-6) {
        let formatted = format!("{:e}", n);
        return Some(match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        });
    }
    if n.fract() == 0.0 && magnitude < (i64::MAX as f64) {
        return Some((n as i64).to_string());
    }
    Some(format!("{}", n))
}
