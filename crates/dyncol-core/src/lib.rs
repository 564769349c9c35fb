//! # dyncol-core
//!
//! Pure-Rust encoder that turns JSON documents into **MariaDB dynamic-column**
//! expressions.
//!
//! MariaDB stores schemaless attributes in a blob built with `COLUMN_CREATE`
//! and modified with `COLUMN_ADD`. This crate converts a document into the
//! matching nested expression, so it can be written without a JSON column
//! type. Arrays are stored by index and come back as objects.
//!
//! ## Quick start
//!
//! ```rust
//! use dyncol_core::{create_query, update_query};
//!
//! let json = r#"{"name":"Alice","score":95,"meta":{"admin":true}}"#;
//! let create = create_query(json).unwrap();
//! assert_eq!(
//!     create,
//!     "COLUMN_CREATE('name', 'Alice', 'score', 95 AS double, \
//!      'meta', COLUMN_CREATE('admin', 1 AS unsigned integer))"
//! );
//!
//! let update = update_query("attrs", r#"{"meta":{"admin":false}}"#).unwrap();
//! assert_eq!(
//!     update,
//!     "COLUMN_ADD(`attrs`, 'meta', COLUMN_ADD(COLUMN_GET(`attrs`, 'meta' AS BLOB), \
//!      'admin', 0 AS unsigned integer))"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`encoder`]: document tree → `COLUMN_CREATE` / `COLUMN_ADD` expression
//! - [`value`]: `Value` document tree and JSON conversion
//! - [`escape`]: SQL literal and identifier quoting
//! - [`error`]: Error types for parse/encode failures

pub mod encoder;
pub mod error;
pub mod escape;
pub mod value;

pub use encoder::{
    create_expression, create_query, update_expression, update_query, Expression, Params,
};
pub use error::DynColError;
pub use value::Value;
