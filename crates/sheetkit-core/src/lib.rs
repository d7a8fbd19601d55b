//! # sheetkit-core
//!
//! Host-independent building blocks for sheetkit:
//! - [`column_to_letters`] / [`letters_to_column`] - the column codec
//! - [`A1Range`] and [`A1Cell`] - sheet-scoped A1 address strings
//! - [`Span`] and [`Extent`] - 1-based regions with optional open ends
//! - [`ErrorKind`] - classified local failures and their display text
//!
//! ## Example
//!
//! ```rust
//! use sheetkit_core::{A1Range, Extent};
//!
//! let range = A1Range::new("Sheet1", 1, 1, Extent::All, 99).unwrap();
//! assert_eq!(range.to_string(), "Sheet1!A1:CU");
//! ```

pub mod address;
pub mod column;
pub mod error;

pub use address::{quote_sheet_name, quoted_sheet_name, A1Cell, A1Range, Extent, Span};
pub use column::{column_to_letters, letters_to_column};
pub use error::{Error, ErrorKind, Result};
