//! Column number <-> letter conversion
//!
//! Columns are numbered from 1 (`A`). Letters form a base-26 numeral system
//! with no zero digit: `Z` is 26 and `AA` follows it as 27.

use crate::error::{Error, ErrorKind, Result};

/// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA, etc.)
///
/// Column 0 has no letters and yields an empty string.
///
/// # Examples
/// ```
/// use sheetkit_core::column_to_letters;
///
/// assert_eq!(column_to_letters(1), "A");
/// assert_eq!(column_to_letters(99), "CU");
/// assert_eq!(column_to_letters(702), "ZZ");
/// ```
pub fn column_to_letters(column: u32) -> String {
    let mut letters = Vec::new();
    let mut n = column;

    while n > 0 {
        let digit = (n - 1) % 26;
        letters.push(b'A' + digit as u8);
        n = (n - digit - 1) / 26;
    }

    letters.reverse();
    // Only ASCII uppercase bytes were pushed
    letters.into_iter().map(char::from).collect()
}

/// Convert column letters to a 1-based column number (A = 1, Z = 26, AA = 27, etc.)
///
/// Letters are case-insensitive.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    let letters = letters.trim();
    if letters.is_empty() {
        return Err(Error::new(ErrorKind::InvalidColumn, "empty column letters"));
    }

    let mut column: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::new(
                ErrorKind::InvalidColumn,
                format!("invalid column letter '{}' in '{}'", c, letters),
            ));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        column = column
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidColumn,
                    format!("column '{}' is too large", letters),
                )
            })?;
    }

    Ok(column)
}
