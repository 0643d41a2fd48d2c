//! A1-style cell addressing
//!
//! Columns use bijective base-26 numbering: there is no zero digit, so the
//! column after `Z` is `AA` rather than `BA` or `A0`.

/// Convert a zero-based column index to its letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    // Only ASCII uppercase letters were pushed
    letters.into_iter().map(char::from).collect()
}

/// Inverse of [`column_letters`]. Returns `None` for empty input, anything
/// other than ASCII uppercase letters, or an index that does not fit in `usize`.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut acc: usize = 0;
    for byte in letters.bytes() {
        if !byte.is_ascii_uppercase() {
            return None;
        }
        let digit = usize::from(byte - b'A' + 1);
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    Some(acc - 1)
}

/// Build a cell reference from a zero-based column and a one-based row
pub fn cell_reference(column: usize, row: usize) -> String {
    format!("{}{}", column_letters(column), row)
}
