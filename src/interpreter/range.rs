use crate::error::RuntimeError;
use crate::interpreter::evaluator::core::EvalResult;

/// A parsed A1-style cell or rectangle reference, with 1-indexed inclusive
/// bounds normalized so `r1 <= r2` and `c1 <= c2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRef {
    /// First row.
    pub r1: usize,
    /// First column.
    pub c1: usize,
    /// Last row.
    pub r2: usize,
    /// Last column.
    pub c2: usize,
}

/// Parses an A1 reference like `A1` or a rectangle like `A1:E3`.
///
/// Column letters form a bijective base-26 numbering (`A`=1 … `Z`=26,
/// `AA`=27, …). A rectangle's two corners may be given in either order; the
/// result is normalized to (min, max) on each axis. Matching is
/// case-insensitive and surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`RuntimeError::InvalidRange`] for anything that is not a letter
/// run followed by a digit run (on either side of an optional single `:`).
///
/// # Example
/// ```
/// use datable::interpreter::range::parse_a1;
///
/// let range = parse_a1("B2:A1", 1).unwrap();
/// assert_eq!((range.r1, range.c1, range.r2, range.c2), (1, 1, 2, 2));
/// assert_eq!(parse_a1("AA1", 1).unwrap().c1, 27);
/// ```
pub fn parse_a1(text: &str, line: usize) -> EvalResult<RangeRef> {
    let trimmed = text.trim().to_uppercase();
    let invalid = || RuntimeError::InvalidRange { text: text.to_string(),
                                                  line };
    match trimmed.split_once(':') {
        None => {
            let (row, col) = single_cell(&trimmed).ok_or_else(invalid)?;
            Ok(RangeRef { r1: row,
                          c1: col,
                          r2: row,
                          c2: col, })
        },
        Some((first, second)) => {
            if second.contains(':') {
                return Err(invalid());
            }
            let (ra, ca) = single_cell(first).ok_or_else(invalid)?;
            let (rb, cb) = single_cell(second).ok_or_else(invalid)?;
            Ok(RangeRef { r1: ra.min(rb),
                          c1: ca.min(cb),
                          r2: ra.max(rb),
                          c2: ca.max(cb), })
        },
    }
}

/// Splits one corner reference (`AB12`) into its (row, column) pair.
fn single_cell(text: &str) -> Option<(usize, usize)> {
    let split = text.find(|c: char| !c.is_ascii_uppercase())?;
    if split == 0 {
        return None;
    }
    let (letters, digits) = text.split_at(split);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let col = column_index(letters)?;
    let row = digits.parse().ok()?;
    Some((row, col))
}

/// Converts a column letter run into its 1-indexed column number.
fn column_index(letters: &str) -> Option<usize> {
    let mut n = 0usize;
    for ch in letters.chars() {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        n = n.checked_mul(26)?
             .checked_add(ch as usize - 'A' as usize + 1)?;
    }
    if n == 0 { None } else { Some(n) }
}

/// The one-slot buffer filled by `sao_chep_vùng` and replayed by
/// `dán_vùng`: a rectangle of cell text captured row by row.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    /// The captured rows of cell text.
    pub rows: Vec<Vec<String>>,
}

impl Clipboard {
    /// Number of captured rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of captured columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}
