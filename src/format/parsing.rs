//! Allocation-free field splitting for BED4 lines.
//!
//! The reader turns each raw line into four byte slices here, then does
//! the typed conversion (and error reporting) itself.

use memchr::memchr_iter;

/// Number of columns in a BED4 line.
pub const BED4_FIELDS: usize = 4;

/// Parse an unsigned decimal coordinate without going through `str`.
///
/// Returns None if the input is empty, contains a non-digit character,
/// or does not fit in a u64.
#[inline]
pub fn parse_u64_fast(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Strip a trailing `\n` or `\r\n`.
#[inline]
pub fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Check if a line should be skipped (blank, comment, or header).
///
/// `track` and `browser` only count as headers when followed by whitespace
/// or the end of the line; `trackchr` is a chromosome name.
#[inline]
pub fn should_skip_line(line: &[u8]) -> bool {
    line.iter().all(|b| b.is_ascii_whitespace())
        || line[0] == b'#'
        || is_header(line, b"track")
        || is_header(line, b"browser")
}

#[inline]
fn is_header(line: &[u8], keyword: &[u8]) -> bool {
    match line.strip_prefix(keyword) {
        Some(rest) => rest.first().map_or(true, |b| b.is_ascii_whitespace()),
        None => false,
    }
}

/// Split a line into exactly four tab-separated fields.
///
/// On a wrong column count returns `Err(n)` with the number of fields found.
#[inline]
pub fn split_bed4(line: &[u8]) -> Result<[&[u8]; BED4_FIELDS], usize> {
    let mut fields: [&[u8]; BED4_FIELDS] = [&[]; BED4_FIELDS];
    let mut count = 0;
    let mut field_start = 0;

    for tab in memchr_iter(b'\t', line) {
        if count < BED4_FIELDS {
            fields[count] = &line[field_start..tab];
        }
        count += 1;
        field_start = tab + 1;
    }
    if count < BED4_FIELDS {
        fields[count] = &line[field_start..];
    }
    count += 1;

    if count == BED4_FIELDS {
        Ok(fields)
    } else {
        Err(count)
    }
}

/// Split a query line on any run of ASCII whitespace.
///
/// Query regions are written by hand more often than BED data, so spaces
/// are accepted as well as tabs.
pub fn split_whitespace(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|b| b.is_ascii_whitespace())
        .filter(|field| !field.is_empty())
}
