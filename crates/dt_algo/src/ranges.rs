//! Range construction: ordered (label, count) rows → contiguous inclusive
//! ranges starting at face 1. Zero-count rows emit nothing.

use dt_core::RangeRow;

pub fn build_ranges<'a, I>(rows: I) -> Vec<RangeRow>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let mut cursor: u32 = 1;
    let mut out = Vec::new();
    for (label, count) in rows {
        if count == 0 {
            continue;
        }
        let hi = cursor + (count - 1);
        out.push(RangeRow { lo: cursor, hi, label: label.to_string() });
        cursor = hi + 1;
    }
    out
}
