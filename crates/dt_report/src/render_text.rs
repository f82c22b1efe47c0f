//! Unicode box table: header `[die, "Result"]`, one line per range,
//! one space of padding on each side of a cell.
//!
//! ```text
//! ┌─────┬────────┐
//! │ d6  │ Result │
//! ├─────┼────────┤
//! │ 1   │ a      │
//! │ 2–3 │ b      │
//! └─────┴────────┘
//! ```

use dt_pipeline::{DieTable, DieTableRow};
use unicode_width::UnicodeWidthStr;

/// Range cell text: a single label, or `low–high` with an en dash.
pub fn range_text(row: &DieTableRow) -> String {
    if row.is_single() {
        row.low.clone()
    } else {
        format!("{}–{}", row.low, row.high)
    }
}

pub fn render_text(table: &DieTable) -> String {
    let body: Vec<[String; 2]> = table
        .rows
        .iter()
        .map(|r| [range_text(r), r.result.clone()])
        .collect();
    let header = [table.die.clone(), "Result".to_string()];

    let mut widths = [width(&header[0]), width(&header[1])];
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(width(cell));
        }
    }

    let mut out = String::new();
    rule(&mut out, &widths, ['┌', '┬', '┐']);
    line(&mut out, &widths, &header);
    rule(&mut out, &widths, ['├', '┼', '┤']);
    for cells in &body {
        line(&mut out, &widths, cells);
    }
    rule(&mut out, &widths, ['└', '┴', '┘']);
    out
}

/// Terminal columns taken by `s`; wide CJK and emoji count as two.
fn width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn rule(out: &mut String, widths: &[usize; 2], [left, mid, right]: [char; 3]) {
    out.push(left);
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            out.push(mid);
        }
        out.extend(std::iter::repeat('─').take(w + 2));
    }
    out.push(right);
    out.push('\n');
}

fn line(out: &mut String, widths: &[usize; 2], cells: &[String; 2]) {
    out.push('│');
    for (w, cell) in widths.iter().zip(cells) {
        out.push(' ');
        out.push_str(cell);
        out.extend(std::iter::repeat(' ').take(w - width(cell) + 1));
        out.push('│');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use dt_core::{ErrorReport, Ratio};

    fn row(low: &str, high: &str, result: &str) -> DieTableRow {
        DieTableRow { low: low.into(), high: high.into(), result: result.into() }
    }

    fn table(die: &str, rows: Vec<DieTableRow>) -> DieTable {
        DieTable {
            die: die.into(),
            rows,
            error: ErrorReport {
                mean_relative_error: Ratio::zero(),
                highest_relative_error: Ratio::zero(),
                mean_squared_error: Ratio::zero(),
            },
            dropped: Vec::new(),
        }
    }

    #[test]
    fn boxes_ranges_and_singles() {
        let t = table("d6", vec![row("1", "1", "a"), row("2", "3", "b"), row("4", "6", "c")]);
        let expected = "\
┌─────┬────────┐
│ d6  │ Result │
├─────┼────────┤
│ 1   │ a      │
│ 2–3 │ b      │
│ 4–6 │ c      │
└─────┴────────┘
";
        assert_eq!(render_text(&t), expected);
    }

    #[test]
    fn long_results_widen_the_column() {
        let t = table("d%", vec![row("01", "50", "Ancient red dragon"), row("51", "00", "x")]);
        let text = render_text(&t);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "│ d%    │ Result             │");
        assert_eq!(lines[3], "│ 01–50 │ Ancient red dragon │");
        assert_eq!(lines[4], "│ 51–00 │ x                  │");
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn wide_characters_keep_columns_aligned() {
        let t = table("d6", vec![row("1", "3", "竜"), row("4", "6", "ゴブリン")]);
        let text = render_text(&t);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "│ d6  │ Result   │");
        assert_eq!(lines[3], "│ 1–3 │ 竜       │");
        assert_eq!(lines[4], "│ 4–6 │ ゴブリン │");
        let widths: Vec<usize> = lines.iter().map(|l| width(l)).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }

    #[test]
    fn range_text_uses_en_dash() {
        assert_eq!(range_text(&row("11", "36", "x")), "11–36");
        assert_eq!(range_text(&row("00", "00", "x")), "00");
    }
}
