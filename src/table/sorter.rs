use log::debug;
use std::cmp::Ordering;

use crate::models::table::{ColumnKind, SortDirection, Table};

/// Sort the data rows of `table` by `column`, toggling direction on repeat.
///
/// Rows are sorted ascending unless they already are, in which case they are
/// sorted descending. Clicking the same header again therefore alternates
/// between the two orders. A column whose cells all compare equal (or that
/// has a single data row) is left as is and reported as ascending. The header
/// row never moves and rows that compare equal keep their relative order.
/// Rows shorter than `column` compare as if the cell were empty.
pub fn sort(table: &mut Table, column: usize) -> SortDirection {
    let kind = table.column_kind(column);
    let Some(data) = table.rows.get_mut(1..) else {
        return SortDirection::Ascending;
    };

    let cmp = |a: &Vec<String>, b: &Vec<String>| compare_cells(cell(a, column), cell(b, column), kind);

    let already_ascending = data.windows(2).all(|w| cmp(&w[0], &w[1]) != Ordering::Greater);
    let all_equal = data.windows(2).all(|w| cmp(&w[0], &w[1]) == Ordering::Equal);
    // a column with nothing to reorder stays put and reads as ascending
    let direction = if already_ascending && !all_equal {
        data.sort_by(|a, b| cmp(b, a));
        SortDirection::Descending
    } else {
        data.sort_by(cmp);
        SortDirection::Ascending
    };

    debug!(
        "Sorted {} rows by column {} ({:?}, {:?})",
        data.len(),
        column,
        kind,
        direction
    );
    direction
}

fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map_or("", String::as_str)
}

/// Compare two cells of a column.
///
/// Cells that are both finite numbers compare numerically. A number orders
/// before text. Text compares as IPv4 addresses in `Ipv4Address` columns and
/// case-insensitively otherwise.
pub fn compare_cells(a: &str, b: &str, kind: ColumnKind) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => match kind {
            ColumnKind::Ipv4Address => compare_ipv4(a, b),
            ColumnKind::Plain => a.to_lowercase().cmp(&b.to_lowercase()),
        },
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compare dotted-quad addresses segment by segment, most significant first.
///
/// Each segment is read by its leading digits, so `10.0.0.1:443` compares as
/// `10.0.0.1`. A missing or non-numeric segment orders before any number.
pub fn compare_ipv4(a: &str, b: &str) -> Ordering {
    ipv4_key(a).cmp(&ipv4_key(b))
}

fn ipv4_key(address: &str) -> [Option<u64>; 4] {
    let mut key = [None; 4];
    for (slot, segment) in key.iter_mut().zip(address.trim().split('.')) {
        *slot = leading_integer(segment);
    }
    key
}

fn leading_integer(segment: &str) -> Option<u64> {
    let digits: String = segment
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_segments_compare_numerically() {
        assert_eq!(compare_ipv4("10.0.0.2", "10.0.0.10"), Ordering::Less);
        assert_eq!(compare_ipv4("192.168.1.1", "10.255.255.255"), Ordering::Greater);
        assert_eq!(compare_ipv4("1.2.3.4", "1.2.3.4"), Ordering::Equal);
    }

    #[test]
    fn ipv4_ignores_port_suffix() {
        assert_eq!(compare_ipv4("10.0.0.1:443", "10.0.0.1:80"), Ordering::Equal);
        assert_eq!(compare_ipv4("10.0.0.1:443", "10.0.0.2:80"), Ordering::Less);
    }

    #[test]
    fn malformed_address_sorts_first() {
        assert_eq!(compare_ipv4("*", "0.0.0.0"), Ordering::Less);
        assert_eq!(compare_ipv4("10.0", "10.0.0.0"), Ordering::Less);
    }

    #[test]
    fn numbers_beat_lexical_order() {
        assert_eq!(compare_cells("9", "10", ColumnKind::Plain), Ordering::Less);
        assert_eq!(compare_cells("1.5", "1e1", ColumnKind::Plain), Ordering::Less);
        assert_eq!(compare_cells("10", "abc", ColumnKind::Plain), Ordering::Less);
    }

    #[test]
    fn text_is_case_insensitive() {
        assert_eq!(compare_cells("Chrome", "chrome", ColumnKind::Plain), Ordering::Equal);
        assert_eq!(compare_cells("alpha", "Beta", ColumnKind::Plain), Ordering::Less);
    }

    #[test]
    fn non_finite_values_are_text() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(" 42 "), Some(42.0));
    }

    #[test]
    fn equal_cells_report_ascending() {
        let mut table = Table::new(vec![
            vec!["H".to_string()],
            vec!["x".to_string()],
            vec!["X".to_string()],
        ]);
        for _ in 0..3 {
            assert_eq!(sort(&mut table, 0), SortDirection::Ascending);
        }
        assert_eq!(table.rows[1][0], "x");
    }

    #[test]
    fn single_row_reports_ascending() {
        let mut table = Table::new(vec![vec!["PID".to_string()], vec!["7".to_string()]]);
        assert_eq!(sort(&mut table, 0), SortDirection::Ascending);
        assert_eq!(sort(&mut table, 0), SortDirection::Ascending);
    }

    #[test]
    fn header_only_table_is_untouched() {
        let mut table = Table::new(vec![vec!["PID".to_string()]]);
        assert_eq!(sort(&mut table, 0), SortDirection::Ascending);
        assert_eq!(table.rows.len(), 1);
    }
}
