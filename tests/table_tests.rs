mod common;

use common::{double_model, single_model};
use flamebearer_engine::aggregator::{
    aggregate, filter_rows, sort_rows, SortColumn, SortDirection, TableReport, TableRow,
};
use flamebearer_engine::units::DiffKind;
use pretty_assertions::assert_eq;

fn names(rows: &[TableRow]) -> Vec<&str> {
    rows.iter().map(|row| row.name()).collect()
}

#[test]
fn test_single_table_sorted_by_total() {
    let model = single_model();
    let mut rows = aggregate(&model);
    sort_rows(&mut rows, SortColumn::Total, SortDirection::Desc);

    assert_eq!(names(&rows), vec!["total", "a", "b", "c"]);
    assert_eq!(
        rows[1],
        TableRow::Single {
            name: "a".to_string(),
            self_ticks: 10,
            total: 60,
        }
    );
}

#[test]
fn test_single_table_sorted_by_self_ascending() {
    let model = single_model();
    let mut rows = aggregate(&model);
    sort_rows(&mut rows, SortColumn::SelfTicks, SortDirection::Asc);

    assert_eq!(names(&rows), vec!["total", "a", "c", "b"]);
}

#[test]
fn test_self_values_sum_to_num_ticks() {
    let model = single_model();
    let sum: u64 = aggregate(&model).iter().map(|row| row.self_ticks()).sum();
    assert_eq!(sum, model.num_ticks());
}

#[test]
fn test_double_table_diff_columns() {
    let model = double_model();
    let mut rows = aggregate(&model);
    sort_rows(&mut rows, SortColumn::SelfDiff, SortDirection::Desc);

    // a and b tie on +5 and keep first-seen order
    assert_eq!(names(&rows), vec!["a", "b", "total"]);
    assert_eq!(rows[1].value(SortColumn::TotalLeft), Some(0));
    assert_eq!(rows[1].value(SortColumn::TotalRight), Some(5));
    assert_eq!(rows[2].value(SortColumn::TotalDiff), Some(10));
}

#[test]
fn test_double_report_labels_new_functions() {
    let model = double_model();
    let rows = filter_rows(aggregate(&model), "b");
    let report = TableReport::new(&model, rows);

    assert_eq!(report.len(), 1);
    assert_eq!(report.columns.len(), 7);

    let total_diff = &report.rows[0].cells[6];
    assert_eq!(total_diff.text, "(new)");
    assert_eq!(total_diff.diff, Some(DiffKind::New));
}

#[test]
fn test_single_report_cells_carry_percent() {
    let model = single_model();
    let report = TableReport::new(&model, aggregate(&model));

    let b = report
        .rows
        .iter()
        .find(|row| row.row.name() == "b")
        .unwrap();
    assert_eq!(b.cells[0].text, "b");
    assert!(b.cells[1].text.ends_with("(50%)"), "{}", b.cells[1].text);
    assert!(b.cells[2].text.ends_with("(50%)"), "{}", b.cells[2].text);
}

#[test]
fn test_filter_is_case_sensitive() {
    let model = single_model();
    assert_eq!(filter_rows(aggregate(&model), "A").len(), 0);
    assert_eq!(filter_rows(aggregate(&model), "").len(), 4);
}
