use saboteur_core::io::{load_groups_csv, parse_groups_csv};
use saboteur_core::model::GroupBatch;
use saboteur_core::report::{
    batch_to_csv, render_membership_table, write_batch_report, DEFAULT_GROUP_NAMING,
};
use saboteur_core::SaboteurError;
use tempfile::tempdir;

const RESULTS_CSV: &str = "\
construct, result, parts
1, success, A, C, D
2, failure, B, C, E

3, success, A, B, D
4, failure, D, F, G
";

#[test]
fn parses_outcome_sheet() {
    let data = parse_groups_csv(RESULTS_CSV).expect("parse");
    assert!(data.has_results);
    assert_eq!(data.groups.len(), 4);
    assert_eq!(data.failed, vec!["2", "4"]);
    assert_eq!(data.groups.get("4").unwrap().elements, vec!["D", "F", "G"]);
}

#[test]
fn parses_plain_batch_sheet_with_trailing_commas() {
    let data = parse_groups_csv("group,elements\ng1,A,B,\ng2, C ,,D\n").expect("parse");
    assert!(!data.has_results);
    assert!(data.failed.is_empty());
    assert_eq!(data.groups.get("g1").unwrap().elements, vec!["A", "B"]);
    assert_eq!(data.groups.get("g2").unwrap().elements, vec!["C", "D"]);
}

#[test]
fn rejects_empty_sheet_and_duplicate_names() {
    assert!(matches!(parse_groups_csv("\n\n"), Err(SaboteurError::InvalidInput(_))));

    let err = parse_groups_csv("group,elements\ng1,A\ng1,B\n").unwrap_err();
    assert!(err.to_string().contains("line 3: duplicate group name 'g1'"), "{err}");
}

#[test]
fn rejects_outcome_row_without_result() {
    let err = parse_groups_csv("name,result,members\ng1\n").unwrap_err();
    assert!(err.to_string().contains("line 2: missing result"), "{err}");
}

#[test]
fn loads_sheet_from_disk_and_reports_missing_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");
    std::fs::write(&path, RESULTS_CSV).unwrap();
    let data = load_groups_csv(&path).expect("load");
    assert_eq!(data.failed.len(), 2);

    let err = load_groups_csv(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, SaboteurError::Io { .. }));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn batch_csv_round_trips_through_parser() {
    let batch = GroupBatch::from_pairs([("g1", vec!["A", "B"]), ("g2", vec!["C"])]).unwrap();
    let csv = batch_to_csv(&batch, "construct");
    assert_eq!(csv, "construct,elements\ng1,A,B\ng2,C\n");

    let parsed = parse_groups_csv(&csv).unwrap();
    assert_eq!(parsed.groups, batch);
}

#[test]
fn membership_table_marks_members() {
    let batch = GroupBatch::from_pairs([("alpha", vec!["A", "B"]), ("beta", vec!["B"])]).unwrap();
    let table = render_membership_table(&batch);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines[0], "  | 1 2");
    assert_eq!(lines[1], "A | # .");
    assert_eq!(lines[2], "B | # #");
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "1: alpha");
    assert_eq!(lines[5], "2: beta");
}

#[test]
fn writes_report_directory() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("nested").join("report");
    let batch = GroupBatch::from_pairs([("g1", vec!["A"]), ("g2", vec!["B"])]).unwrap();

    let written = write_batch_report(&batch, &target, DEFAULT_GROUP_NAMING).expect("report");
    assert_eq!(written, vec![target.join("groups.csv"), target.join("groups.txt")]);
    let csv = std::fs::read_to_string(target.join("groups.csv")).unwrap();
    assert!(csv.starts_with("group,elements\n"));
    let txt = std::fs::read_to_string(target.join("groups.txt")).unwrap();
    assert!(txt.contains("1: g1"));
}
