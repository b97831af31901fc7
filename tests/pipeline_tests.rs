mod common;
use common::{HEADER, date, record, setup_workspace, write_csv};

use rutilization::core::aggregate::{aggregate, extract_person_token};
use rutilization::core::derive::{derive, map_utilized, week_of_year};
use rutilization::core::filter::FilterRules;
use rutilization::core::transform::{TransformOptions, run_pipeline};
use rutilization::core::{clean, ingest, project};
use rutilization::errors::AppError;
use rutilization::export::{read_transformed, write_transformed};
use rutilization::models::aggregated::format_hours;
use rutilization::models::utilized::Utilized;
use rutilization::utils::date::parse_lenient;
use std::fs;

fn options(year: i32) -> TransformOptions {
    TransformOptions {
        rules: FilterRules::for_year(year),
        layoff_threshold_hours: 8.0,
        file_extension: "csv".to_string(),
    }
}

#[test]
fn test_utilized_mapping_is_total() {
    for kind in ["Worktime", "Vacation", "Holiday", "Time Bank"] {
        assert_eq!(map_utilized(kind), Utilized::Yes, "{kind}");
    }
    for kind in ["Idle", "Meeting", "Training", "Overhead", "RND"] {
        assert_eq!(map_utilized(kind), Utilized::No, "{kind}");
    }
    assert_eq!(map_utilized("Sabbatical"), Utilized::Unknown);
    assert_eq!(map_utilized(""), Utilized::Unknown);
    // Case matters: the export writes exact type names.
    assert_eq!(map_utilized("worktime"), Utilized::Unknown);
}

#[test]
fn test_week_of_year_is_iso() {
    assert_eq!(week_of_year(Some(date("2025-01-06"))), Some(2));
    assert_eq!(week_of_year(Some(date("2025-01-01"))), Some(1));
    // Belongs to ISO week 1 of 2026.
    assert_eq!(week_of_year(Some(date("2025-12-29"))), Some(1));
    assert_eq!(week_of_year(None), None);
}

#[test]
fn test_filter_rules() {
    let rules = FilterRules::for_year(2025);

    assert!(rules.retains("Sales", "Worktime", Some(date("2025-03-01"))));
    assert!(!rules.retains("Finance", "Worktime", Some(date("2025-03-01"))));
    assert!(!rules.retains("Pipeline & Development", "Worktime", Some(date("2025-03-01"))));
    assert!(!rules.retains("Sales", "Meal Break", Some(date("2025-03-01"))));
    assert!(!rules.retains("Sales", "Time Off Unpaid", Some(date("2025-03-01"))));
    assert!(!rules.retains("Sales", "Worktime", Some(date("2023-05-01"))));
    assert!(!rules.retains("Sales", "Worktime", None));
}

#[test]
fn test_filter_is_idempotent() {
    let rules = FilterRules::for_year(2025);
    let records = vec![
        record("Sales", "Worktime", "P001", 4.0, "2025-01-06"),
        record("Finance", "Worktime", "P002", 4.0, "2025-01-06"),
        record("Sales", "Meal Break", "P003", 1.0, "2025-01-06"),
        record("Sales", "Idle", "P004", 2.0, "2024-12-30"),
        record("Support", "Meeting", "P005", 2.0, "2025-02-11"),
    ];

    let once = rules.apply_records(records);
    let twice = rules.apply_records(once.clone());

    assert_eq!(once.len(), 2);
    assert_eq!(once, twice);
}

#[test]
fn test_aggregate_sums_one_group() {
    let derived = derive(
        vec![
            record("Sales", "Worktime", "P001", 4.0, "2025-01-06"),
            record("Sales", "Worktime", "P002", 6.0, "2025-01-06"),
        ],
        8.0,
    );

    let rows = aggregate(&derived);
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.total_hours, 10.0);
    assert_eq!(row.persons, "001, 002");
    assert_eq!(row.total_utilized, 2);
    assert_eq!(row.week_of_year, Some(2));
    assert_eq!(row.source_rows, 2);
}

#[test]
fn test_aggregate_counts_only_utilized_rows() {
    let derived = derive(
        vec![
            record("Sales", "Worktime", "P001", 4.0, "2025-01-06"),
            record("Sales", "Worktime", "P001", 2.0, "2025-01-06"),
            record("Sales", "Idle", "P002", 3.0, "2025-01-06"),
            record("Sales", "Sabbatical", "P003", 1.0, "2025-01-06"),
        ],
        8.0,
    );

    let rows = aggregate(&derived);
    assert_eq!(rows.len(), 3);

    let worktime = rows.iter().find(|r| r.kind == "Worktime").expect("worktime");
    assert_eq!(worktime.total_hours, 6.0);
    assert_eq!(worktime.persons, "001");
    assert_eq!(worktime.total_utilized, 2);

    let idle = rows.iter().find(|r| r.kind == "Idle").expect("idle");
    assert_eq!(idle.total_utilized, 0);

    let unknown = rows.iter().find(|r| r.kind == "Sabbatical").expect("sabbatical");
    assert_eq!(unknown.total_utilized, 0);
}

#[test]
fn test_grouping_is_exhaustive_and_ordered() {
    let input = vec![
        record("Sales", "Worktime", "P001", 1.0, "2025-01-07"),
        record("Support", "Worktime", "P002", 2.0, "2025-01-06"),
        record("Sales", "Worktime", "P003", 3.0, "2025-01-06"),
        record("Sales", "Meeting", "P001", 4.0, "2025-01-06"),
        record("Sales", "Worktime", "P004", 5.0, "2025-01-06"),
        record("Support", "Worktime", "P002", 6.0, "2025-01-14"),
    ];
    let total_hours: f64 = input.iter().map(|r| r.logged_hours).sum();
    let count = input.len();

    let rows = aggregate(&derive(input, 8.0));

    assert_eq!(rows.iter().map(|r| r.source_rows).sum::<usize>(), count);
    assert_eq!(rows.iter().map(|r| r.total_hours).sum::<f64>(), total_hours);
    assert_eq!(rows.len(), 5);

    // Ascending by (location, brand, department, week, type, date).
    assert_eq!(rows[0].department, "Sales");
    assert_eq!(rows[0].kind, "Meeting");
    assert_eq!(rows[1].kind, "Worktime");
    assert_eq!(rows[1].date, Some(date("2025-01-06")));
    assert_eq!(rows[1].persons, "003, 004");
    assert_eq!(rows[2].date, Some(date("2025-01-07")));
    assert_eq!(rows[3].department, "Support");
    assert_eq!(rows[4].week_of_year, Some(3));
}

#[test]
fn test_tmp_layoff_marks_light_weeks() {
    let derived = derive(
        vec![
            // P001: 3 + 5 = 8 hours in week 2 → marked (inclusive bound).
            record("Sales", "Worktime", "P001", 3.0, "2025-01-06"),
            record("Sales", "Meeting", "P001", 5.0, "2025-01-08"),
            // P002: 9 hours in week 2 → not marked.
            record("Sales", "Worktime", "P002", 9.0, "2025-01-06"),
            // P002: 2 hours in week 3 → marked.
            record("Sales", "Worktime", "P002", 2.0, "2025-01-13"),
        ],
        8.0,
    );

    let markers: Vec<&str> = derived.iter().map(|d| d.tmp_layoff_marker()).collect();
    assert_eq!(markers, vec!["1", "1", "", "1"]);
}

#[test]
fn test_person_tokens() {
    assert_eq!(extract_person_token("P001"), Some("001".to_string()));
    assert_eq!(extract_person_token("Jane Doe (42) #7"), Some("42".to_string()));
    assert_eq!(extract_person_token("Jane Doe"), None);

    let derived = derive(
        vec![
            record("Sales", "Worktime", "P10", 1.0, "2025-01-06"),
            record("Sales", "Worktime", "Contractor", 1.0, "2025-01-06"),
            record("Sales", "Worktime", "P9", 1.0, "2025-01-06"),
            record("Sales", "Worktime", "P10", 1.0, "2025-01-06"),
        ],
        8.0,
    );
    let rows = aggregate(&derived);

    // Missing token first, then string order ("10" < "9").
    assert_eq!(rows[0].persons, ", 10, 9");
}

#[test]
fn test_lenient_dates() {
    let expected = Some(date("2025-01-06"));
    assert_eq!(parse_lenient("2025-01-06"), expected);
    assert_eq!(parse_lenient(" 2025/01/06 "), expected);
    assert_eq!(parse_lenient("01/06/2025"), expected);
    assert_eq!(parse_lenient("1/6/2025"), expected);
    assert_eq!(parse_lenient("06.01.2025"), expected);
    assert_eq!(parse_lenient("2025-01-06 08:30:00"), expected);
    assert_eq!(parse_lenient("2025-01-06T08:30:00"), expected);
    assert_eq!(parse_lenient("Jan 6, 2025"), expected);
    assert_eq!(parse_lenient("January 6, 2025"), expected);
    assert_eq!(parse_lenient("not a date"), None);
    assert_eq!(parse_lenient(""), None);
    assert_eq!(parse_lenient("2025-02-30"), None);
}

#[test]
fn test_ingest_aligns_columns_across_files() {
    let ws = setup_workspace("ingest_align");
    let data = ws.join("data");

    write_csv(
        &data,
        "2025-01.csv",
        HEADER,
        &["1,Montreal,Acme,Sales,Worktime,P001,2025-01-06,4"],
    );
    // Different column order, the export's spelling of the brand column and
    // an extra column.
    write_csv(
        &data,
        "2025-02.csv",
        "Person,Logged Hours,Id,Location,Person > Brand,Department,Type,Date,Note",
        &["P002,6,2,Montreal,Acme,Sales,Worktime,2025-01-06,late"],
    );
    write_csv(&data, "readme.txt", "not,a,period,file", &[]);

    let mut frame = ingest::ingest_dir(&data, "csv").expect("ingest");
    assert_eq!(frame.files, 2);
    assert_eq!(frame.len(), 2);
    assert!(frame.column_index("Note").is_some());

    clean::clean_dates(&mut frame).expect("clean");
    let records = project::project(&frame).expect("project");

    assert_eq!(records[0].person, "P001");
    assert_eq!(records[0].origin.file, "2025-01.csv");
    assert_eq!(records[1].brand, "Acme");
    assert_eq!(records[1].logged_hours, 6.0);
    assert_eq!(records[1].date, Some(date("2025-01-06")));
}

#[test]
fn test_ingest_errors() {
    let ws = setup_workspace("ingest_errors");

    let missing = ingest::ingest_dir(&ws.join("nope"), "csv");
    assert!(matches!(missing, Err(AppError::InputDirMissing(_))));

    let empty = ingest::ingest_dir(&ws.join("data"), "csv");
    assert!(matches!(empty, Err(AppError::NoInputFiles { .. })));

    write_csv(
        &ws.join("data"),
        "ragged.csv",
        HEADER,
        &["1,Montreal,Acme,Sales,Worktime,P001,2025-01-06,4,extra"],
    );
    match ingest::ingest_dir(&ws.join("data"), "csv") {
        Err(AppError::MalformedFile { file, .. }) => assert_eq!(file, "ragged.csv"),
        other => panic!("expected MalformedFile, got {:?}", other.map(|f| f.len())),
    }
}

#[test]
fn test_projection_requires_essential_columns() {
    let ws = setup_workspace("projection_missing");
    let data = ws.join("data");
    write_csv(
        &data,
        "p.csv",
        "Id,Location,Department,Type,Person,Date,Logged Hours",
        &["1,Montreal,Sales,Worktime,P001,2025-01-06,4"],
    );

    let frame = ingest::ingest_dir(&data, "csv").expect("ingest");
    match project::project(&frame) {
        Err(AppError::MissingColumn { column, .. }) => assert_eq!(column, "Person>Brand"),
        other => panic!("expected MissingColumn, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_invalid_hours_reports_location() {
    let ws = setup_workspace("invalid_hours");
    let data = ws.join("data");
    write_csv(
        &data,
        "p.csv",
        HEADER,
        &[
            "1,Montreal,Acme,Sales,Worktime,P001,2025-01-06,",
            "2,Montreal,Acme,Sales,Worktime,P001,2025-01-06,four",
        ],
    );

    let frame = ingest::ingest_dir(&data, "csv").expect("ingest");
    match project::project(&frame) {
        Err(AppError::InvalidHours { file, line, value }) => {
            assert_eq!(file, "p.csv");
            assert_eq!(line, 3);
            assert_eq!(value, "four");
        }
        other => panic!("expected InvalidHours, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_pipeline_end_to_end() {
    let ws = setup_workspace("pipeline_e2e");
    let data = ws.join("data");
    write_csv(
        &data,
        "2025-01.csv",
        HEADER,
        &[
            "1,Montreal,Acme,Sales,Worktime,P001,2025-01-06,4",
            "2,Montreal,Acme,Sales,Worktime,P002,01/06/2025,6",
            "3,Montreal,Acme,Finance,Worktime,P003,2025-01-06,8",
            "4,Montreal,Acme,Sales,Meal Break,P001,2025-01-06,1",
            "5,Montreal,Acme,Sales,Worktime,P001,2023-05-01,8",
            "6,Montreal,Acme,Sales,Worktime,P004,garbage,8",
            "7,Toronto,Globex,Support,Idle,P005,2025-01-07,2.5",
        ],
    );

    let frame = ingest::ingest_dir(&data, "csv").expect("ingest");
    let out = run_pipeline(frame, &options(2025)).expect("pipeline");

    assert_eq!(out.summary.rows_loaded, 7);
    assert_eq!(out.summary.unparsed_dates, 1);
    assert_eq!(out.summary.rows_kept, 3);
    assert_eq!(out.summary.rows_filtered_out, 4);
    assert_eq!(out.summary.groups, 2);

    let montreal = &out.aggregated[0];
    assert_eq!(montreal.location, "Montreal");
    assert_eq!(montreal.total_hours, 10.0);
    assert_eq!(montreal.persons, "001, 002");
    assert_eq!(montreal.total_utilized, 2);

    let toronto = &out.aggregated[1];
    assert_eq!(toronto.total_hours, 2.5);
    assert_eq!(toronto.total_utilized, 0);
}

#[test]
fn test_writer_output_format() {
    let ws = setup_workspace("writer_format");
    let derived = derive(
        vec![
            record("Sales", "Worktime", "P001", 4.0, "2025-01-06"),
            record("Sales", "Worktime", "P002", 6.0, "2025-01-06"),
            record("Sales", "Idle", "P002", 1.5, "2025-01-07"),
        ],
        8.0,
    );
    let rows = aggregate(&derived);

    let out = ws.join("output").join("transformed_data.csv");
    write_transformed(&out, &rows).expect("write");

    let content = fs::read_to_string(&out).expect("read artifact");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Location,Person>Brand,Department,Week of Year,Type,Date,Total_Hours,Persons,Total_Utilized")
    );
    assert_eq!(lines.next(), Some("Montreal,Acme,Sales,2,Idle,2025-01-07,1.5,002,0"));
    assert_eq!(
        lines.next(),
        Some("Montreal,Acme,Sales,2,Worktime,2025-01-06,10.0,\"001, 002\",2")
    );
    assert!(!ws.join("output").join("transformed_data.csv.partial").exists());

    let back = read_transformed(&out).expect("read back");
    assert_eq!(back.len(), 2);
    assert_eq!(back[1].persons, "001, 002");
    assert_eq!(back[1].total_hours, 10.0);
    assert_eq!(back[0].week_of_year, Some(2));
}

#[test]
fn test_format_hours() {
    assert_eq!(format_hours(10.0), "10.0");
    assert_eq!(format_hours(7.5), "7.5");
    assert_eq!(format_hours(0.0), "0.0");
}
