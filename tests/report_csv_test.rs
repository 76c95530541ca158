// ==========================================
// 欠费报表导出测试
// ==========================================

mod helpers;

use fee_dues_engine::engine::DuesEngine;
use fee_dues_engine::report::{render_table, write_dues_csv, CSV_HEADERS};
use helpers::*;

#[test]
fn test_csv_export_of_computed_report() {
    let students = vec![
        StudentBuilder::new("s1")
            .new_admission(date(2025, 6, 10))
            .admission_number("A-1")
            .build(),
        StudentBuilder::new("s2").carried_forward(75).build(),
    ];
    let payments = vec![PaymentBuilder::new("A-1", 1000)
        .paid_on(date(2025, 7, 1))
        .receipt("R-1")
        .build()];

    let report = DuesEngine::with_defaults()
        .compute_records(&students, &[monthly_tuition()], &tuition_amounts(500), &payments, date(2025, 9, 10))
        .unwrap();

    let mut buffer = Vec::new();
    write_dues_csv(&mut buffer, &report.records).unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers, CSV_HEADERS.to_vec());

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "s1");
    assert_eq!(&rows[0][1], "A-1");
    assert_eq!(&rows[0][7], "1500");
    assert_eq!(&rows[0][10], "2025-07-01");
    assert_eq!(&rows[1][1], "");
    assert_eq!(&rows[1][7], "3575");
}

#[test]
fn test_table_lists_top_defaulters_first() {
    let students = vec![
        StudentBuilder::new("small").carried_forward(1).build(),
        StudentBuilder::new("large").carried_forward(5000).build(),
    ];

    let report = DuesEngine::with_defaults()
        .compute_records(&students, &[monthly_tuition()], &tuition_amounts(500), &[], date(2025, 4, 10))
        .unwrap();
    let table = render_table(&report.sorted_by_outstanding_desc());
    let lines: Vec<&str> = table.lines().collect();

    assert!(lines[2].starts_with("large"));
    assert!(lines[3].starts_with("small"));
}
