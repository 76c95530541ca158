// ==========================================
// 快照数据源集成测试
// ==========================================
// 职责: 验证 JSON 文件 / JSON 目录 / CSV 目录 加载并计算结果一致
// ==========================================

use chrono::NaiveDate;
use fee_dues_engine::engine::DuesEngine;
use fee_dues_engine::error::DuesError;
use fee_dues_engine::snapshot::{
    source_for_path, CsvDirSnapshotSource, JsonDirSnapshotSource, JsonFileSnapshotSource,
    SnapshotSource,
};
use rust_decimal::Decimal;
use std::fs;
use tempfile::TempDir;

const SNAPSHOT_JSON: &str = r#"{
  "students": [
    {"id": "s1", "admissionNumber": "A-1", "admissionType": "NEW",
     "admissionDate": "2025-06-10", "class": "5", "studentCategory": "GENERAL"},
    {"id": "s2", "admissionNo": "A-2", "admissionType": "OLD", "class": 5, "basicDues": "120"}
  ],
  "feeTypes": [
    {"id": "tuition", "feeHeadName": "Monthly Tuition", "status": "ACTIVE",
     "admissionTypes": ["NEW", "OLD"], "studentTypes": ["GENERAL"], "classes": ["5"],
     "months": ["April", "May", "June", "July", "August", "September", "October",
                "November", "December", "January", "February", "March", "Admission_month"]}
  ],
  "feeAmounts": [{"feeTypeId": "tuition", "className": "5", "amount": "500"}],
  "feeCollections": [
    {"admissionNo": "A-1", "paid": 1000, "status": "PAID", "paymentDate": "2025-07-01"},
    {"admissionNo": "A-2", "paid": 300, "status": "CANCELLED"}
  ]
}"#;

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
}

fn assert_expected_dues(snapshot: &fee_dues_engine::Snapshot) {
    let report = DuesEngine::with_defaults().compute(snapshot, reference()).unwrap();

    assert_eq!(report.records.len(), 2);
    let s1 = report.find("s1").unwrap();
    assert_eq!(s1.outstanding_balance, Decimal::from(1500));
    // 老生: 四月..九月 + 入学月 + 结转 120,作废缴费不计入
    let s2 = report.find("s2").unwrap();
    assert_eq!(s2.outstanding_balance, Decimal::from(7 * 500 + 120));
}

// ==========================================
// 测试 1: JSON
// ==========================================

#[tokio::test]
async fn test_json_file_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(&path, SNAPSHOT_JSON).unwrap();

    let snapshot = JsonFileSnapshotSource::new(&path).load().await.unwrap();

    assert_eq!(snapshot.students.len(), 2);
    assert_eq!(snapshot.payments.len(), 2);
    assert_expected_dues(&snapshot);
}

#[tokio::test]
async fn test_json_dir_source_with_missing_collection() {
    let dir = TempDir::new().unwrap();
    let full: serde_json::Value = serde_json::from_str(SNAPSHOT_JSON).unwrap();
    fs::write(dir.path().join("students.json"), full["students"].to_string()).unwrap();
    fs::write(dir.path().join("fee_types.json"), full["feeTypes"].to_string()).unwrap();
    fs::write(dir.path().join("fee_amounts.json"), full["feeAmounts"].to_string()).unwrap();

    let snapshot = JsonDirSnapshotSource::new(dir.path()).load().await.unwrap();

    assert_eq!(snapshot.students.len(), 2);
    assert!(snapshot.payments.is_empty());

    let report = DuesEngine::with_defaults().compute(&snapshot, reference()).unwrap();
    assert_eq!(report.find("s1").unwrap().outstanding_balance, Decimal::from(2500));
}

#[tokio::test]
async fn test_json_parse_error_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let result = JsonFileSnapshotSource::new(&path).load().await;
    assert!(matches!(result, Err(DuesError::SnapshotParse { .. })));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = JsonFileSnapshotSource::new(dir.path().join("absent.json")).load().await;
    assert!(matches!(result, Err(DuesError::SnapshotIo { .. })));
}

// ==========================================
// 测试 2: CSV 目录
// ==========================================

#[tokio::test]
async fn test_csv_dir_source() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("students.csv"),
        "id,admissionNumber,admissionType,admissionDate,class,basicDues\n\
         s1,A-1,NEW,2025-06-10,5,\n\
         s2,A-2,OLD,,5,120\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("fee_types.csv"),
        "id,feeHeadName,status,admissionTypes,studentTypes,classes,months\n\
         tuition,Monthly Tuition,ACTIVE,NEW|OLD,GENERAL,5,April|May|June|July|August|September|October|November|December|January|February|March|ADMISSION_MONTH\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("fee_amounts.csv"),
        "feeTypeId,className,amount\ntuition,5,500\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("fee_collections.csv"),
        "admissionNo,paid,status,paymentDate\nA-1,1000,PAID,2025-07-01\nA-2,300,CANCELLED,\n",
    )
    .unwrap();

    let source = source_for_path(dir.path());
    assert!(source.describe().starts_with("csv-dir:"));

    let snapshot = CsvDirSnapshotSource::new(dir.path()).load().await.unwrap();
    assert_expected_dues(&snapshot);
}
