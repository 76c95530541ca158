// ==========================================
// 学费欠费计提引擎 - CSV 快照数据源
// ==========================================
// 目录: students.csv / fee_types.csv / fee_amounts.csv / fee_collections.csv
// 规则: 表头映射(支持别名);列表单元格以 '|' 分隔;缺失文件视为空集合
// ==========================================

use crate::domain::records::{FeeAmountDoc, FeePolicyDoc, PaymentDoc, Snapshot, StudentDoc};
use crate::error::DuesResult;
use crate::snapshot::json::read_optional;
use crate::snapshot::source::{SnapshotSource, FEE_AMOUNTS, FEE_COLLECTIONS, FEE_TYPES, STUDENTS};
use async_trait::async_trait;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

pub const LIST_SEPARATOR: char = '|';

type Row = HashMap<String, String>;

/// 解析 CSV 文本为表头映射行
///
/// 表头 TRIM;完全空白的行被跳过
pub fn parse_rows(raw: &str) -> DuesResult<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Row::new();
        for (idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(idx) {
                row.insert(header.clone(), value.trim().to_string());
            }
        }
        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// 取字段值,依次尝试别名,空值视为缺失
fn field(row: &Row, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| row.get(*name))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// 取列表字段('|' 分隔)
fn list_field(row: &Row, names: &[&str]) -> Vec<String> {
    field(row, names)
        .map(|cell| {
            cell.split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn student_doc(row: &Row) -> StudentDoc {
    StudentDoc {
        id: field(row, &["id"]),
        admission_number: field(row, &["admissionNumber", "admissionNo"]),
        admission_type: field(row, &["admissionType"]),
        admission_date: field(row, &["admissionDate"]),
        class_name: field(row, &["class", "className"]),
        student_category: field(row, &["studentCategory"]),
        monthly_fee_override: field(row, &["monthlyFeeOverride", "monthlyFee"]),
        carried_forward_balance: field(row, &["carriedForwardBalance", "basicDues"]),
    }
}

fn policy_doc(row: &Row) -> FeePolicyDoc {
    FeePolicyDoc {
        id: field(row, &["id"]),
        name: field(row, &["name", "feeHeadName"]),
        status: field(row, &["status"]),
        eligible_admission_types: list_field(row, &["eligibleAdmissionTypes", "admissionTypes"]),
        eligible_student_categories: list_field(
            row,
            &["eligibleStudentCategories", "studentTypes"],
        ),
        eligible_classes: list_field(row, &["eligibleClasses", "classes"]),
        due_months: list_field(row, &["dueMonths", "months"]),
    }
}

fn amount_doc(row: &Row) -> FeeAmountDoc {
    FeeAmountDoc {
        policy_id: field(row, &["policyId", "feeTypeId"]),
        class_name: field(row, &["className", "class"]),
        amount: field(row, &["amount"]),
    }
}

fn payment_doc(row: &Row) -> PaymentDoc {
    PaymentDoc {
        student_admission_number: field(
            row,
            &["studentAdmissionNumber", "admissionNo", "admissionNumber"],
        ),
        amount: field(row, &["amount", "paid", "amountPaid"]),
        discount: field(row, &["discount"]),
        status: field(row, &["status"]),
        payment_date: field(row, &["paymentDate"]),
        receipt_number: field(row, &["receiptNumber", "receiptNo"]),
    }
}

async fn load_rows(path: PathBuf) -> DuesResult<Vec<Row>> {
    let rows = match read_optional(&path).await? {
        Some(raw) => parse_rows(&raw)?,
        None => Vec::new(),
    };
    debug!(path = %path.display(), rows = rows.len(), "CSV 集合已读取");
    Ok(rows)
}

// ==========================================
// CsvDirSnapshotSource - CSV 目录快照
// ==========================================
#[derive(Debug, Clone)]
pub struct CsvDirSnapshotSource {
    dir: PathBuf,
}

impl CsvDirSnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", collection))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SnapshotSource for CsvDirSnapshotSource {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn load(&self) -> DuesResult<Snapshot> {
        let (students, policies, amounts, payments) = futures::try_join!(
            load_rows(self.file(STUDENTS)),
            load_rows(self.file(FEE_TYPES)),
            load_rows(self.file(FEE_AMOUNTS)),
            load_rows(self.file(FEE_COLLECTIONS)),
        )?;

        Ok(Snapshot {
            students: students.iter().map(student_doc).collect(),
            fee_policies: policies.iter().map(policy_doc).collect(),
            fee_amounts: amounts.iter().map(amount_doc).collect(),
            payments: payments.iter().map(payment_doc).collect(),
        })
    }

    fn describe(&self) -> String {
        format!("csv-dir:{}", self.dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_skips_blank_lines() {
        let raw = "id, class ,admissionType\ns1,5,NEW\n,,\ns2,6,OLD\n";
        let rows = parse_rows(raw).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("class").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_policy_list_cells() {
        let raw = "id,feeHeadName,status,admissionTypes,studentTypes,classes,months\n\
                   tuition,Monthly Tuition,ACTIVE,NEW|OLD,GENERAL,5| 6 ,April|May|ADMISSION_MONTH\n";
        let rows = parse_rows(raw).unwrap();
        let doc = policy_doc(&rows[0]);

        assert_eq!(doc.name.as_deref(), Some("Monthly Tuition"));
        assert_eq!(doc.eligible_admission_types, vec!["NEW", "OLD"]);
        assert_eq!(doc.eligible_classes, vec!["5", "6"]);
        assert_eq!(doc.due_months.len(), 3);
    }

    #[test]
    fn test_payment_aliases() {
        let raw = "admissionNo,paid,discount,receiptNo\nA-1,1000,,R-9\n";
        let rows = parse_rows(raw).unwrap();
        let doc = payment_doc(&rows[0]);

        assert_eq!(doc.student_admission_number.as_deref(), Some("A-1"));
        assert_eq!(doc.amount.as_deref(), Some("1000"));
        assert!(doc.discount.is_none());
        assert_eq!(doc.receipt_number.as_deref(), Some("R-9"));
    }
}
