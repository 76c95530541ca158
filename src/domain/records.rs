// ==========================================
// 学费欠费计提引擎 - 快照原始文档
// ==========================================
// 用途: 数据获取层交付的原始文档(字段全部可选)
// 生命周期: 仅在归一化之前
// 兼容: 接受文档库历史字段名(feeHeadName / admissionNo / paid ...)
// ==========================================

use crate::domain::lenient;
use serde::{Deserialize, Serialize};

// ==========================================
// StudentDoc - 学生文档
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDoc {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,

    #[serde(default, alias = "admissionNo", deserialize_with = "lenient::opt_string")]
    pub admission_number: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub admission_type: Option<String>, // NEW / OLD

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub admission_date: Option<String>,

    #[serde(default, rename = "class", deserialize_with = "lenient::opt_string")]
    pub class_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub student_category: Option<String>,

    // 金额字段保留原文,归一化时解析(便于记录异常)
    #[serde(default, alias = "monthlyFee", deserialize_with = "lenient::opt_string")]
    pub monthly_fee_override: Option<String>,

    #[serde(default, alias = "basicDues", deserialize_with = "lenient::opt_string")]
    pub carried_forward_balance: Option<String>,
}

// ==========================================
// FeePolicyDoc - 收费项文档 (fee type)
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePolicyDoc {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,

    #[serde(default, alias = "feeHeadName", deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,

    #[serde(default, alias = "admissionTypes", deserialize_with = "lenient::string_list")]
    pub eligible_admission_types: Vec<String>,

    #[serde(default, alias = "studentTypes", deserialize_with = "lenient::string_list")]
    pub eligible_student_categories: Vec<String>,

    #[serde(default, alias = "classes", deserialize_with = "lenient::string_list")]
    pub eligible_classes: Vec<String>,

    #[serde(default, alias = "months", deserialize_with = "lenient::string_list")]
    pub due_months: Vec<String>,
}

// ==========================================
// FeeAmountDoc - 分班金额文档
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeAmountDoc {
    #[serde(default, alias = "feeTypeId", deserialize_with = "lenient::opt_string")]
    pub policy_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub class_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub amount: Option<String>,
}

// ==========================================
// PaymentDoc - 缴费记录文档 (fee collection)
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDoc {
    #[serde(
        default,
        alias = "admissionNo",
        alias = "admissionNumber",
        deserialize_with = "lenient::opt_string"
    )]
    pub student_admission_number: Option<String>,

    #[serde(default, alias = "paid", alias = "amountPaid", deserialize_with = "lenient::opt_string")]
    pub amount: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub discount: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub payment_date: Option<String>,

    #[serde(default, alias = "receiptNo", deserialize_with = "lenient::opt_string")]
    pub receipt_number: Option<String>,
}

// ==========================================
// Snapshot - 一次计算的只读快照
// ==========================================
// 红线: 调用方保证快照一致性,引擎不负责新鲜度
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub students: Vec<StudentDoc>,

    #[serde(default, alias = "feeTypes")]
    pub fee_policies: Vec<FeePolicyDoc>,

    #[serde(default)]
    pub fee_amounts: Vec<FeeAmountDoc>,

    #[serde(default, alias = "feeCollections")]
    pub payments: Vec<PaymentDoc>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
            && self.fee_policies.is_empty()
            && self.fee_amounts.is_empty()
            && self.payments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_accepts_legacy_field_names() {
        let raw = r#"{
            "students": [{"id": "s1", "admissionNo": "A-1", "class": 5, "monthlyFee": "450"}],
            "feeTypes": [{"id": "t1", "feeHeadName": "Monthly Tuition", "status": "ACTIVE",
                          "admissionTypes": ["NEW"], "studentTypes": ["GENERAL"],
                          "classes": ["5"], "months": ["April", "Admission_month"]}],
            "feeAmounts": [{"feeTypeId": "t1", "className": "5", "amount": 500}],
            "feeCollections": [{"admissionNo": "A-1", "paid": 1000, "receiptNo": "R1"}]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        let student = &snapshot.students[0];
        assert_eq!(student.admission_number.as_deref(), Some("A-1"));
        assert_eq!(student.class_name.as_deref(), Some("5"));
        assert_eq!(student.monthly_fee_override.as_deref(), Some("450"));

        let policy = &snapshot.fee_policies[0];
        assert_eq!(policy.name.as_deref(), Some("Monthly Tuition"));
        assert_eq!(policy.due_months.len(), 2);

        assert_eq!(snapshot.fee_amounts[0].amount.as_deref(), Some("500"));
        assert_eq!(snapshot.payments[0].amount.as_deref(), Some("1000"));
        assert_eq!(snapshot.payments[0].receipt_number.as_deref(), Some("R1"));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }
}
