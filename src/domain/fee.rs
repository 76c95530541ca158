// ==========================================
// 学费欠费计提引擎 - 收费项与分班金额
// ==========================================
// FeePolicy: 谁需要缴、哪些月份缴
// FeeAmount: 收费项 × 班级 → 每期金额
// ==========================================

use crate::domain::types::{AdmissionType, MonthToken, PolicyStatus};
use rust_decimal::Decimal;
use serde::Serialize;

// ==========================================
// FeePolicy - 收费项 (fee type)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePolicy {
    pub id: String,
    pub name: String,
    pub status: PolicyStatus,
    pub eligible_admission_types: Vec<AdmissionType>,
    pub eligible_student_categories: Vec<String>,
    pub eligible_classes: Vec<String>, // 可为空,此时依赖分班金额表
    pub due_months: Vec<MonthToken>,   // 有序集合,已去重
}

impl FeePolicy {
    pub fn is_active(&self) -> bool {
        self.status == PolicyStatus::Active
    }
}

// ==========================================
// FeeAmount - 分班金额
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeAmount {
    pub policy_id: String,
    pub class_name: String,
    pub amount: Decimal,
}

impl FeeAmount {
    pub fn new(policy_id: &str, class_name: &str, amount: Decimal) -> Self {
        Self {
            policy_id: policy_id.to_string(),
            class_name: class_name.to_string(),
            amount,
        }
    }
}
