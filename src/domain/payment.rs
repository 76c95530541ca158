// ==========================================
// 学费欠费计提引擎 - 缴费记录
// ==========================================

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub const STATUS_CANCELLED: &str = "CANCELLED";

// ==========================================
// Payment - 缴费记录 (fee collection)
// ==========================================
// 关联键: student_admission_number (学号,非学生 id)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub student_admission_number: Option<String>,
    pub amount: Decimal,
    pub discount: Decimal,
    pub status: Option<String>, // 仅 CANCELLED 被排除,缺失视为有效
    pub payment_date: Option<NaiveDate>,
    pub receipt_number: Option<String>,
}

impl Payment {
    pub fn new(admission_number: &str, amount: Decimal) -> Self {
        Self {
            student_admission_number: Some(admission_number.to_string()),
            amount,
            discount: Decimal::ZERO,
            status: None,
            payment_date: None,
            receipt_number: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s.trim().eq_ignore_ascii_case(STATUS_CANCELLED))
            .unwrap_or(false)
    }
}
