// ==========================================
// 学费欠费计提引擎 - 欠费输出模型
// ==========================================
// 红线: outstanding_balance = total_payable - total_paid - total_discount
// 红线: 仅输出 outstanding_balance > 0 的学生
// ==========================================

use crate::domain::session::AcademicSession;
use crate::domain::types::MonthToken;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

// ==========================================
// PayableLine - 应收明细行
// ==========================================
// 一个已计提的 (收费项, 月份令牌) 对应一行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayableLine {
    pub policy_id: String,
    pub policy_name: String,
    pub month: MonthToken,
    pub due_date: Option<NaiveDate>, // 入学月为入学日期(老生为空)
    pub amount: Decimal,
}

// ==========================================
// LastPayment - 最近一次有效缴费
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPayment {
    pub amount: Decimal,
    pub payment_date: Option<NaiveDate>,
    pub receipt_number: Option<String>,
}

// ==========================================
// DuesRecord - 学生欠费记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesRecord {
    pub student_id: String,
    pub admission_number: Option<String>,
    pub class_name: String,
    pub total_payable: Decimal,
    pub total_paid: Decimal,
    pub total_discount: Decimal,
    pub carried_forward_balance: Decimal,
    pub outstanding_balance: Decimal,
    pub payable_lines: Vec<PayableLine>,
    pub payment_count: usize,
    pub last_payment: Option<LastPayment>,
}

// ==========================================
// SkippedRecord - 被隔离跳过的记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    pub student_id: Option<String>,
    pub reason: String,
}

// ==========================================
// DuesReport - 一次计算的完整结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesReport {
    pub reference_date: NaiveDate,
    pub session: AcademicSession,
    pub records: Vec<DuesRecord>, // 快照顺序
    pub skipped: Vec<SkippedRecord>,
}

impl DuesReport {
    /// 按欠费额降序(同额按学生 id 升序),用于"重点欠费"视图
    pub fn sorted_by_outstanding_desc(&self) -> Vec<&DuesRecord> {
        let mut sorted: Vec<&DuesRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| {
            b.outstanding_balance
                .cmp(&a.outstanding_balance)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });
        sorted
    }

    pub fn find(&self, student_id: &str) -> Option<&DuesRecord> {
        self.records.iter().find(|r| r.student_id == student_id)
    }
}
