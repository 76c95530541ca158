// ==========================================
// 学费欠费计提引擎 - 欠费汇总视图
// ==========================================
// 用途: 管理端看板 / 语音助手单行播报 / 文字助手上下文
// 红线: 只读派生,不改变欠费记录
// ==========================================

use crate::domain::dues::DuesRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// 重点欠费学生条目
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaulterEntry {
    pub student_id: String,
    pub admission_number: Option<String>,
    pub class_name: String,
    pub outstanding_balance: Decimal,
}

impl From<&DuesRecord> for DefaulterEntry {
    fn from(record: &DuesRecord) -> Self {
        Self {
            student_id: record.student_id.clone(),
            admission_number: record.admission_number.clone(),
            class_name: record.class_name.clone(),
            outstanding_balance: record.outstanding_balance,
        }
    }
}

// ==========================================
// DuesSummary - 欠费汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesSummary {
    pub students_with_dues: usize,
    pub total_outstanding: Decimal,
    pub total_payable: Decimal,
    pub total_paid: Decimal,
    pub total_discount: Decimal,
    pub class_totals: BTreeMap<String, Decimal>, // 班级 → 欠费合计
    #[serde(rename = "topDefaulters")]
    top: Vec<DefaulterEntry>, // 全量降序
}

impl DuesSummary {
    /// 由欠费记录派生汇总
    ///
    /// 合计使用饱和加法,超大金额封顶而不报错
    pub fn from_records(records: &[DuesRecord]) -> Self {
        let mut total_outstanding = Decimal::ZERO;
        let mut total_payable = Decimal::ZERO;
        let mut total_paid = Decimal::ZERO;
        let mut total_discount = Decimal::ZERO;
        let mut class_totals: BTreeMap<String, Decimal> = BTreeMap::new();

        for record in records {
            total_outstanding = total_outstanding.saturating_add(record.outstanding_balance);
            total_payable = total_payable.saturating_add(record.total_payable);
            total_paid = total_paid.saturating_add(record.total_paid);
            total_discount = total_discount.saturating_add(record.total_discount);

            let class_total = class_totals
                .entry(record.class_name.clone())
                .or_insert(Decimal::ZERO);
            *class_total = class_total.saturating_add(record.outstanding_balance);
        }

        let mut top: Vec<DefaulterEntry> = records.iter().map(DefaulterEntry::from).collect();
        top.sort_by(|a, b| {
            b.outstanding_balance
                .cmp(&a.outstanding_balance)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });

        Self {
            students_with_dues: records.len(),
            total_outstanding,
            total_payable,
            total_paid,
            total_discount,
            class_totals,
            top,
        }
    }

    /// 欠费最多的前 n 名(同额按学生 id 升序)
    pub fn top_defaulters(&self, n: usize) -> &[DefaulterEntry] {
        &self.top[..n.min(self.top.len())]
    }

    /// 语音助手单行播报
    pub fn compact_line(&self) -> String {
        if self.students_with_dues == 0 {
            return "No pending dues.".to_string();
        }
        let noun = if self.students_with_dues == 1 {
            "student has"
        } else {
            "students have"
        };
        format!(
            "{} {} pending dues totalling {}.",
            self.students_with_dues,
            noun,
            self.total_outstanding.normalize()
        )
    }

    /// 文字助手上下文
    pub fn assistant_context(&self, top_n: usize) -> Value {
        json!({
            "studentsWithDues": self.students_with_dues,
            "totalOutstanding": self.total_outstanding.to_string(),
            "totalPayable": self.total_payable.to_string(),
            "totalPaid": self.total_paid.to_string(),
            "totalDiscount": self.total_discount.to_string(),
            "classTotals": self
                .class_totals
                .iter()
                .map(|(class_name, total)| (class_name.clone(), Value::String(total.to_string())))
                .collect::<serde_json::Map<String, Value>>(),
            "topDefaulters": self
                .top_defaulters(top_n)
                .iter()
                .map(|entry| json!({
                    "studentId": entry.student_id,
                    "admissionNumber": entry.admission_number,
                    "class": entry.class_name,
                    "outstanding": entry.outstanding_balance.to_string(),
                }))
                .collect::<Vec<_>>(),
        })
    }
}
