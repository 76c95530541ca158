// ==========================================
// 学费欠费计提引擎 - 金额解析器
// ==========================================
// 规则:
//   1. monthly 类收费项 且 学生月费覆盖值有效(>=0) → 覆盖值
//   2. 分班金额表命中 且 amount > 0 → 表内金额
//   3. 否则 → 无金额(该收费项对该学生不产生应收,非错误)
// ==========================================

use crate::domain::fee::{FeeAmount, FeePolicy};
use crate::domain::student::Student;
use rust_decimal::Decimal;
use std::collections::HashMap;

// ==========================================
// FeeAmountTable - 分班金额索引
// ==========================================
// 同一 (收费项, 班级) 多行时以快照中首行为准
#[derive(Debug, Clone, Default)]
pub struct FeeAmountTable {
    rows: HashMap<(String, String), Decimal>,
}

impl FeeAmountTable {
    pub fn new(amounts: &[FeeAmount]) -> Self {
        let mut rows = HashMap::with_capacity(amounts.len());
        for row in amounts {
            rows.entry((row.policy_id.clone(), row.class_name.clone()))
                .or_insert(row.amount);
        }
        Self { rows }
    }

    pub fn lookup(&self, policy_id: &str, class_name: &str) -> Option<Decimal> {
        self.rows
            .get(&(policy_id.to_string(), class_name.to_string()))
            .copied()
    }

    pub fn has_row(&self, policy_id: &str, class_name: &str) -> bool {
        self.lookup(policy_id, class_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 金额来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSource {
    StudentOverride,
    ClassTable,
}

/// 金额解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAmount {
    pub amount: Decimal,
    pub source: AmountSource,
}

// ==========================================
// AmountResolver - 金额解析器
// ==========================================
pub struct AmountResolver<'a> {
    table: &'a FeeAmountTable,
    monthly_keyword: String,
}

impl<'a> AmountResolver<'a> {
    /// # 参数
    /// - table: 分班金额索引
    /// - monthly_keyword: 月费类收费项关键字(忽略大小写)
    pub fn new(table: &'a FeeAmountTable, monthly_keyword: &str) -> Self {
        Self {
            table,
            monthly_keyword: monthly_keyword.trim().to_lowercase(),
        }
    }

    /// 是否为月费类收费项(名称包含关键字)
    pub fn is_monthly_policy(&self, policy: &FeePolicy) -> bool {
        policy.name.to_lowercase().contains(&self.monthly_keyword)
    }

    /// 解析学生在某收费项下的每期金额
    pub fn resolve(&self, student: &Student, policy: &FeePolicy) -> Option<ResolvedAmount> {
        if self.is_monthly_policy(policy) {
            if let Some(amount) = student.monthly_fee_override {
                if amount >= Decimal::ZERO {
                    return Some(ResolvedAmount {
                        amount,
                        source: AmountSource::StudentOverride,
                    });
                }
            }
        }

        self.table
            .lookup(&policy.id, &student.class_name)
            .filter(|amount| *amount > Decimal::ZERO)
            .map(|amount| ResolvedAmount {
                amount,
                source: AmountSource::ClassTable,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AdmissionType, MonthToken, PolicyStatus};

    fn policy(id: &str, name: &str) -> FeePolicy {
        FeePolicy {
            id: id.to_string(),
            name: name.to_string(),
            status: PolicyStatus::Active,
            eligible_admission_types: vec![AdmissionType::New, AdmissionType::Old],
            eligible_student_categories: vec!["GENERAL".to_string()],
            eligible_classes: vec!["5".to_string()],
            due_months: vec![MonthToken::Calendar(4)],
        }
    }

    fn table() -> FeeAmountTable {
        FeeAmountTable::new(&[
            FeeAmount::new("tuition", "5", Decimal::from(500)),
            FeeAmount::new("tuition", "5", Decimal::from(999)),
            FeeAmount::new("exam", "5", Decimal::from(300)),
            FeeAmount::new("lab", "5", Decimal::ZERO),
        ])
    }

    #[test]
    fn test_first_row_wins() {
        let table = table();
        assert_eq!(table.lookup("tuition", "5"), Some(Decimal::from(500)));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_class_table_amount() {
        let table = table();
        let resolver = AmountResolver::new(&table, "monthly");
        let student = Student::new("s1", AdmissionType::Old, "5");

        let resolved = resolver.resolve(&student, &policy("exam", "Exam Fee")).unwrap();
        assert_eq!(resolved.amount, Decimal::from(300));
        assert_eq!(resolved.source, AmountSource::ClassTable);
    }

    #[test]
    fn test_override_applies_to_monthly_policy_only() {
        let table = table();
        let resolver = AmountResolver::new(&table, "monthly");
        let mut student = Student::new("s1", AdmissionType::Old, "5");
        student.monthly_fee_override = Some(Decimal::from(450));

        let monthly = resolver
            .resolve(&student, &policy("tuition", "MONTHLY Tuition"))
            .unwrap();
        assert_eq!(monthly.amount, Decimal::from(450));
        assert_eq!(monthly.source, AmountSource::StudentOverride);

        let exam = resolver.resolve(&student, &policy("exam", "Exam Fee")).unwrap();
        assert_eq!(exam.amount, Decimal::from(300));
    }

    #[test]
    fn test_override_without_table_row() {
        let table = FeeAmountTable::default();
        let resolver = AmountResolver::new(&table, "monthly");
        let mut student = Student::new("s1", AdmissionType::Old, "5");
        student.monthly_fee_override = Some(Decimal::ZERO);

        let resolved = resolver
            .resolve(&student, &policy("tuition", "Monthly Tuition"))
            .unwrap();
        assert_eq!(resolved.amount, Decimal::ZERO);
    }

    #[test]
    fn test_negative_override_falls_back_to_table() {
        let table = table();
        let resolver = AmountResolver::new(&table, "monthly");
        let mut student = Student::new("s1", AdmissionType::Old, "5");
        student.monthly_fee_override = Some(Decimal::from(-10));

        let resolved = resolver
            .resolve(&student, &policy("tuition", "Monthly Tuition"))
            .unwrap();
        assert_eq!(resolved.amount, Decimal::from(500));
        assert_eq!(resolved.source, AmountSource::ClassTable);
    }

    #[test]
    fn test_zero_or_missing_row_yields_none() {
        let table = table();
        let resolver = AmountResolver::new(&table, "monthly");
        let student = Student::new("s1", AdmissionType::Old, "5");

        assert!(resolver.resolve(&student, &policy("lab", "Lab Fee")).is_none());
        assert!(resolver.resolve(&student, &policy("bus", "Bus Fee")).is_none());
    }
}
