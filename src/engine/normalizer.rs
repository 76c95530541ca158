// ==========================================
// 学费欠费计提引擎 - 快照归一化
// ==========================================
// 职责: 原始文档 → 领域实体(TRIM / 缺省值 / 宽松解析)
// 规则:
//   - 数值/日期无法解析 → 视为缺失
//   - 缺失入学类型 / 学生类别 → 设置中的缺省值
//   - 缺失结转 / 实缴 / 减免 → 0
//   - 缺失收费项状态 → INACTIVE
//   - 未知或重复的月份令牌 → 丢弃
//   - 缺少 id 的学生 → 跳过并记录,不中断整批
// ==========================================

use crate::config::FeeSettings;
use crate::domain::dues::SkippedRecord;
use crate::domain::fee::{FeeAmount, FeePolicy};
use crate::domain::lenient::{parse_date, parse_decimal};
use crate::domain::payment::Payment;
use crate::domain::records::{FeeAmountDoc, FeePolicyDoc, PaymentDoc, Snapshot, StudentDoc};
use crate::domain::student::Student;
use crate::domain::types::{AdmissionType, MonthToken, PolicyStatus};
use crate::engine::anomaly::StudentAnomaly;
use rust_decimal::Decimal;
use tracing::warn;

/// 归一化后的快照
#[derive(Debug, Clone, Default)]
pub struct NormalizedSnapshot {
    pub students: Vec<Student>,
    pub policies: Vec<FeePolicy>,
    pub amounts: Vec<FeeAmount>,
    pub payments: Vec<Payment>,
    pub skipped: Vec<SkippedRecord>,
}

// ==========================================
// RecordNormalizer - 文档归一化器
// ==========================================
pub struct RecordNormalizer {
    default_category: String,
    default_admission_type: AdmissionType,
}

impl RecordNormalizer {
    pub fn new(settings: &FeeSettings) -> Self {
        Self {
            default_category: settings.default_student_category.clone(),
            default_admission_type: settings.default_admission_type,
        }
    }

    /// 归一化整个快照(保持快照顺序)
    pub fn normalize(&self, snapshot: &Snapshot) -> NormalizedSnapshot {
        let mut normalized = NormalizedSnapshot::default();

        for (idx, doc) in snapshot.students.iter().enumerate() {
            match self.normalize_student(doc) {
                Ok(student) => normalized.students.push(student),
                Err(anomaly) => {
                    warn!(row = idx + 1, error = %anomaly, "学生记录已跳过");
                    normalized.skipped.push(SkippedRecord {
                        student_id: None,
                        reason: format!("第 {} 条学生记录: {}", idx + 1, anomaly),
                    });
                }
            }
        }

        normalized.policies = snapshot
            .fee_policies
            .iter()
            .enumerate()
            .filter_map(|(idx, doc)| {
                let policy = Self::normalize_policy(doc);
                if policy.is_none() {
                    warn!(row = idx + 1, "收费项缺少 id,已忽略");
                }
                policy
            })
            .collect();

        normalized.amounts = snapshot
            .fee_amounts
            .iter()
            .filter_map(Self::normalize_amount)
            .collect();

        normalized.payments = snapshot.payments.iter().map(Self::normalize_payment).collect();

        normalized
    }

    /// 归一化学生文档
    ///
    /// # 返回
    /// - Err(MissingStudentId): 无法输出,需跳过
    pub fn normalize_student(&self, doc: &StudentDoc) -> Result<Student, StudentAnomaly> {
        let id = doc.id.clone().ok_or(StudentAnomaly::MissingStudentId)?;

        let admission_type = match doc.admission_type.as_deref() {
            None => self.default_admission_type,
            Some(raw) => AdmissionType::parse(raw).unwrap_or_else(|| {
                warn!(student_id = %id, value = raw, "未知入学类型,使用缺省值");
                self.default_admission_type
            }),
        };

        let admission_date = doc.admission_date.as_deref().and_then(|raw| {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                warn!(student_id = %id, value = raw, "入学日期无法解析");
            }
            parsed
        });

        let monthly_fee_override = doc.monthly_fee_override.as_deref().and_then(parse_decimal);
        let carried_forward_balance = doc
            .carried_forward_balance
            .as_deref()
            .and_then(parse_decimal)
            .unwrap_or(Decimal::ZERO);

        Ok(Student {
            id,
            admission_number: doc.admission_number.clone(),
            admission_type,
            admission_date,
            class_name: doc.class_name.clone().unwrap_or_default(),
            student_category: doc
                .student_category
                .clone()
                .unwrap_or_else(|| self.default_category.clone()),
            monthly_fee_override,
            carried_forward_balance,
        })
    }

    /// 归一化收费项文档,缺少 id 返回 None
    pub fn normalize_policy(doc: &FeePolicyDoc) -> Option<FeePolicy> {
        let id = doc.id.clone()?;

        let mut due_months: Vec<MonthToken> = Vec::with_capacity(doc.due_months.len());
        for raw in &doc.due_months {
            match MonthToken::parse(raw) {
                Some(token) if !due_months.contains(&token) => due_months.push(token),
                Some(_) => {}
                None => warn!(policy_id = %id, value = %raw, "未知月份令牌,已丢弃"),
            }
        }

        let mut eligible_admission_types = Vec::new();
        for admission_type in doc.eligible_admission_types.iter().filter_map(|v| AdmissionType::parse(v)) {
            if !eligible_admission_types.contains(&admission_type) {
                eligible_admission_types.push(admission_type);
            }
        }

        Some(FeePolicy {
            name: doc.name.clone().unwrap_or_default(),
            status: PolicyStatus::parse(doc.status.as_deref()),
            eligible_admission_types,
            eligible_student_categories: trimmed(&doc.eligible_student_categories),
            eligible_classes: trimmed(&doc.eligible_classes),
            due_months,
            id,
        })
    }

    /// 归一化分班金额文档
    ///
    /// 金额无法解析时按 0 保留该行(行存在即满足班级子句 B)
    pub fn normalize_amount(doc: &FeeAmountDoc) -> Option<FeeAmount> {
        let (policy_id, class_name) = match (&doc.policy_id, &doc.class_name) {
            (Some(policy_id), Some(class_name)) => (policy_id, class_name),
            _ => return None,
        };
        let amount = doc
            .amount
            .as_deref()
            .and_then(parse_decimal)
            .unwrap_or(Decimal::ZERO);
        Some(FeeAmount::new(policy_id, class_name, amount))
    }

    pub fn normalize_payment(doc: &PaymentDoc) -> Payment {
        Payment {
            student_admission_number: doc.student_admission_number.clone(),
            amount: decimal_or_zero(doc.amount.as_deref()),
            discount: decimal_or_zero(doc.discount.as_deref()),
            status: doc.status.clone(),
            payment_date: doc.payment_date.as_deref().and_then(parse_date),
            receipt_number: doc.receipt_number.clone(),
        }
    }
}

fn decimal_or_zero(value: Option<&str>) -> Decimal {
    value.and_then(parse_decimal).unwrap_or(Decimal::ZERO)
}

fn trimmed(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
