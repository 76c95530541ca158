// ==========================================
// 学费欠费计提引擎 - 欠费汇总器
// ==========================================
// 每个学生:
//   1. total_payable = 上期结转
//   2. 每个匹配且有金额的收费项: += amount × 已计提月份数
//   3. 关联缴费(排除 CANCELLED): total_paid = Σamount, total_discount = Σdiscount
//   4. outstanding = total_payable - total_paid - total_discount
//   5. 仅 outstanding > 0 时输出
// 红线: 单个学生溢出/日期异常 → 跳过该学生,不中断整批
// ==========================================

use crate::config::FeeSettings;
use crate::domain::dues::{DuesRecord, LastPayment, PayableLine, SkippedRecord};
use crate::domain::fee::{FeeAmount, FeePolicy};
use crate::domain::payment::Payment;
use crate::domain::session::AcademicSession;
use crate::domain::student::Student;
use crate::engine::accrual::AccrualScheduler;
use crate::engine::amount_resolver::{AmountResolver, FeeAmountTable};
use crate::engine::anomaly::StudentAnomaly;
use crate::engine::payment_join::{AdmissionNumberJoin, PaymentJoin};
use crate::engine::policy_matcher::PolicyMatcher;
use crate::engine::session::SessionResolver;
use crate::error::DuesResult;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

// ==========================================
// DuesAggregator - 欠费汇总器
// ==========================================
pub struct DuesAggregator<'a> {
    payments_from_session_start: bool,
    session: AcademicSession,
    reference_date: NaiveDate,
    policies: &'a [FeePolicy],
    matcher: PolicyMatcher<'a>,
    resolver: AmountResolver<'a>,
    scheduler: AccrualScheduler,
}

impl<'a> DuesAggregator<'a> {
    /// 创建汇总器
    ///
    /// # 参数
    /// - settings: 已校验的收费设置
    /// - amounts: 分班金额索引
    /// - policies: 收费项
    /// - session: 参考日期所在学年
    /// - reference_date: 参考日期
    pub fn new(
        settings: &FeeSettings,
        amounts: &'a FeeAmountTable,
        policies: &'a [FeePolicy],
        session: AcademicSession,
        reference_date: NaiveDate,
    ) -> Self {
        Self {
            payments_from_session_start: settings.payments_from_session_start,
            session,
            reference_date,
            policies,
            matcher: PolicyMatcher::new(amounts, &settings.default_student_category),
            resolver: AmountResolver::new(amounts, &settings.monthly_fee_keyword),
            scheduler: AccrualScheduler::new(settings),
        }
    }

    pub fn session(&self) -> &AcademicSession {
        &self.session
    }

    /// 计算学生的应收明细行
    pub fn payable_lines(&self, student: &Student) -> Result<Vec<PayableLine>, StudentAnomaly> {
        let mut lines = Vec::new();

        for policy in self.policies {
            if !self.matcher.matches(student, policy) {
                continue;
            }
            let Some(resolved) = self.resolver.resolve(student, policy) else {
                continue;
            };

            let months =
                self.scheduler
                    .accrued_months(student, policy, &self.session, self.reference_date)?;
            lines.extend(months.into_iter().map(|m| PayableLine {
                policy_id: policy.id.clone(),
                policy_name: policy.name.clone(),
                month: m.token,
                due_date: m.due_date,
                amount: resolved.amount,
            }));
        }

        Ok(lines)
    }

    /// 缴费是否计入
    fn counts(&self, payment: &Payment) -> bool {
        if payment.is_cancelled() {
            return false;
        }
        if !self.payments_from_session_start {
            return true;
        }
        payment
            .payment_date
            .map(|date| date >= self.session.start_date)
            .unwrap_or(true)
    }

    /// 计算单个学生的欠费记录
    ///
    /// # 返回
    /// - Ok(Some): 有欠费
    /// - Ok(None): 已结清或预缴
    /// - Err: 该学生需跳过
    pub fn compute_student<'p, J>(
        &self,
        student: &Student,
        join: &J,
    ) -> Result<Option<DuesRecord>, StudentAnomaly>
    where
        J: PaymentJoin<'p>,
    {
        let payable_lines = self.payable_lines(student)?;

        let mut total_payable = student.carried_forward_balance;
        for line in &payable_lines {
            total_payable = total_payable
                .checked_add(line.amount)
                .ok_or_else(|| StudentAnomaly::overflow(format!("应收累计 ({})", line.policy_id)))?;
        }

        let counted: Vec<&Payment> = join
            .payments_for(student)
            .iter()
            .copied()
            .filter(|p| self.counts(p))
            .collect();

        let mut total_paid = Decimal::ZERO;
        let mut total_discount = Decimal::ZERO;
        for payment in &counted {
            total_paid = total_paid
                .checked_add(payment.amount)
                .ok_or_else(|| StudentAnomaly::overflow("实缴累计"))?;
            total_discount = total_discount
                .checked_add(payment.discount)
                .ok_or_else(|| StudentAnomaly::overflow("减免累计"))?;
        }

        let outstanding_balance = total_payable
            .checked_sub(total_paid)
            .and_then(|v| v.checked_sub(total_discount))
            .ok_or_else(|| StudentAnomaly::overflow("欠费余额"))?;

        if outstanding_balance <= Decimal::ZERO {
            return Ok(None);
        }

        let last_payment = counted
            .iter()
            .max_by_key(|p| p.payment_date)
            .map(|p| LastPayment {
                amount: p.amount,
                payment_date: p.payment_date,
                receipt_number: p.receipt_number.clone(),
            });

        Ok(Some(DuesRecord {
            student_id: student.id.clone(),
            admission_number: student.admission_number.clone(),
            class_name: student.class_name.clone(),
            total_payable,
            total_paid,
            total_discount,
            carried_forward_balance: student.carried_forward_balance,
            outstanding_balance,
            payable_lines,
            payment_count: counted.len(),
            last_payment,
        }))
    }

    /// 批量计算(快照顺序),异常学生进入 skipped
    pub fn compute_all<'p, J>(
        &self,
        students: &[Student],
        join: &J,
    ) -> (Vec<DuesRecord>, Vec<SkippedRecord>)
    where
        J: PaymentJoin<'p>,
    {
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for student in students {
            match self.compute_student(student, join) {
                Ok(Some(record)) => {
                    debug!(
                        student_id = %record.student_id,
                        payable = %record.total_payable,
                        outstanding = %record.outstanding_balance,
                        "学生存在欠费"
                    );
                    records.push(record);
                }
                Ok(None) => {
                    debug!(student_id = %student.id, "学生无欠费");
                }
                Err(anomaly) => {
                    warn!(student_id = %student.id, error = %anomaly, "学生计算异常,已跳过");
                    skipped.push(SkippedRecord {
                        student_id: Some(student.id.clone()),
                        reason: anomaly.to_string(),
                    });
                }
            }
        }

        (records, skipped)
    }
}

/// 以默认设置计算欠费(领域类型入口)
///
/// # 返回
/// - Ok(Vec<DuesRecord>): 快照顺序,仅含欠费学生
/// - Err(InvalidReferenceDate): 参考日期无法派生学年
pub fn compute_dues(
    students: &[Student],
    policies: &[FeePolicy],
    amounts: &[FeeAmount],
    payments: &[Payment],
    reference_date: NaiveDate,
) -> DuesResult<Vec<DuesRecord>> {
    let settings = FeeSettings::default();
    let session = SessionResolver::new(settings.session_start_month).resolve(reference_date)?;
    let table = FeeAmountTable::new(amounts);
    let join = AdmissionNumberJoin::new(payments);

    let aggregator = DuesAggregator::new(&settings, &table, policies, session, reference_date);
    let (records, _skipped) = aggregator.compute_all(students, &join);
    Ok(records)
}
