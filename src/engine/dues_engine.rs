// ==========================================
// 学费欠费计提引擎 - 引擎门面
// ==========================================
// 流程: 归一化 → 学年解析 → 建索引(分班金额 / 缴费) → 逐学生汇总
// 红线: 只读计算,不写回任何数据;相同输入得到相同输出
// ==========================================

use crate::config::FeeSettings;
use crate::domain::dues::{DuesRecord, DuesReport};
use crate::domain::fee::{FeeAmount, FeePolicy};
use crate::domain::lenient::parse_date;
use crate::domain::payment::Payment;
use crate::domain::records::Snapshot;
use crate::domain::student::Student;
use crate::engine::aggregator::DuesAggregator;
use crate::engine::amount_resolver::FeeAmountTable;
use crate::engine::normalizer::RecordNormalizer;
use crate::engine::payment_join::AdmissionNumberJoin;
use crate::engine::session::SessionResolver;
use crate::error::{DuesError, DuesResult};
use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};

// ==========================================
// DuesEngine - 欠费计提引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct DuesEngine {
    settings: FeeSettings,
    sessions: SessionResolver,
}

impl DuesEngine {
    /// 创建引擎
    ///
    /// # 返回
    /// - Err(InvalidConfig): 设置校验失败
    pub fn new(settings: FeeSettings) -> DuesResult<Self> {
        settings.validate()?;
        Ok(Self {
            sessions: SessionResolver::new(settings.session_start_month),
            settings,
        })
    }

    pub fn with_defaults() -> Self {
        let settings = FeeSettings::default();
        Self {
            sessions: SessionResolver::new(settings.session_start_month),
            settings,
        }
    }

    pub fn settings(&self) -> &FeeSettings {
        &self.settings
    }

    /// 解析参考日期字符串
    pub fn parse_reference_date(raw: &str) -> DuesResult<NaiveDate> {
        parse_date(raw).ok_or_else(|| {
            DuesError::InvalidReferenceDate(format!("无法解析日期: {}", raw.trim()))
        })
    }

    /// 对原始快照计算欠费报告
    ///
    /// # 参数
    /// - snapshot: 一致的只读快照
    /// - reference_date: 参考日期
    ///
    /// # 返回
    /// - DuesReport: 欠费记录(快照顺序) + 被跳过的记录
    #[instrument(skip(self, snapshot), fields(students = snapshot.students.len()))]
    pub fn compute(&self, snapshot: &Snapshot, reference_date: NaiveDate) -> DuesResult<DuesReport> {
        let normalized = RecordNormalizer::new(&self.settings).normalize(snapshot);

        let mut report = self.compute_records(
            &normalized.students,
            &normalized.policies,
            &normalized.amounts,
            &normalized.payments,
            reference_date,
        )?;

        let mut skipped = normalized.skipped;
        skipped.append(&mut report.skipped);
        report.skipped = skipped;

        Ok(report)
    }

    /// 对领域实体计算欠费报告
    pub fn compute_records(
        &self,
        students: &[Student],
        policies: &[FeePolicy],
        amounts: &[FeeAmount],
        payments: &[Payment],
        reference_date: NaiveDate,
    ) -> DuesResult<DuesReport> {
        let session = self.sessions.resolve(reference_date)?;

        let duplicates = AdmissionNumberJoin::duplicate_admission_numbers(students);
        if !duplicates.is_empty() {
            warn!(
                count = duplicates.len(),
                admission_numbers = ?duplicates,
                "多个学生共用学号,缴费将对每个学生重复计入"
            );
        }

        let table = FeeAmountTable::new(amounts);
        let join = AdmissionNumberJoin::new(payments);
        let aggregator =
            DuesAggregator::new(&self.settings, &table, policies, session, reference_date);

        let (records, skipped) = aggregator.compute_all(students, &join);

        info!(
            session = %session.label(),
            reference_date = %reference_date,
            students = students.len(),
            policies = policies.len(),
            payments = payments.len(),
            with_dues = records.len(),
            skipped = skipped.len(),
            "欠费计算完成"
        );

        Ok(DuesReport {
            reference_date,
            session,
            records,
            skipped,
        })
    }

    /// 以本地当天为参考日期计算
    pub fn compute_today(&self, snapshot: &Snapshot) -> DuesResult<DuesReport> {
        self.compute(snapshot, Local::now().date_naive())
    }

    /// 仅返回欠费记录
    pub fn dues(&self, snapshot: &Snapshot, reference_date: NaiveDate) -> DuesResult<Vec<DuesRecord>> {
        Ok(self.compute(snapshot, reference_date)?.records)
    }
}

impl Default for DuesEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
