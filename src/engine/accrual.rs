// ==========================================
// 学费欠费计提引擎 - 计提排程器
// ==========================================
// 职责: 将收费项的月份令牌展开为具体到期日,逐月判定是否已计提
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================
// 规则:
//   入学月令牌: OLD → 恒计提; NEW → 参考日期 >= 入学日期
//   日历月令牌: 参考日期 >= 到期日 且 目标月 >= 学生生效起算月
//   生效起算月: NEW 且 入学日期 >= 学年起始日 → 入学月(受起算规则/截止日影响)
//               其他 → 学年首月
// ==========================================

use crate::config::FeeSettings;
use crate::domain::fee::FeePolicy;
use crate::domain::session::AcademicSession;
use crate::domain::student::Student;
use crate::domain::types::{AdmissionType, CollectionTiming, MonthToken, StartRule};
use crate::engine::anomaly::StudentAnomaly;
use crate::engine::session::SessionResolver;
use chrono::{Datelike, NaiveDate};

/// 年月(按年、月字典序比较)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

/// 已计提的月份令牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccruedMonth {
    pub token: MonthToken,
    pub due_date: Option<NaiveDate>,
}

// ==========================================
// AccrualScheduler - 计提排程器
// ==========================================
#[derive(Debug, Clone)]
pub struct AccrualScheduler {
    due_day: u32,
    timing: CollectionTiming,
    start_rule: StartRule,
    cutoff_day: Option<u32>,
}

impl AccrualScheduler {
    pub fn new(settings: &FeeSettings) -> Self {
        Self {
            due_day: settings.due_day_of_month,
            timing: settings.collection_timing,
            start_rule: settings.start_rule,
            cutoff_day: settings.admission_cutoff_day,
        }
    }

    /// 取 year-month 的第 day 日,超出当月天数时取月末
    pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
        let next = YearMonth::new(year, month).next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)?.pred_opt()
    }

    /// 计算目标月的到期日
    ///
    /// # 规则
    /// - ADVANCE: 目标月的第 D 日
    /// - ARREARS: 目标月次月的第 D 日(十二月顺延至次年一月)
    pub fn due_date(&self, target: YearMonth) -> Result<NaiveDate, StudentAnomaly> {
        let due_month = match self.timing {
            CollectionTiming::Advance => target,
            CollectionTiming::Arrears => target.next(),
        };
        Self::clamped_date(due_month.year, due_month.month, self.due_day).ok_or(
            StudentAnomaly::DateOutOfRange {
                year: due_month.year,
                month: due_month.month,
            },
        )
    }

    /// 计算学生的生效起算月
    pub fn effective_start(&self, student: &Student, session: &AcademicSession) -> YearMonth {
        let session_start = YearMonth::new(session.start_year, session.start_month);

        let admission_date = match (student.admission_type, student.admission_date) {
            (AdmissionType::New, Some(date)) if date >= session.start_date => date,
            _ => return session_start,
        };

        match self.start_rule {
            StartRule::AlwaysFromSessionStart => session_start,
            StartRule::FromAdmissionMonth => {
                let admission_month = YearMonth::of(admission_date);
                match self.cutoff_day {
                    Some(cutoff) if admission_date.day() > cutoff => admission_month.next(),
                    _ => admission_month,
                }
            }
        }
    }

    /// 入学月令牌判定
    fn admission_month_accrual(student: &Student, reference_date: NaiveDate) -> Option<AccruedMonth> {
        match student.admission_type {
            AdmissionType::Old => Some(AccruedMonth {
                token: MonthToken::AdmissionMonth,
                due_date: None,
            }),
            AdmissionType::New => student
                .admission_date
                .filter(|admission_date| reference_date >= *admission_date)
                .map(|admission_date| AccruedMonth {
                    token: MonthToken::AdmissionMonth,
                    due_date: Some(admission_date),
                }),
        }
    }

    /// 计算收费项对学生已计提的月份
    ///
    /// # 参数
    /// - student: 学生
    /// - policy: 已匹配的收费项
    /// - session: 当前学年
    /// - reference_date: 参考日期
    ///
    /// # 返回
    /// - Vec<AccruedMonth>: 按收费项月份顺序排列,每个令牌至多一次
    pub fn accrued_months(
        &self,
        student: &Student,
        policy: &FeePolicy,
        session: &AcademicSession,
        reference_date: NaiveDate,
    ) -> Result<Vec<AccruedMonth>, StudentAnomaly> {
        let effective_start = self.effective_start(student, session);
        let mut accrued = Vec::new();

        for token in &policy.due_months {
            match *token {
                MonthToken::AdmissionMonth => {
                    if let Some(month) = Self::admission_month_accrual(student, reference_date) {
                        accrued.push(month);
                    }
                }
                MonthToken::Calendar(month) => {
                    let target = YearMonth::new(
                        SessionResolver::target_year(session.start_year, session.start_month, month),
                        month,
                    );
                    let due_date = self.due_date(target)?;
                    if reference_date >= due_date && target >= effective_start {
                        accrued.push(AccruedMonth {
                            token: *token,
                            due_date: Some(due_date),
                        });
                    }
                }
            }
        }

        Ok(accrued)
    }
}
