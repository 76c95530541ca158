// ==========================================
// 学费欠费计提引擎 - 学年解析器
// ==========================================
// 职责: 由参考日期派生学年边界 + 月份落位(按学年首月轮转)
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::session::AcademicSession;
use crate::error::{DuesError, DuesResult};
use chrono::{Datelike, NaiveDate};

// ==========================================
// SessionResolver - 学年解析器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct SessionResolver {
    start_month: u32,
}

impl SessionResolver {
    /// 创建学年解析器
    ///
    /// # 参数
    /// - start_month: 学年首月(1-12),由 FeeSettings 校验
    pub fn new(start_month: u32) -> Self {
        Self { start_month }
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    /// 计算学年起始年份
    ///
    /// # 规则
    /// - reference_month >= start_month → reference_year
    /// - 否则 → reference_year - 1
    pub fn session_start_year(reference_date: NaiveDate, start_month: u32) -> i32 {
        if reference_date.month() >= start_month {
            reference_date.year()
        } else {
            reference_date.year() - 1
        }
    }

    /// 计算某个日历月在学年中的落位年份
    ///
    /// # 规则
    /// - month >= start_month → session_start_year
    /// - month <  start_month → session_start_year + 1
    ///
    /// # 示例
    /// ```
    /// use fee_dues_engine::engine::SessionResolver;
    /// // 学年 2025 (四月起): 一月落在 2026,九月落在 2025
    /// assert_eq!(SessionResolver::target_year(2025, 4, 1), 2026);
    /// assert_eq!(SessionResolver::target_year(2025, 4, 9), 2025);
    /// ```
    pub fn target_year(session_start_year: i32, start_month: u32, month: u32) -> i32 {
        if month >= start_month {
            session_start_year
        } else {
            session_start_year + 1
        }
    }

    /// 解析参考日期所在学年
    ///
    /// # 返回
    /// - Err(InvalidReferenceDate): 学年边界超出可表示的日历范围
    pub fn resolve(&self, reference_date: NaiveDate) -> DuesResult<AcademicSession> {
        let start_year = Self::session_start_year(reference_date, self.start_month);

        let start_date = NaiveDate::from_ymd_opt(start_year, self.start_month, 1)
            .ok_or_else(|| Self::out_of_range(reference_date))?;
        let end_date = start_year
            .checked_add(1)
            .and_then(|next_year| NaiveDate::from_ymd_opt(next_year, self.start_month, 1))
            .and_then(|next_start| next_start.pred_opt())
            .ok_or_else(|| Self::out_of_range(reference_date))?;

        Ok(AcademicSession {
            start_year,
            start_month: self.start_month,
            start_date,
            end_date,
        })
    }

    fn out_of_range(reference_date: NaiveDate) -> DuesError {
        DuesError::InvalidReferenceDate(format!("{} 的学年边界超出日历范围", reference_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==========================================
    // 测试 1: 学年起始年份
    // ==========================================

    #[test]
    fn test_session_start_year_after_april() {
        assert_eq!(SessionResolver::session_start_year(date(2025, 9, 10), 4), 2025);
    }

    #[test]
    fn test_session_start_year_on_april_first() {
        assert_eq!(SessionResolver::session_start_year(date(2025, 4, 1), 4), 2025);
    }

    #[test]
    fn test_session_start_year_before_april() {
        assert_eq!(SessionResolver::session_start_year(date(2026, 3, 31), 4), 2025);
        assert_eq!(SessionResolver::session_start_year(date(2026, 1, 1), 4), 2025);
    }

    // ==========================================
    // 测试 2: 月份轮转落位
    // ==========================================

    #[test]
    fn test_target_year_rotation() {
        for month in 4..=12 {
            assert_eq!(SessionResolver::target_year(2025, 4, month), 2025);
        }
        for month in 1..=3 {
            assert_eq!(SessionResolver::target_year(2025, 4, month), 2026);
        }
    }

    #[test]
    fn test_target_year_january_anchor() {
        // 学年首月为一月时不跨年
        for month in 1..=12 {
            assert_eq!(SessionResolver::target_year(2025, 1, month), 2025);
        }
    }

    // ==========================================
    // 测试 3: 学年边界
    // ==========================================

    #[test]
    fn test_resolve_default_april_session() {
        let session = SessionResolver::new(4).resolve(date(2025, 9, 10)).unwrap();
        assert_eq!(session.start_year, 2025);
        assert_eq!(session.start_date, date(2025, 4, 1));
        assert_eq!(session.end_date, date(2026, 3, 31));
        assert_eq!(session.label(), "2025-26");
        assert!(session.contains(date(2026, 3, 31)));
        assert!(!session.contains(date(2026, 4, 1)));
    }

    #[test]
    fn test_resolve_custom_anchor() {
        let session = SessionResolver::new(6).resolve(date(2025, 2, 14)).unwrap();
        assert_eq!(session.start_date, date(2024, 6, 1));
        assert_eq!(session.end_date, date(2025, 5, 31));
    }

    #[test]
    fn test_resolve_rejects_calendar_edge() {
        let result = SessionResolver::new(4).resolve(NaiveDate::MAX);
        assert!(matches!(result, Err(DuesError::InvalidReferenceDate(_))));
    }
}
