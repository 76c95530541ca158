// ==========================================
// 学费欠费计提引擎 - 学年(会计年度)值对象
// ==========================================

use chrono::NaiveDate;
use serde::Serialize;

/// 学年边界
///
/// 由 SessionResolver 根据参考日期与学年首月派生
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSession {
    pub start_year: i32,
    pub start_month: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate, // 含当日
}

impl AcademicSession {
    /// 学年标签,如 "2025-26"
    pub fn label(&self) -> String {
        if self.start_month == 1 {
            format!("{}", self.start_year)
        } else {
            format!("{}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
