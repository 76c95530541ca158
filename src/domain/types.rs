// ==========================================
// 学费欠费计提引擎 - 领域类型定义
// ==========================================
// 入学类型 / 收费项状态 / 计费月份令牌 / 收费时点 / 起算规则
// 序列化格式: SCREAMING_SNAKE_CASE (与文档库一致)
// ==========================================

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ==========================================
// 入学类型 (Admission Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionType {
    New, // 本学年新生
    Old, // 老生（续读）
}

impl AdmissionType {
    /// 宽松解析（TRIM + 忽略大小写），无法识别返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "NEW" => Some(AdmissionType::New),
            "OLD" => Some(AdmissionType::Old),
            _ => None,
        }
    }
}

impl fmt::Display for AdmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionType::New => write!(f, "NEW"),
            AdmissionType::Old => write!(f, "OLD"),
        }
    }
}

// ==========================================
// 收费项状态 (Policy Status)
// ==========================================
// 红线: 只有显式 ACTIVE 才参与计提
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    Active,
    Inactive,
}

impl PolicyStatus {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_uppercase()) {
            Some(v) if v == "ACTIVE" => PolicyStatus::Active,
            _ => PolicyStatus::Inactive,
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyStatus::Active => write!(f, "ACTIVE"),
            PolicyStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

// ==========================================
// 计费月份令牌 (Month Token)
// ==========================================
// 日历月份(1-12) 或 入学月哨兵
pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthToken {
    AdmissionMonth,
    Calendar(u32),
}

impl MonthToken {
    /// 解析月份令牌
    ///
    /// # 规则
    /// - "ADMISSION_MONTH" / "Admission_month" (忽略大小写) → AdmissionMonth
    /// - 英文月份全称 (忽略大小写) → Calendar(1..=12)
    /// - 其他 → None
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("ADMISSION_MONTH") {
            return Some(MonthToken::AdmissionMonth);
        }
        MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(trimmed))
            .map(|idx| MonthToken::Calendar(idx as u32 + 1))
    }

    pub fn is_admission_month(&self) -> bool {
        matches!(self, MonthToken::AdmissionMonth)
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthToken::AdmissionMonth => write!(f, "ADMISSION_MONTH"),
            MonthToken::Calendar(month) => {
                let name = MONTH_NAMES
                    .get((*month as usize).wrapping_sub(1))
                    .copied()
                    .unwrap_or("?");
                write!(f, "{}", name)
            }
        }
    }
}

impl Serialize for MonthToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ==========================================
// 收费时点 (Collection Timing)
// ==========================================
// ADVANCE: 当月费用当月 D 日到期
// ARREARS: 当月费用次月 D 日到期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionTiming {
    Advance,
    Arrears,
}

impl CollectionTiming {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ADVANCE" => Some(CollectionTiming::Advance),
            "ARREARS" => Some(CollectionTiming::Arrears),
            _ => None,
        }
    }
}

impl fmt::Display for CollectionTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionTiming::Advance => write!(f, "ADVANCE"),
            CollectionTiming::Arrears => write!(f, "ARREARS"),
        }
    }
}

// ==========================================
// 新生起算规则 (Start Rule)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StartRule {
    FromAdmissionMonth,    // 学年内入学的新生从入学月起算
    AlwaysFromSessionStart, // 一律从学年首月起算
}

impl StartRule {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "FROM_ADMISSION_MONTH" => Some(StartRule::FromAdmissionMonth),
            "ALWAYS_FROM_SESSION_START" | "ALWAYS_FROM_APRIL" => {
                Some(StartRule::AlwaysFromSessionStart)
            }
            _ => None,
        }
    }
}

impl fmt::Display for StartRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartRule::FromAdmissionMonth => write!(f, "FROM_ADMISSION_MONTH"),
            StartRule::AlwaysFromSessionStart => write!(f, "ALWAYS_FROM_SESSION_START"),
        }
    }
}
