// ==========================================
// 学费欠费计提引擎 - 收费设置
// ==========================================
// 职责: 引擎所需的全部可注入常量(学年首月 / 缺省类别 / 到期日 ...)
// 红线: 引擎内不得出现硬编码的四月 / GENERAL
// ==========================================

use crate::config::config_manager::config_keys;
use crate::domain::types::{AdmissionType, CollectionTiming, StartRule};
use crate::error::{DuesError, DuesResult};
use serde::{Deserialize, Serialize};

/// 收费设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSettings {
    /// 学年首月(1-12),默认 4(四月)
    pub session_start_month: u32,

    /// 学生类别缺省值,默认 GENERAL
    pub default_student_category: String,

    /// 入学类型缺省值,默认 NEW
    pub default_admission_type: AdmissionType,

    /// 每月到期日(1-31),超出当月天数时取月末,默认 5
    pub due_day_of_month: u32,

    /// 收费时点,默认 ADVANCE
    pub collection_timing: CollectionTiming,

    /// 新生起算规则,默认 FROM_ADMISSION_MONTH
    pub start_rule: StartRule,

    /// 入学截止日: 入学日 > 截止日时从次月起算,默认不启用
    pub admission_cutoff_day: Option<u32>,

    /// 月费类收费项识别关键字(忽略大小写),默认 "monthly"
    pub monthly_fee_keyword: String,

    /// 仅统计学年开始后的缴费,默认 false
    pub payments_from_session_start: bool,
}

impl Default for FeeSettings {
    fn default() -> Self {
        Self {
            session_start_month: 4,
            default_student_category: "GENERAL".to_string(),
            default_admission_type: AdmissionType::New,
            due_day_of_month: 5,
            collection_timing: CollectionTiming::Advance,
            start_rule: StartRule::FromAdmissionMonth,
            admission_cutoff_day: None,
            monthly_fee_keyword: "monthly".to_string(),
            payments_from_session_start: false,
        }
    }
}

impl FeeSettings {
    /// 校验设置
    ///
    /// # 规则
    /// - session_start_month ∈ [1, 12]
    /// - due_day_of_month ∈ [1, 31]
    /// - admission_cutoff_day ∈ [1, 31] (若设置)
    /// - default_student_category / monthly_fee_keyword 非空
    pub fn validate(&self) -> DuesResult<()> {
        if !(1..=12).contains(&self.session_start_month) {
            return Err(DuesError::invalid_config(
                config_keys::SESSION_START_MONTH,
                format!("月份超出范围: {}", self.session_start_month),
            ));
        }
        if !(1..=31).contains(&self.due_day_of_month) {
            return Err(DuesError::invalid_config(
                config_keys::DUE_DAY_OF_MONTH,
                format!("日期超出范围: {}", self.due_day_of_month),
            ));
        }
        if let Some(cutoff) = self.admission_cutoff_day {
            if !(1..=31).contains(&cutoff) {
                return Err(DuesError::invalid_config(
                    config_keys::ADMISSION_CUTOFF_DAY,
                    format!("日期超出范围: {}", cutoff),
                ));
            }
        }
        if self.default_student_category.trim().is_empty() {
            return Err(DuesError::invalid_config(
                config_keys::DEFAULT_STUDENT_CATEGORY,
                "不能为空",
            ));
        }
        if self.monthly_fee_keyword.trim().is_empty() {
            return Err(DuesError::invalid_config(
                config_keys::MONTHLY_FEE_KEYWORD,
                "不能为空",
            ));
        }
        Ok(())
    }
}
