// ==========================================
// 学费欠费计提引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: key-value (与设置文档 payment_info 字段一一对应)
// ==========================================

use crate::config::fee_settings::FeeSettings;
use crate::domain::types::{AdmissionType, CollectionTiming, StartRule, MONTH_NAMES};
use crate::error::{DuesError, DuesResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置(全部取默认值)
    pub fn new() -> Self {
        Self::default()
    }

    /// 从键值对创建
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { values }
    }

    /// 从 JSON 对象文本创建
    ///
    /// # 说明
    /// - 值可以是字符串 / 数字 / 布尔
    /// - null 视为未配置
    /// - 嵌套对象/数组视为非法
    pub fn from_json_str(raw: &str) -> DuesResult<Self> {
        let parsed: BTreeMap<String, Value> = serde_json::from_str(raw)?;

        let mut values = BTreeMap::new();
        for (key, value) in parsed {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(DuesError::invalid_config(&key, "不支持嵌套结构"));
                }
            };
            values.insert(key, text);
        }

        Ok(Self { values })
    }

    /// 从 JSON 文件创建
    pub async fn from_json_file(path: impl AsRef<Path>) -> DuesResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DuesError::SnapshotIo {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::from_json_str(&raw)
    }

    /// 覆写单个配置
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置值
    fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 读取全部配置的快照(JSON格式)
    ///
    /// # 用途
    /// - 随计算结果一并记录,保证三个调用方口径一致时可追溯
    pub fn get_config_snapshot(&self) -> DuesResult<String> {
        Ok(serde_json::to_string(&self.values)?)
    }

    // ===== 学年配置 =====

    /// 获取学年首月
    ///
    /// # 说明
    /// 接受数字(1-12)或英文月份全称
    pub fn get_session_start_month(&self, default: u32) -> DuesResult<u32> {
        let Some(raw) = self.get_config_value(config_keys::SESSION_START_MONTH) else {
            return Ok(default);
        };
        if let Ok(month) = raw.parse::<u32>() {
            return Ok(month);
        }
        MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(raw))
            .map(|idx| idx as u32 + 1)
            .ok_or_else(|| {
                DuesError::invalid_config(
                    config_keys::SESSION_START_MONTH,
                    format!("无法识别的月份: {}", raw),
                )
            })
    }

    // ===== 计提配置 =====

    fn get_u32(&self, key: &str, default: u32) -> DuesResult<u32> {
        match self.get_config_value(key) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| DuesError::invalid_config(key, format!("不是有效整数: {}", raw))),
            None => Ok(default),
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> DuesResult<bool> {
        match self.get_config_value(key).map(|v| v.to_lowercase()) {
            Some(v) => match v.as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(DuesError::invalid_config(key, format!("不是有效布尔值: {}", v))),
            },
            None => Ok(default),
        }
    }

    fn get_parsed<T>(
        &self,
        key: &str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> DuesResult<T> {
        match self.get_config_value(key) {
            Some(raw) => {
                parse(raw).ok_or_else(|| DuesError::invalid_config(key, format!("无法识别: {}", raw)))
            }
            None => Ok(default),
        }
    }

    /// 加载并校验收费设置
    pub fn load_settings(&self) -> DuesResult<FeeSettings> {
        for key in self.values.keys() {
            if !config_keys::ALL.contains(&key.as_str()) {
                warn!(key = %key, "忽略未知配置项");
            }
        }

        let defaults = FeeSettings::default();
        let cutoff = match self.get_config_value(config_keys::ADMISSION_CUTOFF_DAY) {
            Some(_) => Some(self.get_u32(config_keys::ADMISSION_CUTOFF_DAY, 0)?),
            None => defaults.admission_cutoff_day,
        };

        let settings = FeeSettings {
            session_start_month: self.get_session_start_month(defaults.session_start_month)?,
            default_student_category: self
                .get_config_value(config_keys::DEFAULT_STUDENT_CATEGORY)
                .map(|v| v.to_string())
                .unwrap_or(defaults.default_student_category),
            default_admission_type: self.get_parsed(
                config_keys::DEFAULT_ADMISSION_TYPE,
                defaults.default_admission_type,
                AdmissionType::parse,
            )?,
            due_day_of_month: self.get_u32(config_keys::DUE_DAY_OF_MONTH, defaults.due_day_of_month)?,
            collection_timing: self.get_parsed(
                config_keys::COLLECTION_TIMING,
                defaults.collection_timing,
                CollectionTiming::parse,
            )?,
            start_rule: self.get_parsed(config_keys::START_RULE, defaults.start_rule, StartRule::parse)?,
            admission_cutoff_day: cutoff,
            monthly_fee_keyword: self
                .get_config_value(config_keys::MONTHLY_FEE_KEYWORD)
                .map(|v| v.to_string())
                .unwrap_or(defaults.monthly_fee_keyword),
            payments_from_session_start: self.get_bool(
                config_keys::PAYMENTS_FROM_SESSION_START,
                defaults.payments_from_session_start,
            )?,
        };

        settings.validate()?;
        Ok(settings)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const SESSION_START_MONTH: &str = "session_start_month";
    pub const DEFAULT_STUDENT_CATEGORY: &str = "default_student_category";
    pub const DEFAULT_ADMISSION_TYPE: &str = "default_admission_type";
    pub const DUE_DAY_OF_MONTH: &str = "due_day_of_month";
    pub const COLLECTION_TIMING: &str = "collection_timing";
    pub const START_RULE: &str = "start_rule";
    pub const ADMISSION_CUTOFF_DAY: &str = "admission_cutoff_day";
    pub const MONTHLY_FEE_KEYWORD: &str = "monthly_fee_keyword";
    pub const PAYMENTS_FROM_SESSION_START: &str = "payments_from_session_start";

    pub const ALL: [&str; 9] = [
        SESSION_START_MONTH,
        DEFAULT_STUDENT_CATEGORY,
        DEFAULT_ADMISSION_TYPE,
        DUE_DAY_OF_MONTH,
        COLLECTION_TIMING,
        START_RULE,
        ADMISSION_CUTOFF_DAY,
        MONTHLY_FEE_KEYWORD,
        PAYMENTS_FROM_SESSION_START,
    ];
}
