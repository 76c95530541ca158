// ==========================================
// 学费欠费计提引擎 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类:
//   - 致命前置条件: 参考日期非法 / 配置非法
//   - 边界层错误: 快照读取 / 解析 / CSV
// 说明: 数据形态异常不在此处,由归一化层就地兜底
// ==========================================

use thiserror::Error;

/// 欠费引擎错误类型
#[derive(Error, Debug)]
pub enum DuesError {
    // ===== 前置条件错误 =====
    #[error("参考日期非法: {0}")]
    InvalidReferenceDate(String),

    #[error("配置项非法 (key={key}): {message}")]
    InvalidConfig { key: String, message: String },

    // ===== 快照边界错误 =====
    #[error("快照读取失败 ({path}): {message}")]
    SnapshotIo { path: String, message: String },

    #[error("快照解析失败 ({source_name}): {message}")]
    SnapshotParse { source_name: String, message: String },

    #[error("CSV 处理失败: {0}")]
    Csv(String),

    // ===== 通用错误 =====
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DuesError {
    /// 构造配置错误
    pub fn invalid_config(key: &str, message: impl Into<String>) -> Self {
        DuesError::InvalidConfig {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for DuesError {
    fn from(err: serde_json::Error) -> Self {
        DuesError::SnapshotParse {
            source_name: "json".to_string(),
            message: err.to_string(),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for DuesError {
    fn from(err: csv::Error) -> Self {
        DuesError::Csv(err.to_string())
    }
}

/// Result 类型别名
pub type DuesResult<T> = Result<T, DuesError>;
