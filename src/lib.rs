// ==========================================
// 学费欠费计提引擎 - 核心库
// ==========================================
// 职责: 按参考日期计算每个学生的应收未收余额
// 技术栈: Rust + tokio + rust_decimal
// 系统定位: 只读计算 (快照输入,欠费报告输出)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 文档、实体与类型
pub mod domain;

// 配置层 - 收费设置
pub mod config;

// 引擎层 - 计提规则
pub mod engine;

// 数据源层 - 快照加载
pub mod snapshot;

// 报表层 - CSV / 表格
pub mod report;

// 日志系统
pub mod logging;

// 错误类型
pub mod error;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AdmissionType, CollectionTiming, MonthToken, PolicyStatus, StartRule};

// 领域实体
pub use domain::{
    AcademicSession, DuesRecord, DuesReport, FeeAmount, FeePolicy, Payment, SkippedRecord,
    Snapshot, Student,
};

// 配置
pub use config::{ConfigManager, FeeSettings};

// 引擎
pub use engine::{compute_dues, DuesEngine, DuesSummary, SessionResolver};

// 数据源
pub use snapshot::{
    CsvDirSnapshotSource, JsonDirSnapshotSource, JsonFileSnapshotSource, SnapshotSource,
};

// 错误
pub use error::{DuesError, DuesResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "学费欠费计提引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
