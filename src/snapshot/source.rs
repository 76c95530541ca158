// ==========================================
// 学费欠费计提引擎 - 快照数据源 Trait
// ==========================================
// 职责: 定义快照获取接口(不包含计算逻辑)
// 红线: 数据源保证四个集合来自同一时刻;重试/超时由调用方负责
// ==========================================

use crate::domain::records::Snapshot;
use crate::error::DuesResult;
use async_trait::async_trait;

// 集合文件名(不含扩展名)
pub const STUDENTS: &str = "students";
pub const FEE_TYPES: &str = "fee_types";
pub const FEE_AMOUNTS: &str = "fee_amounts";
pub const FEE_COLLECTIONS: &str = "fee_collections";

// ==========================================
// SnapshotSource Trait
// ==========================================
// 实现者: JsonFileSnapshotSource / JsonDirSnapshotSource / CsvDirSnapshotSource
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// 加载一次一致快照
    ///
    /// # 返回
    /// - Err(SnapshotIo / SnapshotParse / Csv): 边界层错误
    async fn load(&self) -> DuesResult<Snapshot>;

    /// 数据源描述(用于日志)
    fn describe(&self) -> String;
}
