// ==========================================
// 学费欠费计提引擎 - 快照数据源层
// ==========================================
// 职责: 从文件系统加载一致快照(JSON 单文件 / JSON 目录 / CSV 目录)
// 红线: 数据源只读取,不计算;错误归入边界层错误
// ==========================================

pub mod csv;
pub mod json;
pub mod source;

pub use self::csv::CsvDirSnapshotSource;
pub use json::{JsonDirSnapshotSource, JsonFileSnapshotSource};
pub use source::SnapshotSource;

use std::path::Path;

/// 按路径选择数据源
///
/// # 规则
/// - 文件 → JSON 单文件
/// - 目录含 students.csv → CSV 目录
/// - 其他目录 → JSON 目录
pub fn source_for_path(path: &Path) -> Box<dyn SnapshotSource> {
    if path.is_dir() {
        if path.join(format!("{}.csv", source::STUDENTS)).is_file() {
            Box::new(CsvDirSnapshotSource::new(path))
        } else {
            Box::new(JsonDirSnapshotSource::new(path))
        }
    } else {
        Box::new(JsonFileSnapshotSource::new(path))
    }
}
