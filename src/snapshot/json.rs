// ==========================================
// 学费欠费计提引擎 - JSON 快照数据源
// ==========================================
// 单文件: { students, feeTypes, feeAmounts, feeCollections }
// 目录:   students.json / fee_types.json / fee_amounts.json / fee_collections.json
//         (四个集合并发读取,缺失文件视为空集合)
// ==========================================

use crate::domain::records::{FeeAmountDoc, FeePolicyDoc, PaymentDoc, Snapshot, StudentDoc};
use crate::error::{DuesError, DuesResult};
use crate::snapshot::source::{SnapshotSource, FEE_AMOUNTS, FEE_COLLECTIONS, FEE_TYPES, STUDENTS};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

pub(crate) async fn read_optional(path: &Path) -> DuesResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "集合文件不存在,按空集合处理");
            Ok(None)
        }
        Err(err) => Err(DuesError::SnapshotIo {
            path: path.display().to_string(),
            message: err.to_string(),
        }),
    }
}

fn parse_json<T: DeserializeOwned>(raw: &str, path: &Path) -> DuesResult<T> {
    serde_json::from_str(raw).map_err(|err| DuesError::SnapshotParse {
        source_name: path.display().to_string(),
        message: err.to_string(),
    })
}

async fn load_collection<T: DeserializeOwned>(path: PathBuf) -> DuesResult<Vec<T>> {
    match read_optional(&path).await? {
        Some(raw) => parse_json(&raw, &path),
        None => Ok(Vec::new()),
    }
}

// ==========================================
// JsonFileSnapshotSource - 单文件快照
// ==========================================
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotSource {
    path: PathBuf,
}

impl JsonFileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSnapshotSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> DuesResult<Snapshot> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| DuesError::SnapshotIo {
                path: self.path.display().to_string(),
                message: err.to_string(),
            })?;
        parse_json(&raw, &self.path)
    }

    fn describe(&self) -> String {
        format!("json-file:{}", self.path.display())
    }
}

// ==========================================
// JsonDirSnapshotSource - 按集合拆分的目录
// ==========================================
#[derive(Debug, Clone)]
pub struct JsonDirSnapshotSource {
    dir: PathBuf,
}

impl JsonDirSnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }
}

#[async_trait]
impl SnapshotSource for JsonDirSnapshotSource {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn load(&self) -> DuesResult<Snapshot> {
        let (students, fee_policies, fee_amounts, payments) = futures::try_join!(
            load_collection::<StudentDoc>(self.file(STUDENTS)),
            load_collection::<FeePolicyDoc>(self.file(FEE_TYPES)),
            load_collection::<FeeAmountDoc>(self.file(FEE_AMOUNTS)),
            load_collection::<PaymentDoc>(self.file(FEE_COLLECTIONS)),
        )?;

        Ok(Snapshot {
            students,
            fee_policies,
            fee_amounts,
            payments,
        })
    }

    fn describe(&self) -> String {
        format!("json-dir:{}", self.dir.display())
    }
}
