// ==========================================
// 学费欠费计提引擎 - 领域模型层
// ==========================================
// 职责: 定义快照文档、领域实体、值对象、输出模型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod dues;
pub mod fee;
pub mod lenient;
pub mod payment;
pub mod records;
pub mod session;
pub mod student;
pub mod types;

// 重导出核心类型
pub use dues::{DuesRecord, DuesReport, LastPayment, PayableLine, SkippedRecord};
pub use fee::{FeeAmount, FeePolicy};
pub use payment::Payment;
pub use records::{FeeAmountDoc, FeePolicyDoc, PaymentDoc, Snapshot, StudentDoc};
pub use session::AcademicSession;
pub use student::Student;
pub use types::{AdmissionType, CollectionTiming, MonthToken, PolicyStatus, StartRule};
