// ==========================================
// 学费欠费计提引擎 - 引擎层
// ==========================================
// 职责: 学年解析 / 收费项匹配 / 金额解析 / 月份计提 / 欠费汇总
// 红线: 引擎不做 I/O,不写回数据;单个学生异常不中断整批
// ==========================================

pub mod accrual;
pub mod aggregator;
pub mod amount_resolver;
pub mod anomaly;
pub mod dues_engine;
pub mod normalizer;
pub mod payment_join;
pub mod policy_matcher;
pub mod session;
pub mod summary;

// 重导出核心引擎
pub use accrual::{AccrualScheduler, AccruedMonth, YearMonth};
pub use aggregator::{compute_dues, DuesAggregator};
pub use amount_resolver::{AmountResolver, AmountSource, FeeAmountTable, ResolvedAmount};
pub use anomaly::StudentAnomaly;
pub use dues_engine::DuesEngine;
pub use normalizer::{NormalizedSnapshot, RecordNormalizer};
pub use payment_join::{AdmissionNumberJoin, PaymentJoin};
pub use policy_matcher::{ClassClauses, MatchDecision, PolicyMatcher, RejectReason};
pub use session::SessionResolver;
pub use summary::{DefaulterEntry, DuesSummary};
