// ==========================================
// 学费欠费计提引擎 - 配置层
// ==========================================
// 职责: 收费设置加载、缺省值、校验
// 存储: key-value (JSON 对象文件 / 内存键值对)
// ==========================================

pub mod config_manager;
pub mod fee_settings;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use fee_settings::FeeSettings;
