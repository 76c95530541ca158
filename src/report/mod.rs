// ==========================================
// 学费欠费计提引擎 - 报表输出层
// ==========================================

pub mod csv_report;

pub use csv_report::{render_table, write_dues_csv, CSV_HEADERS};
