// ==========================================
// 学费欠费计提引擎 - 学生级异常
// ==========================================
// 红线: 单个学生的异常只隔离该学生,不中断整批计算
// ==========================================

use thiserror::Error;

/// 学生级计算异常
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StudentAnomaly {
    #[error("学生记录缺少 id")]
    MissingStudentId,

    #[error("到期日超出日历范围: year={year}, month={month}")]
    DateOutOfRange { year: i32, month: u32 },

    #[error("金额计算溢出: {context}")]
    AmountOverflow { context: String },
}

impl StudentAnomaly {
    pub fn overflow(context: impl Into<String>) -> Self {
        StudentAnomaly::AmountOverflow {
            context: context.into(),
        }
    }
}
