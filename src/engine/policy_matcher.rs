// ==========================================
// 学费欠费计提引擎 - 收费项匹配器
// ==========================================
// 判定顺序(命中即返回):
//   1. status != ACTIVE → 拒绝
//   2. 入学类型不在适用范围 → 拒绝
//   3. 学生类别不在适用范围(缺省 GENERAL) → 拒绝
//   4. 班级条件(两子句,任一成立即可):
//      A. 班级 ∈ 收费项适用班级
//      B. 分班金额表存在 (收费项, 班级) 行
// ==========================================

use crate::domain::fee::FeePolicy;
use crate::domain::student::Student;
use crate::engine::amount_resolver::FeeAmountTable;
use std::fmt;

/// 拒绝原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Inactive,
    AdmissionType,
    StudentCategory,
    Class,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Inactive => write!(f, "INACTIVE"),
            RejectReason::AdmissionType => write!(f, "ADMISSION_TYPE"),
            RejectReason::StudentCategory => write!(f, "STUDENT_CATEGORY"),
            RejectReason::Class => write!(f, "CLASS"),
        }
    }
}

/// 班级条件两子句的独立判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassClauses {
    pub in_eligible_classes: bool,
    pub has_amount_row: bool,
}

impl ClassClauses {
    pub fn satisfied(&self) -> bool {
        self.in_eligible_classes || self.has_amount_row
    }
}

/// 匹配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDecision {
    Matched(ClassClauses),
    Rejected(RejectReason),
}

impl MatchDecision {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchDecision::Matched(_))
    }
}

// ==========================================
// PolicyMatcher - 收费项匹配器
// ==========================================
pub struct PolicyMatcher<'a> {
    amounts: &'a FeeAmountTable,
    default_category: String,
}

impl<'a> PolicyMatcher<'a> {
    pub fn new(amounts: &'a FeeAmountTable, default_category: &str) -> Self {
        Self {
            amounts,
            default_category: default_category.to_string(),
        }
    }

    /// 子句 A: 班级在适用班级列表中
    pub fn class_in_list(student: &Student, policy: &FeePolicy) -> bool {
        policy.eligible_classes.iter().any(|c| c == &student.class_name)
    }

    /// 子句 B: 分班金额表存在该班级行
    pub fn class_in_amount_table(&self, student: &Student, policy: &FeePolicy) -> bool {
        self.amounts.has_row(&policy.id, &student.class_name)
    }

    fn effective_category<'s>(&'s self, student: &'s Student) -> &'s str {
        let category = student.student_category.trim();
        if category.is_empty() {
            self.default_category.as_str()
        } else {
            category
        }
    }

    /// 判定收费项是否适用于学生
    pub fn decide(&self, student: &Student, policy: &FeePolicy) -> MatchDecision {
        if !policy.is_active() {
            return MatchDecision::Rejected(RejectReason::Inactive);
        }

        if !policy.eligible_admission_types.contains(&student.admission_type) {
            return MatchDecision::Rejected(RejectReason::AdmissionType);
        }

        let category = self.effective_category(student);
        if !policy
            .eligible_student_categories
            .iter()
            .any(|c| c == category)
        {
            return MatchDecision::Rejected(RejectReason::StudentCategory);
        }

        let clauses = ClassClauses {
            in_eligible_classes: Self::class_in_list(student, policy),
            has_amount_row: self.class_in_amount_table(student, policy),
        };
        if !clauses.satisfied() {
            return MatchDecision::Rejected(RejectReason::Class);
        }

        MatchDecision::Matched(clauses)
    }

    pub fn matches(&self, student: &Student, policy: &FeePolicy) -> bool {
        self.decide(student, policy).is_match()
    }
}
