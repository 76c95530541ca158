// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use fee_dues_engine::domain::types::{AdmissionType, MonthToken, PolicyStatus};
use fee_dues_engine::domain::{FeeAmount, FeePolicy, Payment, Student};
use rust_decimal::Decimal;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

// ==========================================
// Student 构建器
// ==========================================

pub struct StudentBuilder {
    student: Student,
}

impl StudentBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            student: Student::new(id, AdmissionType::Old, "5"),
        }
    }

    pub fn new_admission(mut self, admitted: NaiveDate) -> Self {
        self.student.admission_type = AdmissionType::New;
        self.student.admission_date = Some(admitted);
        self
    }

    pub fn admission_type(mut self, admission_type: AdmissionType) -> Self {
        self.student.admission_type = admission_type;
        self
    }

    pub fn admission_number(mut self, number: &str) -> Self {
        self.student.admission_number = Some(number.to_string());
        self
    }

    pub fn class(mut self, class_name: &str) -> Self {
        self.student.class_name = class_name.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.student.student_category = category.to_string();
        self
    }

    pub fn carried_forward(mut self, amount: i64) -> Self {
        self.student.carried_forward_balance = Decimal::from(amount);
        self
    }

    pub fn monthly_fee(mut self, amount: i64) -> Self {
        self.student.monthly_fee_override = Some(Decimal::from(amount));
        self
    }

    pub fn build(self) -> Student {
        self.student
    }
}

// ==========================================
// FeePolicy 构建器
// ==========================================

pub struct PolicyBuilder {
    policy: FeePolicy,
}

impl PolicyBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            policy: FeePolicy {
                id: id.to_string(),
                name: name.to_string(),
                status: PolicyStatus::Active,
                eligible_admission_types: vec![AdmissionType::New, AdmissionType::Old],
                eligible_student_categories: vec!["GENERAL".to_string()],
                eligible_classes: vec!["5".to_string()],
                due_months: Vec::new(),
            },
        }
    }

    /// 四月..三月 + 入学月
    pub fn full_session(mut self) -> Self {
        self.policy.due_months = [4, 5, 6, 7, 8, 9, 10, 11, 12, 1, 2, 3]
            .into_iter()
            .map(MonthToken::Calendar)
            .collect();
        self.policy.due_months.push(MonthToken::AdmissionMonth);
        self
    }

    pub fn months(mut self, months: &[MonthToken]) -> Self {
        self.policy.due_months = months.to_vec();
        self
    }

    pub fn admission_types(mut self, types: &[AdmissionType]) -> Self {
        self.policy.eligible_admission_types = types.to_vec();
        self
    }

    pub fn classes(mut self, classes: &[&str]) -> Self {
        self.policy.eligible_classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.policy.status = PolicyStatus::Inactive;
        self
    }

    pub fn build(self) -> FeePolicy {
        self.policy
    }
}

/// 标准场景收费项: Monthly Tuition, 班级 5
pub fn monthly_tuition() -> FeePolicy {
    PolicyBuilder::new("tuition", "Monthly Tuition").full_session().build()
}

pub fn tuition_amounts(amount: i64) -> Vec<FeeAmount> {
    vec![FeeAmount::new("tuition", "5", Decimal::from(amount))]
}

// ==========================================
// Payment 构建器
// ==========================================

pub struct PaymentBuilder {
    payment: Payment,
}

impl PaymentBuilder {
    pub fn new(admission_number: &str, amount: i64) -> Self {
        Self {
            payment: Payment::new(admission_number, Decimal::from(amount)),
        }
    }

    pub fn discount(mut self, amount: i64) -> Self {
        self.payment.discount = Decimal::from(amount);
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.payment.status = Some(status.to_string());
        self
    }

    pub fn paid_on(mut self, paid: NaiveDate) -> Self {
        self.payment.payment_date = Some(paid);
        self
    }

    pub fn receipt(mut self, receipt: &str) -> Self {
        self.payment.receipt_number = Some(receipt.to_string());
        self
    }

    pub fn build(self) -> Payment {
        self.payment
    }
}
