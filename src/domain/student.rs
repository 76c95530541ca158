// ==========================================
// 学费欠费计提引擎 - 学生领域模型
// ==========================================
// 用途: 归一化后的学生记录,引擎只读
// ==========================================

use crate::domain::types::AdmissionType;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

// ==========================================
// Student - 学生
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub admission_number: Option<String>, // 缴费关联键(非 id)
    pub admission_type: AdmissionType,
    pub admission_date: Option<NaiveDate>, // NEW 必填,缺失时入学月不计提
    pub class_name: String,
    pub student_category: String, // 缺省 GENERAL
    pub monthly_fee_override: Option<Decimal>, // 仅作用于 monthly 类收费项
    pub carried_forward_balance: Decimal, // 上期结转
}

impl Student {
    /// 最小学生记录(其余字段取中性值)
    pub fn new(id: &str, admission_type: AdmissionType, class_name: &str) -> Self {
        Self {
            id: id.to_string(),
            admission_number: None,
            admission_type,
            admission_date: None,
            class_name: class_name.to_string(),
            student_category: "GENERAL".to_string(),
            monthly_fee_override: None,
            carried_forward_balance: Decimal::ZERO,
        }
    }

    pub fn is_new(&self) -> bool {
        self.admission_type == AdmissionType::New
    }
}
