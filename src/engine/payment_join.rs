// ==========================================
// 学费欠费计提引擎 - 缴费关联
// ==========================================
// 关联键: 学号(去首尾空白后相等),非学生 id
// 空学号/缺失学号不参与关联
// ==========================================

use crate::domain::payment::Payment;
use crate::domain::student::Student;
use std::collections::{BTreeSet, HashMap};

/// 学生与缴费记录的关联策略
pub trait PaymentJoin<'a> {
    /// 返回该学生可见的全部缴费记录(含已作废,由调用方过滤)
    fn payments_for(&self, student: &Student) -> &[&'a Payment];
}

fn join_key(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ==========================================
// AdmissionNumberJoin - 按学号关联(默认实现)
// ==========================================
#[derive(Debug, Default)]
pub struct AdmissionNumberJoin<'a> {
    index: HashMap<String, Vec<&'a Payment>>,
}

impl<'a> AdmissionNumberJoin<'a> {
    /// 对整批缴费记录建立一次索引
    pub fn new(payments: &'a [Payment]) -> Self {
        let mut index: HashMap<String, Vec<&'a Payment>> = HashMap::new();
        for payment in payments {
            if let Some(key) = join_key(payment.student_admission_number.as_deref()) {
                index.entry(key.to_string()).or_default().push(payment);
            }
        }
        Self { index }
    }

    /// 被多个学生共用的学号(升序),用于告警
    pub fn duplicate_admission_numbers(students: &[Student]) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for student in students {
            if let Some(key) = join_key(student.admission_number.as_deref()) {
                if !seen.insert(key) {
                    duplicates.insert(key.to_string());
                }
            }
        }
        duplicates.into_iter().collect()
    }

    pub fn indexed_keys(&self) -> usize {
        self.index.len()
    }
}

impl<'a> PaymentJoin<'a> for AdmissionNumberJoin<'a> {
    fn payments_for(&self, student: &Student) -> &[&'a Payment] {
        join_key(student.admission_number.as_deref())
            .and_then(|key| self.index.get(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
