// ==========================================
// 学费欠费计提引擎 - 欠费报表导出
// ==========================================
// CSV: 每个欠费学生一行(金额保持十进制原文)
// 表格: 终端等宽文本
// ==========================================

use crate::domain::dues::DuesRecord;
use crate::error::DuesResult;
use csv::WriterBuilder;
use std::io::Write;

pub const CSV_HEADERS: [&str; 11] = [
    "studentId",
    "admissionNumber",
    "class",
    "totalPayable",
    "totalPaid",
    "totalDiscount",
    "carriedForwardBalance",
    "outstandingBalance",
    "payableLines",
    "paymentCount",
    "lastPaymentDate",
];

/// 写出欠费记录 CSV
///
/// # 参数
/// - writer: 任意输出目标(文件 / stdout / 内存)
/// - records: 欠费记录(按传入顺序写出)
pub fn write_dues_csv<W: Write>(writer: W, records: &[DuesRecord]) -> DuesResult<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;

    for record in records {
        let last_payment_date = record
            .last_payment
            .as_ref()
            .and_then(|p| p.payment_date)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        csv_writer.write_record([
            record.student_id.clone(),
            record.admission_number.clone().unwrap_or_default(),
            record.class_name.clone(),
            record.total_payable.to_string(),
            record.total_paid.to_string(),
            record.total_discount.to_string(),
            record.carried_forward_balance.to_string(),
            record.outstanding_balance.to_string(),
            record.payable_lines.len().to_string(),
            record.payment_count.to_string(),
            last_payment_date,
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// 渲染终端表格
pub fn render_table(records: &[&DuesRecord]) -> String {
    let headers = ["Student", "Adm No", "Class", "Payable", "Paid", "Discount", "Outstanding"];
    let rows: Vec<[String; 7]> = records
        .iter()
        .map(|r| {
            [
                r.student_id.clone(),
                r.admission_number.clone().unwrap_or_else(|| "-".to_string()),
                r.class_name.clone(),
                r.total_payable.to_string(),
                r.total_paid.to_string(),
                r.total_discount.to_string(),
                r.outstanding_balance.to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(idx, (cell, width))| {
                // 金额列右对齐
                if idx >= 3 {
                    format!("{:>width$}", cell, width = *width)
                } else {
                    format!("{:<width$}", cell, width = *width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(headers.to_vec()));
    out.push('\n');
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record() -> DuesRecord {
        DuesRecord {
            student_id: "s1".to_string(),
            admission_number: Some("A-1".to_string()),
            class_name: "5".to_string(),
            total_payable: Decimal::from(2500),
            total_paid: Decimal::from(1000),
            total_discount: Decimal::ZERO,
            carried_forward_balance: Decimal::ZERO,
            outstanding_balance: Decimal::from(1500),
            payable_lines: Vec::new(),
            payment_count: 1,
            last_payment: None,
        }
    }

    #[test]
    fn test_render_table_alignment() {
        let r = record();
        let table = render_table(&[&r]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Student"));
        assert!(lines[2].starts_with("s1"));
        assert!(lines[2].ends_with("1500"));
    }

    #[test]
    fn test_render_table_empty() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 2);
    }
}
