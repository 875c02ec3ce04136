// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成临时输入文件（作业 / 能力对照表 / 区域映射,CSV 与 Excel）
// ==========================================

#![allow(dead_code)]

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

pub const JOB_HEADER: &str = "JobID,Parent Job Type,Location,Road,Standard Job,Due,LGA";

/// 写入临时 CSV 文件（需要保持存活）
pub fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

/// 作业文件（自动加表头）
pub fn job_file(rows: &[&str]) -> NamedTempFile {
    let mut lines = vec![JOB_HEADER];
    lines.extend_from_slice(rows);
    write_csv(&lines)
}

/// 能力对照表（code, descriptor）
pub fn capability_file(entries: &[(&str, &str)]) -> NamedTempFile {
    let rows: Vec<String> = entries
        .iter()
        .map(|(code, desc)| format!("{},{}", code, desc))
        .collect();
    let mut lines = vec!["Job Code,Capability Internal"];
    lines.extend(rows.iter().map(String::as_str));
    write_csv(&lines)
}

pub fn datetime(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Excel 单元格
pub enum Cell<'a> {
    Text(&'a str),
    Date(NaiveDateTime),
}

/// 写入临时 Excel 文件,每项为（工作表名, 行）
pub fn write_xlsx(sheets: &[(&str, Vec<Vec<Cell>>)]) -> NamedTempFile {
    let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let mut workbook = Workbook::new();

    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Text(text) => {
                        sheet.write_string(r, c, *text).unwrap();
                    }
                    Cell::Date(at) => {
                        let stamp = ExcelDateTime::from_ymd(
                            at.year() as u16,
                            at.month() as u8,
                            at.day() as u8,
                        )
                        .unwrap()
                        .and_hms(at.hour() as u16, at.minute() as u8, at.second())
                        .unwrap();
                        sheet.write_datetime_with_format(r, c, &stamp, &date_format).unwrap();
                    }
                }
            }
        }
    }

    workbook.save(file.path()).unwrap();
    file
}
