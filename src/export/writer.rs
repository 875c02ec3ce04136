// ==========================================
// 养护作业优先级系统 - 结果导出
// ==========================================
// 输出: Excel（明细表 + 汇总表）/ CSV（明细 + 可选汇总文件）/ JSON
// 排序: 优先级升序,-1 排在最后；同优先级保持输入顺序
// 列: 固定列 → 高速路段列（源文件有该列时）→ 透传列（按列名排序）
// ==========================================

use crate::domain::job::PrioritizedJob;
use crate::engine::pipeline::PipelineResult;
use crate::engine::priority::CANNOT_DO_PRIORITY;
use crate::engine::summary::SummaryStatistics;
use crate::export::error::{ExportError, ExportResult};
use crate::i18n;
use csv::Writer;
use rust_xlsxwriter::Workbook;
use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// 作业明细固定列
pub const OUTPUT_HEADER: &[&str] = &[
    "Priority",
    "JobID",
    "Parent Job Type",
    "Standard Job",
    "Location",
    "Road",
    "Due",
    "LGA",
    "Area",
    "can_do_internally",
    "needs_capability_check",
    "Cannot_Do_Flag",
    "Capability_Check_Flag",
];

/// 高速路段列（仅当任一作业带有该值时输出）
pub const HIGH_SPEED_ZONE_HEADER: &[&str] = &["high_speed_zone", "High_Speed_Zone_Flag"];

pub const JOBS_SHEET: &str = "Prioritized Jobs";
pub const SUMMARY_SHEET: &str = "Summary";

/// 按输出顺序排列（稳定排序）
pub fn order_for_output(jobs: &[PrioritizedJob]) -> Vec<&PrioritizedJob> {
    let mut ordered: Vec<&PrioritizedJob> = jobs.iter().collect();
    ordered.sort_by_key(|j| (j.priority == CANNOT_DO_PRIORITY, j.priority));
    ordered
}

/// 汇总表路径: <stem>_summary.csv
pub fn summary_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output.with_file_name(format!("{}_summary.csv", stem))
}

/// 汇总行（指标名按当前语言）
fn summary_rows(stats: &SummaryStatistics) -> Vec<(String, usize)> {
    stats
        .metrics()
        .into_iter()
        .map(|(key, value)| (i18n::t(key), value))
        .collect()
}

// ==========================================
// OutputTable - 导出表格模型
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputCell {
    Number(i32),
    Text(String),
    Flag(bool),
}

impl fmt::Display for OutputCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputCell::Number(n) => write!(f, "{}", n),
            OutputCell::Text(text) => write!(f, "{}", text),
            OutputCell::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<OutputCell>>,
}

impl OutputTable {
    /// 排序结果 → 表格（已按输出顺序排列）
    ///
    /// Due 列输出源文件中的原始文本。
    pub fn from_jobs(jobs: &[PrioritizedJob]) -> Self {
        let with_high_speed_zone = jobs.iter().any(|j| j.job.high_speed_zone.is_some());
        let extra_columns: BTreeSet<&str> = jobs
            .iter()
            .flat_map(|j| j.job.extra.keys().map(String::as_str))
            .collect();

        let mut headers: Vec<String> = OUTPUT_HEADER.iter().map(|h| h.to_string()).collect();
        if with_high_speed_zone {
            headers.extend(HIGH_SPEED_ZONE_HEADER.iter().map(|h| h.to_string()));
        }
        headers.extend(extra_columns.iter().map(|c| c.to_string()));

        let rows = order_for_output(jobs)
            .into_iter()
            .map(|job| {
                let text = |v: &Option<String>| OutputCell::Text(v.clone().unwrap_or_default());
                let mut row = vec![
                    OutputCell::Number(job.priority),
                    OutputCell::Text(job.job.job_id.clone()),
                    OutputCell::Text(job.job.category.label().to_string()),
                    text(&job.job.capability_code),
                    text(&job.job.location),
                    text(&job.job.road),
                    OutputCell::Text(job.job.due.display()),
                    text(&job.job.lga),
                    text(&job.job.area),
                    OutputCell::Flag(job.can_do_internally),
                    OutputCell::Flag(job.needs_capability_check),
                    OutputCell::Flag(job.cannot_do_flag),
                    OutputCell::Flag(job.capability_check_flag),
                ];

                if with_high_speed_zone {
                    row.push(match job.job.high_speed_zone {
                        Some(flag) => OutputCell::Flag(flag),
                        None => OutputCell::Text(String::new()),
                    });
                    row.push(OutputCell::Flag(job.job.high_speed_zone == Some(true)));
                }

                row.extend(extra_columns.iter().map(|col| {
                    OutputCell::Text(job.job.extra.get(*col).cloned().unwrap_or_default())
                }));
                row
            })
            .collect();

        Self { headers, rows }
    }
}

// ==========================================
// CsvExporter
// ==========================================
pub struct CsvExporter {
    include_summary: bool,
}

impl CsvExporter {
    pub fn new(include_summary: bool) -> Self {
        Self { include_summary }
    }

    /// 写出作业明细（及汇总表）
    ///
    /// # 返回
    /// 实际写出的文件路径列表
    pub fn export(&self, result: &PipelineResult, path: &Path) -> ExportResult<Vec<PathBuf>> {
        let table = OutputTable::from_jobs(&result.jobs);

        let mut writer = Writer::from_writer(File::create(path)?);
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        writer.flush()?;

        let mut written = vec![path.to_path_buf()];
        if self.include_summary {
            let summary = summary_path(path);
            Self::write_summary(&result.statistics, &summary)?;
            written.push(summary);
        }

        info!(path = %path.display(), rows = table.rows.len(), "CSV 导出完成");
        Ok(written)
    }

    fn write_summary(stats: &SummaryStatistics, path: &Path) -> ExportResult<()> {
        let mut writer = Writer::from_writer(File::create(path)?);
        writer.write_record([i18n::t("summary.metric"), i18n::t("summary.value")])?;
        for (label, value) in summary_rows(stats) {
            writer.write_record([label, value.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

// ==========================================
// XlsxExporter
// ==========================================
// 工作表: "Prioritized Jobs" + 可选 "Summary"
pub struct XlsxExporter {
    include_summary: bool,
}

impl XlsxExporter {
    pub fn new(include_summary: bool) -> Self {
        Self { include_summary }
    }

    pub fn export(&self, result: &PipelineResult, path: &Path) -> ExportResult<Vec<PathBuf>> {
        let table = OutputTable::from_jobs(&result.jobs);
        let mut workbook = Workbook::new();

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(JOBS_SHEET)?;

            for (col, header) in table.headers.iter().enumerate() {
                sheet.write_string(0, col as u16, header)?;
            }
            for (idx, row) in table.rows.iter().enumerate() {
                let r = idx as u32 + 1;
                for (col, cell) in row.iter().enumerate() {
                    let c = col as u16;
                    match cell {
                        OutputCell::Number(n) => sheet.write_number(r, c, *n)?,
                        OutputCell::Text(text) => sheet.write_string(r, c, text)?,
                        OutputCell::Flag(flag) => sheet.write_boolean(r, c, *flag)?,
                    };
                }
            }
        }

        if self.include_summary {
            let sheet = workbook.add_worksheet();
            sheet.set_name(SUMMARY_SHEET)?;
            sheet.write_string(0, 0, i18n::t("summary.metric"))?;
            sheet.write_string(0, 1, i18n::t("summary.value"))?;
            for (idx, (label, value)) in summary_rows(&result.statistics).into_iter().enumerate() {
                let r = idx as u32 + 1;
                sheet.write_string(r, 0, label)?;
                sheet.write_number(r, 1, value as f64)?;
            }
        }

        workbook.save(path)?;

        info!(path = %path.display(), rows = table.rows.len(), "Excel 导出完成");
        Ok(vec![path.to_path_buf()])
    }
}

// ==========================================
// JsonExporter
// ==========================================
pub struct JsonExporter;

impl JsonExporter {
    pub fn export(&self, result: &PipelineResult, path: &Path) -> ExportResult<Vec<PathBuf>> {
        let mut ordered = result.clone();
        ordered.jobs = order_for_output(&result.jobs).into_iter().cloned().collect();

        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &ordered)?;

        info!(path = %path.display(), rows = result.jobs.len(), "JSON 导出完成");
        Ok(vec![path.to_path_buf()])
    }
}

/// 按扩展名选择导出器
pub fn export<P: AsRef<Path>>(
    result: &PipelineResult,
    path: P,
    include_summary: bool,
) -> ExportResult<Vec<PathBuf>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" => XlsxExporter::new(include_summary).export(result, path),
        "csv" => CsvExporter::new(include_summary).export(result, path),
        "json" => JsonExporter.export(result, path),
        other => Err(ExportError::UnsupportedFormat(other.to_string())),
    }
}
