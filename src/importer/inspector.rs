// ==========================================
// 养护作业优先级系统 - 文件检查器
// ==========================================
// 职责: 在正式运行前检查输入文件的结构与数据质量
// 红线: 只报告,不修改、不中断（类别错误也只计数）
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::types::JobCategory;
use crate::engine::date_parser::DueDateParser;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalFileParser;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

const SAMPLE_LIMIT: usize = 5;

// ==========================================
// 检查结果
// ==========================================

/// 作业文件检查结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobFileInspection {
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub missing_columns: Vec<String>,
    pub category_counts: BTreeMap<String, usize>, // 标准化后的类别 → 行数
    pub unknown_categories: BTreeMap<String, usize>,
    pub unparseable_due_samples: Vec<String>,
    pub unparseable_due_count: usize,
    pub blank_counts: BTreeMap<String, usize>, // 列名 → 空白行数
    pub earliest_due: Option<NaiveDateTime>,
    pub latest_due: Option<NaiveDateTime>,
    pub jobs_per_month: BTreeMap<String, usize>, // YYYY-MM → 行数
}

impl JobFileInspection {
    /// 结构完整且类别全部可识别
    pub fn is_importable(&self) -> bool {
        self.missing_columns.is_empty() && self.unknown_categories.is_empty()
    }
}

/// 能力对照表检查结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapabilityFileInspection {
    pub total_rows: usize,
    pub missing_columns: Vec<String>,
    pub none_count: usize,       // 描述为 none 或空白
    pub comparison_count: usize, // 描述含 '<' 或 '>'
    pub samples: Vec<(String, String)>,
}

// ==========================================
// FileInspector
// ==========================================
pub struct FileInspector<'c> {
    config: &'c PipelineConfig,
    parser: DueDateParser,
}

impl<'c> FileInspector<'c> {
    pub fn new(config: &'c PipelineConfig) -> Self {
        Self {
            config,
            parser: DueDateParser::new(config.date_formats.clone()),
        }
    }

    /// 检查作业文件
    pub fn inspect_jobs<P: AsRef<Path>>(&self, path: P) -> ImportResult<JobFileInspection> {
        let sheet = UniversalFileParser::default().parse(path)?;
        let columns = &self.config.job_columns;

        let mut report = JobFileInspection {
            total_rows: sheet.rows.len(),
            missing_columns: sheet.missing_columns(&columns.required()),
            columns: sheet.headers.clone(),
            ..Default::default()
        };

        for header in &sheet.headers {
            let blanks = sheet
                .rows
                .iter()
                .filter(|row| row.get(header).map_or(true, |v| v.is_empty()))
                .count();
            if blanks > 0 {
                report.blank_counts.insert(header.clone(), blanks);
            }
        }

        for row in &sheet.rows {
            if let Some(text) = row.get(&columns.category).filter(|v| !v.is_empty()) {
                match JobCategory::parse(text) {
                    Some(category) => {
                        *report
                            .category_counts
                            .entry(category.label().to_string())
                            .or_insert(0) += 1
                    }
                    None => *report.unknown_categories.entry(text.clone()).or_insert(0) += 1,
                }
            }

            let Some(due_text) = row.get(&columns.due).filter(|v| !v.is_empty()) else {
                continue;
            };
            match self.parser.parse(due_text) {
                Some(due) => {
                    report.earliest_due = Some(report.earliest_due.map_or(due, |e| e.min(due)));
                    report.latest_due = Some(report.latest_due.map_or(due, |l| l.max(due)));
                    *report
                        .jobs_per_month
                        .entry(due.format("%Y-%m").to_string())
                        .or_insert(0) += 1;
                }
                None => {
                    report.unparseable_due_count += 1;
                    if report.unparseable_due_samples.len() < SAMPLE_LIMIT {
                        report.unparseable_due_samples.push(due_text.clone());
                    }
                }
            }
        }

        Ok(report)
    }

    /// 检查能力对照表
    pub fn inspect_capability<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ImportResult<CapabilityFileInspection> {
        let sheet = UniversalFileParser::new(self.config.capability_sheet.clone()).parse(path)?;
        let columns = &self.config.capability_columns;

        let mut report = CapabilityFileInspection {
            total_rows: sheet.rows.len(),
            missing_columns: sheet
                .missing_columns(&[columns.code.as_str(), columns.descriptor.as_str()]),
            ..Default::default()
        };

        for row in &sheet.rows {
            let code = row.get(&columns.code).cloned().unwrap_or_default();
            let descriptor = row.get(&columns.descriptor).cloned().unwrap_or_default();

            if descriptor.is_empty() || descriptor.eq_ignore_ascii_case("none") {
                report.none_count += 1;
            } else if descriptor.contains('<') || descriptor.contains('>') {
                report.comparison_count += 1;
            }

            if report.samples.len() < SAMPLE_LIMIT {
                report.samples.push((code, descriptor));
            }
        }

        Ok(report)
    }
}
