// ==========================================
// 养护作业优先级系统 - 日期筛选引擎
// ==========================================
// 职责: 剔除到期时间早于基准时间的作业
// 输入: 作业记录 + 基准时间（已在边界解析）
// 输出: 保留的作业（附带解析后的到期时间）+ 剔除报告
// ==========================================
// 红线: 到期时间缺失/无法解析的作业一律剔除,且必须计数上报
// ==========================================

use crate::domain::job::{DatedJob, DueStamp, JobRecord};
use crate::engine::date_parser::DueDateParser;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 无法解析的到期时间
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnparseableDue {
    pub job_id: String,
    pub raw: String,
}

/// 筛选剔除报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    pub input_count: usize,
    pub kept_count: usize,
    pub before_reference: Vec<String>,      // 早于基准时间（job_id）
    pub missing_due: Vec<String>,           // 到期时间缺失（job_id）
    pub unparseable_due: Vec<UnparseableDue>, // 到期时间无法解析
}

impl FilterReport {
    pub fn excluded_count(&self) -> usize {
        self.before_reference.len() + self.missing_due.len() + self.unparseable_due.len()
    }
}

/// 筛选结果
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub kept: Vec<DatedJob>,
    pub report: FilterReport,
}

// ==========================================
// DateFilter - 日期筛选引擎
// ==========================================
pub struct DateFilter {
    parser: DueDateParser,
}

impl DateFilter {
    pub fn new(parser: DueDateParser) -> Self {
        Self { parser }
    }

    /// 按基准时间筛选
    ///
    /// 保留 due >= reference,保持输入顺序。
    pub fn filter(&self, jobs: &[JobRecord], reference: NaiveDateTime) -> FilterOutcome {
        let mut kept = Vec::with_capacity(jobs.len());
        let mut report = FilterReport {
            input_count: jobs.len(),
            ..Default::default()
        };

        for job in jobs {
            let due_at = match &job.due {
                DueStamp::At(at) => *at,
                DueStamp::Raw(raw) => match self.parser.parse(raw) {
                    Some(at) => at,
                    None => {
                        report.unparseable_due.push(UnparseableDue {
                            job_id: job.job_id.clone(),
                            raw: raw.clone(),
                        });
                        continue;
                    }
                },
                DueStamp::Missing => {
                    report.missing_due.push(job.job_id.clone());
                    continue;
                }
            };

            if due_at < reference {
                debug!(job_id = %job.job_id, %due_at, "早于基准时间,剔除");
                report.before_reference.push(job.job_id.clone());
                continue;
            }

            kept.push(DatedJob {
                job: job.clone(),
                due_at,
            });
        }

        report.kept_count = kept.len();

        if !report.missing_due.is_empty() {
            warn!(
                count = report.missing_due.len(),
                "到期时间缺失的作业已剔除: {:?}",
                report.missing_due
            );
        }
        if !report.unparseable_due.is_empty() {
            warn!(
                count = report.unparseable_due.len(),
                "到期时间无法解析的作业已剔除: {:?}",
                report.unparseable_due
            );
        }

        FilterOutcome { kept, report }
    }
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::new(DueDateParser::default())
    }
}
