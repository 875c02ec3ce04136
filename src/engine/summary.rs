// ==========================================
// 养护作业优先级系统 - 汇总统计
// ==========================================
// 职责: 优先级分布汇总、批次统计指标、常用查询
// 红线: 只读,不改变任何作业字段
// ==========================================

use crate::domain::job::PrioritizedJob;
use crate::domain::types::JobCategory;
use crate::engine::date_filter::FilterReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 优先级分布
// ==========================================

/// 单个优先级的汇总行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritySummaryRow {
    pub priority: i32,
    pub job_count: usize,
    pub categories: Vec<JobCategory>, // 按首次出现顺序去重
}

/// 按优先级汇总（升序,-1 在最前）
pub fn priority_summary(jobs: &[PrioritizedJob]) -> Vec<PrioritySummaryRow> {
    let mut grouped: BTreeMap<i32, PrioritySummaryRow> = BTreeMap::new();

    for job in jobs {
        let row = grouped
            .entry(job.priority)
            .or_insert_with(|| PrioritySummaryRow {
                priority: job.priority,
                job_count: 0,
                categories: Vec::new(),
            });
        row.job_count += 1;
        if !row.categories.contains(&job.job.category) {
            row.categories.push(job.job.category);
        }
    }

    grouped.into_values().collect()
}

// ==========================================
// 批次统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_jobs: usize,
    pub can_do: usize,
    pub cannot_do: usize,
    pub needs_check: usize,
    pub high_speed_zone_jobs: usize,
    pub hazard_jobs: usize,
    pub repair_jobs: usize,
    pub survey_jobs: usize,
    pub excluded_before_reference: usize,
    pub excluded_missing_due: usize,
    pub excluded_unparseable_due: usize,
}

impl SummaryStatistics {
    pub fn from_jobs(jobs: &[PrioritizedJob], filter: &FilterReport) -> Self {
        let count_category = |category: JobCategory| {
            jobs.iter().filter(|j| j.job.category == category).count()
        };

        Self {
            total_jobs: jobs.len(),
            can_do: jobs.iter().filter(|j| j.can_do_internally).count(),
            cannot_do: jobs.iter().filter(|j| j.cannot_do_flag).count(),
            needs_check: jobs.iter().filter(|j| j.capability_check_flag).count(),
            high_speed_zone_jobs: jobs
                .iter()
                .filter(|j| j.job.high_speed_zone == Some(true))
                .count(),
            hazard_jobs: count_category(JobCategory::Hazard),
            repair_jobs: count_category(JobCategory::Repair),
            survey_jobs: count_category(JobCategory::Survey),
            excluded_before_reference: filter.before_reference.len(),
            excluded_missing_due: filter.missing_due.len(),
            excluded_unparseable_due: filter.unparseable_due.len(),
        }
    }

    /// 指标列表（i18n 键, 数值）,导出时按当前语言翻译
    pub fn metrics(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("summary.total_jobs", self.total_jobs),
            ("summary.can_do", self.can_do),
            ("summary.cannot_do", self.cannot_do),
            ("summary.needs_check", self.needs_check),
            ("summary.high_speed_zone_jobs", self.high_speed_zone_jobs),
            ("summary.hazard_jobs", self.hazard_jobs),
            ("summary.repair_jobs", self.repair_jobs),
            ("summary.survey_jobs", self.survey_jobs),
            ("summary.excluded_before_reference", self.excluded_before_reference),
            ("summary.excluded_missing_due", self.excluded_missing_due),
            ("summary.excluded_unparseable_due", self.excluded_unparseable_due),
        ]
    }
}

// ==========================================
// 常用查询
// ==========================================

/// 单类别统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: JobCategory,
    pub total: usize,
    pub can_do: usize,
    pub cannot_do: usize,
    pub needs_check: usize,
}

/// 排序结果的只读视图
pub struct PrioritizedBatch<'a> {
    jobs: &'a [PrioritizedJob],
}

impl<'a> PrioritizedBatch<'a> {
    pub fn new(jobs: &'a [PrioritizedJob]) -> Self {
        Self { jobs }
    }

    /// 优先级在 [1, max_priority] 内的作业,按优先级升序
    pub fn top(&self, max_priority: i32) -> Vec<&'a PrioritizedJob> {
        let mut top: Vec<&PrioritizedJob> = self
            .jobs
            .iter()
            .filter(|j| j.priority >= 1 && j.priority <= max_priority)
            .collect();
        top.sort_by_key(|j| j.priority);
        top
    }

    pub fn cannot_do(&self) -> Vec<&'a PrioritizedJob> {
        self.jobs.iter().filter(|j| j.cannot_do_flag).collect()
    }

    pub fn needs_check(&self) -> Vec<&'a PrioritizedJob> {
        self.jobs.iter().filter(|j| j.capability_check_flag).collect()
    }

    pub fn category_breakdown(&self) -> Vec<CategoryBreakdown> {
        JobCategory::ALL
            .iter()
            .map(|&category| {
                let of_category: Vec<&PrioritizedJob> = self
                    .jobs
                    .iter()
                    .filter(|j| j.job.category == category)
                    .collect();
                let can_do = of_category.iter().filter(|j| j.can_do_internally).count();
                CategoryBreakdown {
                    category,
                    total: of_category.len(),
                    can_do,
                    cannot_do: of_category.len() - can_do,
                    needs_check: of_category
                        .iter()
                        .filter(|j| j.capability_check_flag)
                        .count(),
                }
            })
            .collect()
    }
}
