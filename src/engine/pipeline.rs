// ==========================================
// 养护作业优先级系统 - 引擎编排器
// ==========================================
// 用途: 按顺序执行 日期筛选 → 能力判定 → 优先级排序
// 红线: 各阶段完整消费输入后才进入下一阶段；阶段间无共享可变状态
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::capability::CapabilityTable;
use crate::domain::job::{JobRecord, PrioritizedJob};
use crate::domain::types::TieGranularity;
use crate::engine::capability::CapabilityResolver;
use crate::engine::date_filter::{DateFilter, FilterReport};
use crate::engine::date_parser::DueDateParser;
use crate::engine::error::EngineResult;
use crate::engine::priority::PriorityRanker;
use crate::engine::summary::{priority_summary, PrioritySummaryRow, SummaryStatistics};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

// ==========================================
// PipelineResult - 运行结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub reference: NaiveDateTime,
    pub jobs: Vec<PrioritizedJob>, // 保持筛选后的输入顺序
    pub filter_report: FilterReport,
    pub statistics: SummaryStatistics,
    pub priority_summary: Vec<PrioritySummaryRow>,
}

// ==========================================
// PriorityPipeline - 引擎编排器
// ==========================================
pub struct PriorityPipeline {
    filter: DateFilter,
    ranker: PriorityRanker,
}

impl PriorityPipeline {
    pub fn new(parser: DueDateParser, granularity: TieGranularity) -> Self {
        Self {
            filter: DateFilter::new(parser),
            ranker: PriorityRanker::new(granularity),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            DueDateParser::new(config.date_formats.clone()),
            config.tie_granularity,
        )
    }

    /// 执行完整流程
    ///
    /// # 参数
    /// - jobs: 已加载的作业记录（类别已校验）
    /// - table: 能力对照表
    /// - reference: 基准时间（已在边界解析）
    ///
    /// # 返回
    /// - Err: 批次级输入错误（如作业缺少能力代码）
    #[instrument(skip(self, jobs, table), fields(jobs = jobs.len(), capability_entries = table.len()))]
    pub fn run(
        &self,
        jobs: &[JobRecord],
        table: &CapabilityTable,
        reference: NaiveDateTime,
    ) -> EngineResult<PipelineResult> {
        // ==========================================
        // 步骤1: 日期筛选
        // ==========================================
        let filtered = self.filter.filter(jobs, reference);
        info!(
            kept = filtered.report.kept_count,
            excluded = filtered.report.excluded_count(),
            "步骤1: 日期筛选完成"
        );

        // ==========================================
        // 步骤2: 能力判定
        // ==========================================
        let resolved = CapabilityResolver::new(table).resolve_all(&filtered.kept)?;

        // ==========================================
        // 步骤3: 优先级排序
        // ==========================================
        let ranked = self.ranker.rank(&resolved);

        let statistics = SummaryStatistics::from_jobs(&ranked, &filtered.report);
        let summary = priority_summary(&ranked);
        info!(
            total = statistics.total_jobs,
            cannot_do = statistics.cannot_do,
            needs_check = statistics.needs_check,
            "步骤3: 优先级分配完成"
        );

        Ok(PipelineResult {
            reference,
            jobs: ranked,
            filter_report: filtered.report,
            statistics,
            priority_summary: summary,
        })
    }
}

impl Default for PriorityPipeline {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}
