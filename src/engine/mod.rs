// ==========================================
// 养护作业优先级系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎（纯内存计算,不做文件读写）
// 流程: 日期筛选 → 能力判定 → 优先级排序
// ==========================================

pub mod area;
pub mod capability;
pub mod date_filter;
pub mod date_parser;
pub mod error;
pub mod pipeline;
pub mod priority;
pub mod summary;

// 重导出核心引擎
pub use area::{AreaMapper, AreaReport};
pub use capability::{CapabilityClass, CapabilityResolver};
pub use date_filter::{DateFilter, FilterOutcome, FilterReport, UnparseableDue};
pub use date_parser::{DueDateParser, CELL_DATETIME_FORMAT, PRIMARY_DATE_FORMAT};
pub use error::{EngineError, EngineResult};
pub use pipeline::{PipelineResult, PriorityPipeline};
pub use priority::{PriorityRanker, RankKey, CANNOT_DO_PRIORITY};
pub use summary::{
    priority_summary, CategoryBreakdown, PrioritizedBatch, PrioritySummaryRow, SummaryStatistics,
};
