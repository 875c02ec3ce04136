// ==========================================
// 养护作业优先级系统 - 领域模型层
// ==========================================
// 职责: 定义作业记录、能力对照表、领域类型
// 红线: 不含文件读写逻辑,不含排序规则
// ==========================================

pub mod capability;
pub mod error;
pub mod job;
pub mod types;

// 重导出核心类型
pub use capability::{CapabilityResolution, CapabilityTable};
pub use error::RecordError;
pub use job::{DatedJob, DueStamp, JobRecord, PrioritizedJob, RawJobRecord, ResolvedJob};
pub use types::{JobCategory, TieGranularity};
