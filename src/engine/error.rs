// ==========================================
// 养护作业优先级系统 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 记录级可兜底的问题（日期解析失败、能力代码未登记）不是错误
// ==========================================

use crate::domain::error::RecordError;
use thiserror::Error;

/// 引擎错误类型（批次级,终止本次运行）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("能力代码缺失 (作业 {job_id}): 作业记录未填写能力分类代码")]
    MissingCapabilityCode { job_id: String },

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
