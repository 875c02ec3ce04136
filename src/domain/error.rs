// ==========================================
// 养护作业优先级系统 - 记录校验错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 作业记录构造错误
///
/// 结构性违规（类别不在封闭集合内、主键缺失）使整个批次失败，不做猜测。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("作业类别无法识别 (作业 {job_id}): {value}（仅支持 HAZARD/REPAIR/SURVEY）")]
    UnknownCategory { job_id: String, value: String },

    #[error("必填字段缺失 (行 {row}): {field}")]
    MissingField { row: usize, field: String },
}
