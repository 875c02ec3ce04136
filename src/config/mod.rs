// ==========================================
// 养护作业优先级系统 - 配置层
// ==========================================
// 职责: 列名映射、日期格式、同级粒度、导出选项
// 存储: JSON 配置文件（可选）
// ==========================================

pub mod pipeline_config;

// 重导出
pub use pipeline_config::{
    AreaColumns, CapabilityColumns, ConfigError, JobColumns, PipelineConfig,
};
