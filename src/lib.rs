// ==========================================
// 养护作业优先级系统 - 核心库
// ==========================================
// 流程: 导入 → 日期筛选 → 能力判定 → 优先级排序 → 导出
// 系统定位: 批处理工具（每次运行独立,无持久化状态）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 结果文件
pub mod export;

// 配置层 - 列名映射与运行选项
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{JobCategory, TieGranularity};

// 领域实体
pub use domain::{CapabilityTable, DueStamp, JobRecord, PrioritizedJob};

// 引擎
pub use engine::{
    AreaMapper, CapabilityResolver, DateFilter, DueDateParser, PipelineResult, PriorityPipeline,
    PriorityRanker, CANNOT_DO_PRIORITY,
};

// 配置
pub use config::PipelineConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "养护作业优先级系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
