// ==========================================
// 养护作业优先级系统 - 导入层
// ==========================================
// 职责: 外部文件 → 作业记录 / 能力对照表 / 区域映射表
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod inspector;
pub mod job_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::JobFieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, ParsedSheet, UniversalFileParser};
pub use inspector::{CapabilityFileInspection, FileInspector, JobFileInspection};
pub use job_importer::JobImporter;
