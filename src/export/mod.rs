// ==========================================
// 养护作业优先级系统 - 导出层
// ==========================================
// 职责: 排序结果 → Excel / CSV / JSON 文件
// ==========================================

pub mod error;
pub mod writer;

pub use error::{ExportError, ExportResult};
pub use writer::{
    export, order_for_output, summary_path, CsvExporter, JsonExporter, OutputCell, OutputTable,
    XlsxExporter, HIGH_SPEED_ZONE_HEADER, JOBS_SHEET, OUTPUT_HEADER, SUMMARY_SHEET,
};
