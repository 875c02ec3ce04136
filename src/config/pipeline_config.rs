// ==========================================
// 养护作业优先级系统 - 运行配置
// ==========================================
// 存储: JSON 文件（所有字段可省略,省略即取默认值）
// ==========================================

use crate::domain::types::TieGranularity;
use crate::engine::date_parser::default_date_formats;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

// ==========================================
// 列名映射
// ==========================================

/// 作业文件列名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobColumns {
    pub job_id: String,
    pub category: String,
    pub location: String,
    pub road: String,
    pub capability_code: String,
    pub due: String,
    pub lga: String,
    pub high_speed_zone: String,
}

impl JobColumns {
    /// 必需列（LGA、高速路段为可选列）
    pub fn required(&self) -> Vec<&str> {
        vec![
            self.job_id.as_str(),
            self.category.as_str(),
            self.location.as_str(),
            self.road.as_str(),
            self.capability_code.as_str(),
            self.due.as_str(),
        ]
    }
}

impl Default for JobColumns {
    fn default() -> Self {
        Self {
            job_id: "JobID".to_string(),
            category: "Parent Job Type".to_string(),
            location: "Location".to_string(),
            road: "Road".to_string(),
            capability_code: "Standard Job".to_string(),
            due: "Due".to_string(),
            lga: "LGA".to_string(),
            high_speed_zone: "high_speed_zone".to_string(),
        }
    }
}

/// 能力对照表列名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityColumns {
    pub code: String,
    pub descriptor: String,
}

impl Default for CapabilityColumns {
    fn default() -> Self {
        Self {
            code: "Job Code".to_string(),
            descriptor: "Capability Internal".to_string(),
        }
    }
}

/// 区域映射表列名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaColumns {
    pub lga: String,
    pub area: String,
}

impl Default for AreaColumns {
    fn default() -> Self {
        Self {
            lga: "LGA".to_string(),
            area: "Area".to_string(),
        }
    }
}

// ==========================================
// PipelineConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub job_columns: JobColumns,
    pub capability_columns: CapabilityColumns,
    pub area_columns: AreaColumns,

    /// 能力对照表所在工作表（None = 第一个工作表）
    pub capability_sheet: Option<String>,

    /// 到期时间格式（首个为主格式,其余按顺序兜底）
    ///
    /// Excel 日期单元格以 CELL_DATETIME_FORMAT 文本交付,无需列在此处。
    pub date_formats: Vec<String>,

    pub tie_granularity: TieGranularity,

    /// 导出时是否附带汇总
    pub include_summary: bool,

    /// 报表语言（en / zh-CN）
    pub locale: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            job_columns: JobColumns::default(),
            capability_columns: CapabilityColumns::default(),
            area_columns: AreaColumns::default(),
            capability_sheet: None,
            date_formats: default_date_formats(),
            tie_granularity: TieGranularity::Exact,
            include_summary: true,
            locale: "en".to_string(),
        }
    }
}

impl PipelineConfig {
    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
