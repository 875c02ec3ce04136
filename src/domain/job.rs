// ==========================================
// 养护作业优先级系统 - 作业领域模型
// ==========================================
// 生命周期: 每次运行加载一次,依次经过 筛选 → 能力判定 → 排序,
//           导出后丢弃
// 红线: 透传字段（位置、道路等）对引擎不透明,原样携带
// ==========================================

use crate::domain::error::RecordError;
use crate::domain::types::JobCategory;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// RawJobRecord - 导入中间结构体
// ==========================================
// 用途: 文件解析 → 字段映射 → 此结构 → JobRecord
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawJobRecord {
    pub row_number: usize,
    pub job_id: Option<String>,
    pub category: Option<String>,
    pub capability_code: Option<String>,
    pub due: Option<String>,
    pub location: Option<String>,
    pub road: Option<String>,
    pub lga: Option<String>,
    pub high_speed_zone: Option<String>,
    pub extra: BTreeMap<String, String>,
}

// ==========================================
// DueStamp - 到期时间
// ==========================================
// 导入层可以交付已解析的时间,也可以交付原始文本（由筛选阶段解析）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DueStamp {
    Missing,
    Raw(String),
    At(NaiveDateTime),
}

impl DueStamp {
    /// 由可选文本构造（空白视为缺失）
    pub fn from_text(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => DueStamp::Raw(v.trim().to_string()),
            _ => DueStamp::Missing,
        }
    }

    /// 用于导出的文本形式
    pub fn display(&self) -> String {
        match self {
            DueStamp::Missing => String::new(),
            DueStamp::Raw(text) => text.clone(),
            DueStamp::At(at) => at.format("%d/%m/%Y %I:%M:%S %p").to_string(),
        }
    }
}

// ==========================================
// JobRecord - 作业记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    // ===== 主键 =====
    pub job_id: String,

    // ===== 排序维度 =====
    pub category: JobCategory,
    pub capability_code: Option<String>, // 能力分类代码（Standard Job）
    pub due: DueStamp,

    // ===== 透传字段 =====
    pub location: Option<String>,
    pub road: Option<String>,
    pub lga: Option<String>,
    pub area: Option<String>, // 区域映射阶段写入
    pub high_speed_zone: Option<bool>, // 限速 > 80 路段（源列可选）
    pub extra: BTreeMap<String, String>,
}

impl JobRecord {
    /// 构造作业记录（透传字段为空）
    pub fn new(
        job_id: impl Into<String>,
        category: JobCategory,
        capability_code: Option<String>,
        due: DueStamp,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            category,
            capability_code,
            due,
            location: None,
            road: None,
            lga: None,
            area: None,
            high_speed_zone: None,
            extra: BTreeMap::new(),
        }
    }

    /// 从导入中间结构构造,校验主键与类别
    ///
    /// # 返回
    /// - Ok(JobRecord): 类别已标准化
    /// - Err(RecordError): 主键/类别缺失或类别不在封闭集合内
    pub fn from_raw(raw: RawJobRecord) -> Result<Self, RecordError> {
        let job_id = raw
            .job_id
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| RecordError::MissingField {
                row: raw.row_number,
                field: "job_id".to_string(),
            })?;

        let category_text = raw
            .category
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| RecordError::MissingField {
                row: raw.row_number,
                field: "category".to_string(),
            })?;

        let category =
            JobCategory::parse(&category_text).ok_or_else(|| RecordError::UnknownCategory {
                job_id: job_id.clone(),
                value: category_text.clone(),
            })?;

        Ok(Self {
            job_id,
            category,
            capability_code: raw.capability_code.filter(|v| !v.trim().is_empty()),
            due: DueStamp::from_text(raw.due),
            location: raw.location,
            road: raw.road,
            lga: raw.lga,
            area: None,
            high_speed_zone: raw.high_speed_zone.as_deref().and_then(parse_flag),
            extra: raw.extra,
        })
    }
}

/// 源文件中的布尔标志（true/false、1/0、yes/no,忽略大小写）
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

// ==========================================
// DatedJob - 通过日期筛选的作业
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedJob {
    pub job: JobRecord,
    pub due_at: NaiveDateTime,
}

// ==========================================
// ResolvedJob - 已完成能力判定的作业
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedJob {
    pub job: JobRecord,
    pub due_at: NaiveDateTime,
    pub can_do_internally: bool,
    pub needs_capability_check: bool,
}

// ==========================================
// PrioritizedJob - 排序输出
// ==========================================
// 红线: priority == -1 当且仅当 cannot_do_flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizedJob {
    pub job: JobRecord,
    pub due_at: NaiveDateTime,
    pub can_do_internally: bool,
    pub needs_capability_check: bool,
    pub priority: i32,
    pub cannot_do_flag: bool,
    pub capability_check_flag: bool,
}
