// ==========================================
// 养护作业优先级系统 - 领域类型定义
// ==========================================
// 红线: 作业类别为封闭集合,未知类别在构造时拒绝
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 作业类别 (Job Category)
// ==========================================
// 顺序: Hazard < Repair < Survey (rank 越小越优先)
// 序列化格式: SCREAMING_SNAKE_CASE (与源文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobCategory {
    Hazard, // 隐患处置
    Repair, // 维修
    Survey, // 巡检
}

impl JobCategory {
    /// 全部类别（按优先级顺序）
    pub const ALL: [JobCategory; 3] = [JobCategory::Hazard, JobCategory::Repair, JobCategory::Survey];

    /// 类别优先级（固定映射，不随运行配置变化）
    ///
    /// HAZARD=1, REPAIR=2, SURVEY=3
    pub fn rank(self) -> u8 {
        match self {
            JobCategory::Hazard => 1,
            JobCategory::Repair => 2,
            JobCategory::Survey => 3,
        }
    }

    /// 标准化标签
    pub fn label(self) -> &'static str {
        match self {
            JobCategory::Hazard => "HAZARD",
            JobCategory::Repair => "REPAIR",
            JobCategory::Survey => "SURVEY",
        }
    }

    /// 从源文件文本解析类别（忽略大小写与首尾空白）
    ///
    /// 源数据中的 "REPAIRS" 视为 REPAIR 的别名。
    ///
    /// # 返回
    /// - Some(JobCategory): 识别成功
    /// - None: 不在封闭集合内（调用方负责报错）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "HAZARD" => Some(JobCategory::Hazard),
            "REPAIR" | "REPAIRS" => Some(JobCategory::Repair),
            "SURVEY" => Some(JobCategory::Survey),
            _ => None,
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 同级判定粒度 (Tie Granularity)
// ==========================================
// Exact: 类别 + 日期 + 时间 完全一致才同级（默认）
// Day:   类别 + 日期 一致即同级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TieGranularity {
    #[default]
    Exact,
    Day,
}

impl fmt::Display for TieGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieGranularity::Exact => write!(f, "EXACT"),
            TieGranularity::Day => write!(f, "DAY"),
        }
    }
}
