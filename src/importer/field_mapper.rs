// ==========================================
// 养护作业优先级系统 - 字段映射器实现
// ==========================================
// 职责: 源列 → 作业中间结构（列名由配置给出）
// 规则: 未映射的列原样放入 extra 透传
// ==========================================

use crate::config::JobColumns;
use crate::domain::job::RawJobRecord;
use std::collections::{BTreeMap, HashMap};

pub struct JobFieldMapper {
    columns: JobColumns,
}

impl JobFieldMapper {
    pub fn new(columns: JobColumns) -> Self {
        Self { columns }
    }

    /// 行 → RawJobRecord
    ///
    /// # 参数
    /// - row_number: 源文件行号（表头为第 1 行）
    pub fn map_to_raw_job(&self, row: &HashMap<String, String>, row_number: usize) -> RawJobRecord {
        let mapped = [
            &self.columns.job_id,
            &self.columns.category,
            &self.columns.capability_code,
            &self.columns.due,
            &self.columns.location,
            &self.columns.road,
            &self.columns.lga,
            &self.columns.high_speed_zone,
        ];

        let extra: BTreeMap<String, String> = row
            .iter()
            .filter(|(key, _)| !mapped.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        RawJobRecord {
            row_number,
            job_id: self.get_string(row, &self.columns.job_id),
            category: self.get_string(row, &self.columns.category),
            capability_code: self.get_string(row, &self.columns.capability_code),
            due: self.get_string(row, &self.columns.due),
            location: self.get_string(row, &self.columns.location),
            road: self.get_string(row, &self.columns.road),
            lga: self.get_string(row, &self.columns.lga),
            high_speed_zone: self.get_string(row, &self.columns.high_speed_zone),
            extra,
        }
    }

    /// 提取字符串字段（空白视为缺失）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        row.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_default_columns() {
        let mapper = JobFieldMapper::new(JobColumns::default());
        let raw = mapper.map_to_raw_job(
            &row(&[
                ("JobID", "J001"),
                ("Parent Job Type", "HAZARD"),
                ("Standard Job", "RM01"),
                ("Due", "01/11/2024 09:00:00 AM"),
                ("Location", "Main St"),
                ("Road", ""),
                ("Crew", "North"),
                ("high_speed_zone", "true"),
            ]),
            2,
        );

        assert_eq!(raw.row_number, 2);
        assert_eq!(raw.job_id.as_deref(), Some("J001"));
        assert_eq!(raw.capability_code.as_deref(), Some("RM01"));
        assert_eq!(raw.road, None);
        assert_eq!(raw.lga, None);
        assert_eq!(raw.high_speed_zone.as_deref(), Some("true"));
        assert_eq!(raw.extra.get("Crew").map(String::as_str), Some("North"));
        assert!(!raw.extra.contains_key("JobID"));
    }

    #[test]
    fn test_map_custom_columns() {
        let columns = JobColumns {
            due: "Due Date".to_string(),
            ..JobColumns::default()
        };
        let mapper = JobFieldMapper::new(columns);
        let raw = mapper.map_to_raw_job(&row(&[("Due Date", "2024-11-01")]), 3);

        assert_eq!(raw.due.as_deref(), Some("2024-11-01"));
        assert!(raw.extra.is_empty());
    }
}
