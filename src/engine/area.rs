// ==========================================
// 养护作业优先级系统 - 区域映射
// ==========================================
// 职责: 按 LGA（地方政府辖区）为作业补充所属区域
// 规则: LGA 去除全部空白并转大写后匹配；映射表重复时保留首条
// ==========================================

use crate::domain::job::JobRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

/// 标准化 LGA 文本
///
/// # 返回
/// - None: 清洗后为空
pub fn normalize_lga(value: &str) -> Option<String> {
    let cleaned: String = value
        .split_whitespace()
        .collect::<String>()
        .to_uppercase();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// 区域映射报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaReport {
    pub matched: usize,
    pub unmatched: usize,
    pub unmatched_lgas: BTreeMap<String, usize>, // 标准化 LGA → 作业数
    pub area_counts: BTreeMap<String, usize>,    // 区域 → 作业数
}

// ==========================================
// AreaMapper
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AreaMapper {
    mapping: HashMap<String, String>,
    duplicates: Vec<String>,
}

impl AreaMapper {
    /// 由 (LGA, 区域) 行构造
    ///
    /// LGA 为空的行丢弃；重复 LGA 保留首条并记录。
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut mapper = AreaMapper::default();

        for (lga, area) in rows {
            let Some(key) = normalize_lga(&lga) else {
                continue;
            };
            if mapper.mapping.contains_key(&key) {
                if !mapper.duplicates.contains(&key) {
                    mapper.duplicates.push(key);
                }
                continue;
            }
            mapper.mapping.insert(key, area.trim().to_string());
        }

        if !mapper.duplicates.is_empty() {
            warn!(
                count = mapper.duplicates.len(),
                "区域映射表存在重复 LGA,保留首条: {:?}",
                mapper.duplicates
            );
        }

        mapper
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// 重复的 LGA（标准化后）
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn lookup(&self, lga: &str) -> Option<&str> {
        normalize_lga(lga).and_then(|key| self.mapping.get(&key).map(String::as_str))
    }

    /// 为作业补充区域
    pub fn assign(&self, jobs: Vec<JobRecord>) -> (Vec<JobRecord>, AreaReport) {
        let mut report = AreaReport::default();

        let jobs = jobs
            .into_iter()
            .map(|mut job| {
                let area = job.lga.as_deref().and_then(|lga| self.lookup(lga));
                match area {
                    Some(area) => {
                        report.matched += 1;
                        *report.area_counts.entry(area.to_string()).or_insert(0) += 1;
                        job.area = Some(area.to_string());
                    }
                    None => {
                        report.unmatched += 1;
                        if let Some(key) = job.lga.as_deref().and_then(normalize_lga) {
                            *report.unmatched_lgas.entry(key).or_insert(0) += 1;
                        }
                        job.area = None;
                    }
                }
                job
            })
            .collect();

        if report.unmatched > 0 {
            warn!(
                unmatched = report.unmatched,
                distinct = report.unmatched_lgas.len(),
                "部分作业无区域映射"
            );
        }
        info!(
            matched = report.matched,
            areas = report.area_counts.len(),
            "区域映射完成"
        );

        (jobs, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::DueStamp;
    use crate::domain::types::JobCategory;

    fn job(id: &str, lga: Option<&str>) -> JobRecord {
        let mut job = JobRecord::new(id, JobCategory::Repair, Some("X".to_string()), DueStamp::Missing);
        job.lga = lga.map(String::from);
        job
    }

    #[test]
    fn test_normalize_lga() {
        assert_eq!(normalize_lga(" Blue  Mountains\t"), Some("BLUEMOUNTAINS".to_string()));
        assert_eq!(normalize_lga("   "), None);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let mapper = AreaMapper::from_rows(vec![
            ("Penrith".to_string(), "West".to_string()),
            ("PENRITH ".to_string(), "North".to_string()),
            ("".to_string(), "Nowhere".to_string()),
        ]);

        assert_eq!(mapper.len(), 1);
        assert_eq!(mapper.lookup("penrith"), Some("West"));
        assert_eq!(mapper.duplicates(), &["PENRITH".to_string()]);
    }

    #[test]
    fn test_assign_reports_unmatched() {
        let mapper = AreaMapper::from_rows(vec![("Blue Mountains".to_string(), "West".to_string())]);
        let (jobs, report) = mapper.assign(vec![
            job("J1", Some("blue mountains")),
            job("J2", Some("Hornsby")),
            job("J3", None),
        ]);

        assert_eq!(jobs[0].area.as_deref(), Some("West"));
        assert_eq!(jobs[1].area, None);
        assert_eq!(report.matched, 1);
        assert_eq!(report.unmatched, 2);
        assert_eq!(report.unmatched_lgas.get("HORNSBY"), Some(&1));
        assert_eq!(report.area_counts.get("West"), Some(&1));
    }
}
