// ==========================================
// 养护作业优先级系统 - 能力判定引擎
// ==========================================
// 职责: 按能力分类代码查对照表,判定 能否自营 / 是否需人工核实
// 输入: 已通过日期筛选的作业 + 能力对照表
// 输出: 附带能力字段的作业
// ==========================================
// 判定表（按优先顺序,四分支互斥且穷尽）:
// 1) 代码未登记         → 可做,无需核实
// 2) 描述为 "none"      → 不可做（唯一的不可做路径）
// 3) 描述含 '<' 或 '>'  → 可做,需人工核实
// 4) 其他描述           → 可做,无需核实
// ==========================================

use crate::domain::capability::{CapabilityResolution, CapabilityTable};
use crate::domain::job::{DatedJob, ResolvedJob};
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, info};

// ==========================================
// CapabilityClass - 能力描述分类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityClass<'a> {
    Missing,
    NoCapability,
    Conditional(&'a str),
    Capable(&'a str),
}

impl<'a> CapabilityClass<'a> {
    /// 对查表结果分类
    ///
    /// 已登记但描述为空的条目按 "none" 处理（源表中空单元格即 "None"）。
    pub fn classify(entry: Option<Option<&'a str>>) -> Self {
        match entry {
            None => CapabilityClass::Missing,
            Some(None) => CapabilityClass::NoCapability,
            Some(Some(desc)) => {
                let trimmed = desc.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                    CapabilityClass::NoCapability
                } else if trimmed.contains('<') || trimmed.contains('>') {
                    CapabilityClass::Conditional(trimmed)
                } else {
                    CapabilityClass::Capable(trimmed)
                }
            }
        }
    }

    pub fn resolution(self) -> CapabilityResolution {
        match self {
            CapabilityClass::Missing => CapabilityResolution {
                can_do_internally: true,
                needs_capability_check: false,
            },
            CapabilityClass::NoCapability => CapabilityResolution {
                can_do_internally: false,
                needs_capability_check: false,
            },
            CapabilityClass::Conditional(_) => CapabilityResolution {
                can_do_internally: true,
                needs_capability_check: true,
            },
            CapabilityClass::Capable(_) => CapabilityResolution {
                can_do_internally: true,
                needs_capability_check: false,
            },
        }
    }
}

// ==========================================
// CapabilityResolver - 能力判定引擎
// ==========================================
pub struct CapabilityResolver<'t> {
    table: &'t CapabilityTable,
}

impl<'t> CapabilityResolver<'t> {
    pub fn new(table: &'t CapabilityTable) -> Self {
        Self { table }
    }

    /// 判定单个能力代码
    ///
    /// # 返回
    /// - Err(MissingCapabilityCode): 作业本身未填写代码（输入校验错误）
    pub fn resolve(&self, job_id: &str, code: Option<&str>) -> EngineResult<CapabilityResolution> {
        let code = code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| EngineError::MissingCapabilityCode {
                job_id: job_id.to_string(),
            })?;

        let class = CapabilityClass::classify(self.table.get(code));
        debug!(job_id, code, ?class, "能力判定");
        Ok(class.resolution())
    }

    /// 批量判定（逐条独立,无跨记录依赖）
    pub fn resolve_all(&self, jobs: &[DatedJob]) -> EngineResult<Vec<ResolvedJob>> {
        let resolved = jobs
            .iter()
            .map(|dated| {
                let resolution =
                    self.resolve(&dated.job.job_id, dated.job.capability_code.as_deref())?;
                Ok(ResolvedJob {
                    job: dated.job.clone(),
                    due_at: dated.due_at,
                    can_do_internally: resolution.can_do_internally,
                    needs_capability_check: resolution.needs_capability_check,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let cannot_do = resolved.iter().filter(|r| !r.can_do_internally).count();
        let needs_check = resolved.iter().filter(|r| r.needs_capability_check).count();
        info!(
            total = resolved.len(),
            cannot_do, needs_check, "能力判定完成"
        );

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CapabilityTable {
        vec![
            ("X1", Some("None".to_string())),
            ("X2", Some("<5 crew".to_string())),
            ("X3", Some("Crew A".to_string())),
            ("X4", None),
            ("X5", Some(">2 trucks".to_string())),
            ("X6", Some("NONE".to_string())),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_missing_code_is_doable() {
        let table = table();
        let resolver = CapabilityResolver::new(&table);
        let r = resolver.resolve("J", Some("ZZ9")).unwrap();
        assert!(r.can_do_internally);
        assert!(!r.needs_capability_check);
    }

    #[test]
    fn test_none_descriptor_cannot_do() {
        let table = table();
        let resolver = CapabilityResolver::new(&table);
        for code in ["X1", "X6"] {
            let r = resolver.resolve("J", Some(code)).unwrap();
            assert!(!r.can_do_internally, "{}", code);
            assert!(!r.needs_capability_check, "{}", code);
        }
    }

    #[test]
    fn test_comparison_descriptor_needs_check() {
        let table = table();
        let resolver = CapabilityResolver::new(&table);
        for code in ["X2", "X5"] {
            let r = resolver.resolve("J", Some(code)).unwrap();
            assert!(r.can_do_internally);
            assert!(r.needs_capability_check);
        }
    }

    #[test]
    fn test_plain_descriptor_capable() {
        let table = table();
        let resolver = CapabilityResolver::new(&table);
        let r = resolver.resolve("J", Some("X3")).unwrap();
        assert_eq!(
            r,
            CapabilityResolution {
                can_do_internally: true,
                needs_capability_check: false,
            }
        );
    }

    #[test]
    fn test_blank_descriptor_treated_as_none() {
        assert_eq!(CapabilityClass::classify(Some(None)), CapabilityClass::NoCapability);
        assert_eq!(CapabilityClass::classify(Some(Some("  "))), CapabilityClass::NoCapability);
    }

    #[test]
    fn test_none_as_substring_is_not_none() {
        // 只有完整等于 "none" 才是不可做
        assert_eq!(
            CapabilityClass::classify(Some(Some("None required"))),
            CapabilityClass::Capable("None required")
        );
    }

    #[test]
    fn test_missing_job_code_is_error() {
        let table = table();
        let resolver = CapabilityResolver::new(&table);
        assert_eq!(
            resolver.resolve("J9", None),
            Err(EngineError::MissingCapabilityCode {
                job_id: "J9".to_string()
            })
        );
        assert!(resolver.resolve("J9", Some("  ")).is_err());
    }

    #[test]
    fn test_empty_table_all_doable() {
        let table = CapabilityTable::new();
        let resolver = CapabilityResolver::new(&table);
        let r = resolver.resolve("J", Some("X1")).unwrap();
        assert!(r.can_do_internally);
    }
}
