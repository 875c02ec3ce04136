// ==========================================
// 养护作业优先级系统 - 数据加载器
// ==========================================
// 职责: 读取作业文件、能力对照表、区域映射表
// 红线: 类别不可识别 / 主键缺失 → 整批失败（不静默丢弃）
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::capability::CapabilityTable;
use crate::domain::job::JobRecord;
use crate::engine::area::AreaMapper;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::JobFieldMapper;
use crate::importer::file_parser::{ParsedSheet, UniversalFileParser};
use std::path::Path;
use tracing::{info, warn};

pub struct JobImporter<'c> {
    config: &'c PipelineConfig,
}

impl<'c> JobImporter<'c> {
    pub fn new(config: &'c PipelineConfig) -> Self {
        Self { config }
    }

    /// 读取表格并校验必需列
    fn parse_with_columns(
        &self,
        path: &Path,
        sheet: Option<String>,
        required: &[&str],
    ) -> ImportResult<ParsedSheet> {
        let sheet_data = UniversalFileParser::new(sheet).parse(path)?;

        let missing = sheet_data.missing_columns(required);
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                file: path.display().to_string(),
                columns: missing,
            });
        }

        Ok(sheet_data)
    }

    /// 加载作业记录
    pub fn load_jobs<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<JobRecord>> {
        let path = path.as_ref();
        let columns = &self.config.job_columns;
        let sheet = self.parse_with_columns(path, None, &columns.required())?;

        let mapper = JobFieldMapper::new(columns.clone());
        let jobs = sheet
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                // 表头为第 1 行
                let raw = mapper.map_to_raw_job(row, idx + 2);
                JobRecord::from_raw(raw).map_err(ImportError::from)
            })
            .collect::<ImportResult<Vec<_>>>()?;

        info!(path = %path.display(), count = jobs.len(), "作业数据加载完成");
        Ok(jobs)
    }

    /// 加载能力对照表
    ///
    /// 代码为空的行跳过；重复代码后写覆盖并告警；空描述记为 None。
    pub fn load_capability_table<P: AsRef<Path>>(&self, path: P) -> ImportResult<CapabilityTable> {
        let path = path.as_ref();
        let columns = &self.config.capability_columns;
        let sheet = self.parse_with_columns(
            path,
            self.config.capability_sheet.clone(),
            &[columns.code.as_str(), columns.descriptor.as_str()],
        )?;

        let mut table = CapabilityTable::new();
        let mut duplicates = Vec::new();
        let mut skipped = 0usize;

        for row in &sheet.rows {
            let code = match row.get(&columns.code).map(|c| c.trim()) {
                Some(code) if !code.is_empty() => code.to_string(),
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            let descriptor = row
                .get(&columns.descriptor)
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());

            if table.insert(&code, descriptor).is_some() {
                duplicates.push(code);
            }
        }

        if !duplicates.is_empty() {
            warn!(
                count = duplicates.len(),
                "能力对照表存在重复代码,以最后一条为准: {:?}",
                duplicates
            );
        }
        if skipped > 0 {
            warn!(skipped, "能力对照表中代码为空的行已跳过");
        }
        info!(path = %path.display(), entries = table.len(), "能力对照表加载完成");

        Ok(table)
    }

    /// 加载区域映射表
    pub fn load_area_mapper<P: AsRef<Path>>(&self, path: P) -> ImportResult<AreaMapper> {
        let path = path.as_ref();
        let columns = &self.config.area_columns;
        let sheet = self.parse_with_columns(
            path,
            None,
            &[columns.lga.as_str(), columns.area.as_str()],
        )?;

        let rows = sheet.rows.iter().filter_map(|row| {
            let lga = row.get(&columns.lga)?.clone();
            let area = row.get(&columns.area)?.clone();
            Some((lga, area))
        });
        let mapper = AreaMapper::from_rows(rows);

        info!(path = %path.display(), entries = mapper.len(), "区域映射表加载完成");
        Ok(mapper)
    }
}
