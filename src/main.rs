// ==========================================
// 养护作业优先级系统 - 命令行入口
// ==========================================
// 用法:
//   job-priority run --jobs <文件> --capability <文件> --reference <日期>
//                    [--areas <文件>] [--output <文件>] [--config <文件>]
//   job-priority validate --jobs <文件> [--capability <文件>] [--config <文件>]
//
// 环境变量:
//   JOB_PRIORITY_CONFIG      配置文件路径（--config 优先）
//   JOB_PRIORITY_LOG_FORMAT  json → JSON 行日志
//   RUST_LOG                 日志级别
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use job_priority::engine::{DueDateParser, PrioritizedBatch};
use job_priority::export;
use job_priority::i18n::{self, t, t_with_args};
use job_priority::importer::{FileInspector, JobImporter};
use job_priority::{logging, PipelineConfig, PriorityPipeline};
use std::collections::HashMap;
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "prioritized_jobs_output.xlsx";

fn main() -> Result<()> {
    match std::env::var("JOB_PRIORITY_LOG_FORMAT").as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_default();
    let options = parse_options(args)?;

    let config = load_config(&options)?;
    i18n::set_locale(&config.locale);

    tracing::info!(version = job_priority::VERSION, command = %command, "{}", job_priority::APP_NAME);

    match command.as_str() {
        "run" => run(&options, &config),
        "validate" => validate(&options, &config),
        _ => bail!("{}", t("cli.usage")),
    }
}

/// `--key value` 参数表
fn parse_options<I: Iterator<Item = String>>(mut args: I) -> Result<HashMap<String, String>> {
    let mut options = HashMap::new();
    while let Some(flag) = args.next() {
        let key = flag
            .strip_prefix("--")
            .ok_or_else(|| anyhow!("{}", t("cli.usage")))?
            .to_string();
        let value = args
            .next()
            .ok_or_else(|| anyhow!(t_with_args("cli.missing_argument", &[("name", flag.as_str())])))?;
        options.insert(key, value);
    }
    Ok(options)
}

fn required<'a>(options: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    options
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| {
            let flag = format!("--{name}");
            anyhow!(t_with_args("cli.missing_argument", &[("name", flag.as_str())]))
        })
}

fn load_config(options: &HashMap<String, String>) -> Result<PipelineConfig> {
    let path = options
        .get("config")
        .cloned()
        .or_else(|| std::env::var("JOB_PRIORITY_CONFIG").ok());

    match path {
        Some(path) => Ok(PipelineConfig::load(&path)?),
        None => Ok(PipelineConfig::default()),
    }
}

fn run(options: &HashMap<String, String>, config: &PipelineConfig) -> Result<()> {
    let reference_text = required(options, "reference")?;
    let reference = DueDateParser::new(config.date_formats.clone())
        .parse(reference_text)
        .ok_or_else(|| anyhow!(t_with_args("cli.invalid_reference", &[("value", reference_text)])))?;

    let importer = JobImporter::new(config);
    let mut jobs = importer
        .load_jobs(required(options, "jobs")?)
        .context("加载作业文件失败")?;
    let table = importer
        .load_capability_table(required(options, "capability")?)
        .context("加载能力对照表失败")?;

    if let Some(areas) = options.get("areas") {
        let mapper = importer.load_area_mapper(areas).context("加载区域映射表失败")?;
        let (mapped, report) = mapper.assign(jobs);
        tracing::info!(matched = report.matched, unmatched = report.unmatched, "区域映射完成");
        jobs = mapped;
    }

    let result = PriorityPipeline::from_config(config).run(&jobs, &table, reference)?;
    for row in PrioritizedBatch::new(&result.jobs).category_breakdown() {
        tracing::info!(
            category = %row.category,
            total = row.total,
            can_do = row.can_do,
            cannot_do = row.cannot_do,
            needs_check = row.needs_check,
            "类别统计"
        );
    }

    let output = options
        .get("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let written = export::export(&result, &output, config.include_summary)?;

    for path in &written {
        tracing::info!(path = %path.display(), "已写出");
    }
    let count = result.jobs.len().to_string();
    let output_text = output.display().to_string();
    println!(
        "{}",
        t_with_args(
            "cli.run_complete",
            &[("count", count.as_str()), ("path", output_text.as_str())],
        )
    );
    Ok(())
}

fn validate(options: &HashMap<String, String>, config: &PipelineConfig) -> Result<()> {
    let inspector = FileInspector::new(config);

    let jobs = inspector.inspect_jobs(required(options, "jobs")?)?;
    println!("{}", serde_json::to_string_pretty(&jobs)?);

    if let Some(capability) = options.get("capability") {
        let table = inspector.inspect_capability(capability)?;
        println!("{}", serde_json::to_string_pretty(&table)?);
    }

    if !jobs.is_importable() {
        bail!("{}", t("cli.validate_failed"));
    }
    println!("{}", t("cli.validate_ok"));
    Ok(())
}
