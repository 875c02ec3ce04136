// ==========================================
// 优先级流程集成测试
// ==========================================
// 场景: 文件导入（CSV / Excel）→ 日期筛选 → 能力判定 → 优先级排序 → 导出
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use job_priority::engine::PRIMARY_DATE_FORMAT;
use job_priority::export::{export, order_for_output, JOBS_SHEET};
use job_priority::importer::{JobImporter, UniversalFileParser};
use job_priority::{JobCategory, PipelineConfig, PriorityPipeline, TieGranularity};
use test_helpers::*;

fn scenario_jobs() -> tempfile::NamedTempFile {
    job_file(&[
        "J1,HAZARD,Main St,A1,H1,09/10/2024 09:00:00 AM,Penrith",
        "J2,REPAIR,High St,B2,X1,12/10/2024 09:00:00 AM,Penrith",
        "J3,SURVEY,Low St,C3,X2,12/10/2024 09:00:00 AM,Blue Mountains",
        "J4,HAZARD,Main St,A1,H1,01/11/2024 12:00:00 AM,Penrith",
        "J5,HAZARD,Side St,D4,H2,01/11/2024 12:00:00 AM,Penrith",
        "J6,REPAIR,Back St,E5,R1,15/10/2024 10:00:00 AM,Penrith",
    ])
}

fn scenario_capability() -> tempfile::NamedTempFile {
    capability_file(&[
        ("X1", "None"),
        ("X2", "<5 crew"),
        ("H1", "Crew A"),
        ("R1", "Crew B"),
    ])
}

#[test]
fn test_scenario_priorities_from_files() {
    job_priority::logging::init_test();
    let config = PipelineConfig::default();
    let importer = JobImporter::new(&config);
    let jobs_file = scenario_jobs();
    let capability = scenario_capability();

    let jobs = importer.load_jobs(jobs_file.path()).unwrap();
    let table = importer.load_capability_table(capability.path()).unwrap();
    let result = PriorityPipeline::from_config(&config)
        .run(&jobs, &table, datetime(2024, 10, 10))
        .unwrap();

    let find = |id: &str| result.jobs.iter().find(|j| j.job.job_id == id);

    // J1 早于基准日被排除
    assert!(find("J1").is_none());
    assert_eq!(result.filter_report.before_reference, vec!["J1".to_string()]);

    let j2 = find("J2").unwrap();
    assert!(!j2.can_do_internally);
    assert_eq!(j2.priority, -1);
    assert!(j2.cannot_do_flag);
    assert!(!j2.capability_check_flag);

    let j3 = find("J3").unwrap();
    assert!(j3.can_do_internally);
    assert!(j3.capability_check_flag);

    // 同类别同到期 → 同优先级,且小于任何可做的 REPAIR 作业
    let j4 = find("J4").unwrap();
    let j5 = find("J5").unwrap();
    let j6 = find("J6").unwrap();
    assert_eq!(j4.priority, j5.priority);
    assert_eq!(j4.priority, 1);
    assert!(j4.priority < j6.priority);
    assert!(j6.priority < j3.priority);
    assert_eq!(j6.job.category, JobCategory::Repair);
}

#[test]
fn test_day_granularity_merges_same_day() {
    let config = PipelineConfig {
        tie_granularity: TieGranularity::Day,
        ..PipelineConfig::default()
    };
    let jobs_file = job_file(&[
        "A,HAZARD,x,y,H1,01/11/2024 09:00:00 AM,",
        "B,HAZARD,x,y,H1,01/11/2024 03:00:00 PM,",
        "C,HAZARD,x,y,H1,02/11/2024 09:00:00 AM,",
    ]);
    let capability = capability_file(&[("H1", "Crew A")]);
    let importer = JobImporter::new(&config);

    let jobs = importer.load_jobs(jobs_file.path()).unwrap();
    let table = importer.load_capability_table(capability.path()).unwrap();
    let result = PriorityPipeline::from_config(&config)
        .run(&jobs, &table, datetime(2024, 10, 1))
        .unwrap();

    let priorities: Vec<i32> = result.jobs.iter().map(|j| j.priority).collect();
    assert_eq!(priorities, vec![1, 1, 2]);
}

#[test]
fn test_area_mapping_and_csv_export() {
    let config = PipelineConfig::default();
    let importer = JobImporter::new(&config);
    let jobs_file = scenario_jobs();
    let capability = scenario_capability();
    let areas = write_csv(&["LGA,Area", "PENRITH,West", "BlueMountains,Mountains"]);

    let jobs = importer.load_jobs(jobs_file.path()).unwrap();
    let mapper = importer.load_area_mapper(areas.path()).unwrap();
    let (jobs, report) = mapper.assign(jobs);
    assert_eq!(report.unmatched, 0);

    let table = importer.load_capability_table(capability.path()).unwrap();
    let result = PriorityPipeline::from_config(&config)
        .run(&jobs, &table, datetime(2024, 10, 10))
        .unwrap();

    let ordered: Vec<i32> = order_for_output(&result.jobs).iter().map(|j| j.priority).collect();
    assert_eq!(ordered.last(), Some(&-1));
    assert!(ordered[..ordered.len() - 1].windows(2).all(|w| w[0] <= w[1]));

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("ranked.csv");
    let written = export(&result, &output, config.include_summary).unwrap();
    assert_eq!(written.len(), 2);

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    let j3 = rows.iter().find(|r| &r[1] == "J3").unwrap();
    assert_eq!(&j3[8], "Mountains");
}

#[test]
fn test_run_is_deterministic() {
    let config = PipelineConfig::default();
    let importer = JobImporter::new(&config);
    let jobs_file = scenario_jobs();
    let capability = scenario_capability();

    let jobs = importer.load_jobs(jobs_file.path()).unwrap();
    let table = importer.load_capability_table(capability.path()).unwrap();
    let pipeline = PriorityPipeline::from_config(&config);

    let first = pipeline.run(&jobs, &table, datetime(2024, 10, 10)).unwrap();
    let second = pipeline.run(&jobs, &table, datetime(2024, 10, 10)).unwrap();
    assert_eq!(first.jobs, second.jobs);
}

#[test]
fn test_excel_round_trip_keeps_passthrough_columns() {
    let at = |d: u32, h: u32| datetime(2024, 11, d) + chrono::Duration::hours(h as i64);
    let jobs_file = write_xlsx(&[(
        "Jobs",
        vec![
            ["JobID", "Parent Job Type", "Location", "Road", "Standard Job", "Due", "high_speed_zone", "Crew"]
                .into_iter()
                .map(Cell::Text)
                .collect(),
            vec![
                Cell::Text("J1"),
                Cell::Text("HAZARD"),
                Cell::Text("Main St"),
                Cell::Text("A1"),
                Cell::Text("H1"),
                Cell::Date(at(1, 9)),
                Cell::Text("true"),
                Cell::Text("North"),
            ],
            vec![
                Cell::Text("J2"),
                Cell::Text("REPAIR"),
                Cell::Text("High St"),
                Cell::Text("B2"),
                Cell::Text("X1"),
                Cell::Date(at(2, 0)),
                Cell::Text("no"),
                Cell::Text("South"),
            ],
        ],
    )]);
    let capability_file = write_xlsx(&[
        ("Sheet1", vec![vec![Cell::Text("Notes")]]),
        (
            "Sheet1 (2)",
            vec![
                vec![Cell::Text("Job Code"), Cell::Text("Capability Internal")],
                vec![Cell::Text("H1"), Cell::Text("Crew A")],
                vec![Cell::Text("X1"), Cell::Text("None")],
            ],
        ),
    ]);

    // 仅主格式: Excel 日期单元格不依赖 date_formats 配置
    let config = PipelineConfig {
        capability_sheet: Some("Sheet1 (2)".to_string()),
        date_formats: vec![PRIMARY_DATE_FORMAT.to_string()],
        ..PipelineConfig::default()
    };
    let importer = JobImporter::new(&config);
    let jobs = importer.load_jobs(jobs_file.path()).unwrap();
    let table = importer.load_capability_table(capability_file.path()).unwrap();
    let result = PriorityPipeline::from_config(&config)
        .run(&jobs, &table, datetime(2024, 10, 10))
        .unwrap();
    assert_eq!(result.jobs.len(), 2);
    assert_eq!(result.statistics.high_speed_zone_jobs, 1);

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("prioritized_jobs_output.xlsx");
    let written = export(&result, &output, config.include_summary).unwrap();
    assert_eq!(written, vec![output.clone()]);

    let sheet = UniversalFileParser::new(Some(JOBS_SHEET.to_string()))
        .parse(&output)
        .unwrap();
    assert!(sheet.headers.ends_with(&[
        "high_speed_zone".to_string(),
        "High_Speed_Zone_Flag".to_string(),
        "Crew".to_string(),
    ]));

    let j1 = &sheet.rows[0];
    assert_eq!(j1.get("JobID").map(String::as_str), Some("J1"));
    assert_eq!(j1.get("Priority").map(String::as_str), Some("1"));
    assert_eq!(j1.get("Due").map(String::as_str), Some("2024-11-01 09:00:00"));
    assert_eq!(j1.get("High_Speed_Zone_Flag").map(String::as_str), Some("true"));
    assert_eq!(j1.get("Crew").map(String::as_str), Some("North"));

    let j2 = &sheet.rows[1];
    assert_eq!(j2.get("Priority").map(String::as_str), Some("-1"));
    assert_eq!(j2.get("high_speed_zone").map(String::as_str), Some("false"));
    assert_eq!(j2.get("Crew").map(String::as_str), Some("South"));
}
