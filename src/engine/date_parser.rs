// ==========================================
// 养护作业优先级系统 - 到期时间解析器
// ==========================================
// 主格式: dd/mm/yyyy hh:mm:ss AM/PM
// 兜底格式: 由配置给出,按顺序尝试
// 单元格格式: Excel 日期单元格的文本形式,始终最后尝试
// ==========================================

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// 主格式（例: 01/07/2024 11:26:45 AM）
pub const PRIMARY_DATE_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

/// Excel 日期单元格转文本时使用的格式（与配置无关,解析时总是接受）
pub const CELL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 默认格式列表（主格式在前）
pub fn default_date_formats() -> Vec<String> {
    [
        PRIMARY_DATE_FORMAT,
        "%d/%m/%Y %I:%M %p",    // 01/07/2024 11:26 AM
        "%d/%m/%y %I:%M:%S %p", // 01/07/24 11:26:45 AM
        "%d/%m/%y %I:%M %p",    // 01/07/24 11:26 AM
        "%d/%m/%Y",             // 01/07/2024
        "%d/%m/%y",             // 01/07/24
        "%Y-%m-%d %H:%M:%S",    // 2024-07-01 11:26:45
        "%Y-%m-%d %H:%M",       // 2024-07-01 11:26
        "%Y-%m-%d",             // 2024-07-01
    ]
    .iter()
    .map(|f| f.to_string())
    .collect()
}

// ==========================================
// DueDateParser
// ==========================================
#[derive(Debug, Clone)]
pub struct DueDateParser {
    formats: Vec<String>,
}

impl DueDateParser {
    /// 使用给定格式列表构造（空列表回退到主格式）
    pub fn new(formats: Vec<String>) -> Self {
        let formats = if formats.is_empty() {
            vec![PRIMARY_DATE_FORMAT.to_string()]
        } else {
            formats
        };
        Self { formats }
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// 解析时间文本
    ///
    /// 纯日期格式解析为当日 00:00:00。配置格式均不匹配时再按
    /// CELL_DATETIME_FORMAT 解析。
    ///
    /// # 返回
    /// - Some(NaiveDateTime): 任一格式匹配
    /// - None: 全部格式均不匹配
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        self.formats
            .iter()
            .find_map(|fmt| Self::parse_with(value, fmt))
            .or_else(|| Self::parse_with(value, CELL_DATETIME_FORMAT))
    }

    fn parse_with(value: &str, fmt: &str) -> Option<NaiveDateTime> {
        let parsed = if Self::has_time_fields(fmt) {
            NaiveDateTime::parse_from_str(value, fmt).ok()?
        } else {
            NaiveDate::parse_from_str(value, fmt)
                .ok()?
                .and_hms_opt(0, 0, 0)?
        };

        // %Y 也会接受两位年份（"24" → 0024）,交给 %y 格式处理
        if fmt.contains("%Y") && parsed.year() < 1000 {
            return None;
        }

        Some(parsed)
    }

    fn has_time_fields(fmt: &str) -> bool {
        ["%H", "%I", "%M", "%S", "%T", "%R"]
            .iter()
            .any(|token| fmt.contains(token))
    }
}

impl Default for DueDateParser {
    fn default() -> Self {
        Self::new(default_date_formats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_primary_format() {
        let parser = DueDateParser::default();
        assert_eq!(
            parser.parse("01/07/2024 11:26:45 PM"),
            Some(at(2024, 7, 1, 23, 26, 45))
        );
    }

    #[test]
    fn test_fallback_formats() {
        let parser = DueDateParser::default();
        assert_eq!(parser.parse("01/07/2024 11:26 AM"), Some(at(2024, 7, 1, 11, 26, 0)));
        assert_eq!(parser.parse("01/07/24 11:26 AM"), Some(at(2024, 7, 1, 11, 26, 0)));
        assert_eq!(parser.parse("10/10/2024"), Some(at(2024, 10, 10, 0, 0, 0)));
        assert_eq!(parser.parse("10/10/24"), Some(at(2024, 10, 10, 0, 0, 0)));
        assert_eq!(parser.parse("2024-07-01 11:26:45"), Some(at(2024, 7, 1, 11, 26, 45)));
        assert_eq!(parser.parse("2024-07-01"), Some(at(2024, 7, 1, 0, 0, 0)));
    }

    #[test]
    fn test_unparseable() {
        let parser = DueDateParser::default();
        assert_eq!(parser.parse("not a date"), None);
        assert_eq!(parser.parse(""), None);
        assert_eq!(parser.parse("32/13/2024"), None);
    }

    #[test]
    fn test_primary_only_rejects_fallback_text() {
        let parser = DueDateParser::new(vec![PRIMARY_DATE_FORMAT.to_string()]);
        assert!(parser.parse("2024-07-01").is_none());
        assert!(parser.parse("01/07/2024 09:00:00 AM").is_some());
    }

    #[test]
    fn test_cell_format_accepted_without_configuration() {
        let parser = DueDateParser::new(vec![PRIMARY_DATE_FORMAT.to_string()]);
        assert_eq!(
            parser.parse("2024-11-01 09:30:00"),
            Some(at(2024, 11, 1, 9, 30, 0))
        );
    }

    #[test]
    fn test_empty_format_list_falls_back_to_primary() {
        let parser = DueDateParser::new(Vec::new());
        assert_eq!(parser.formats(), &[PRIMARY_DATE_FORMAT.to_string()]);
    }
}
