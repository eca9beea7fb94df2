//! 时间工具模块
//!
//! - `Clock`: 当前时间来源，测试中可替换为固定时间
//! - 表单 `datetime-local` 输入的解析与格式化
//! - 查询参数中的时间戳格式
//! - `lenient`: 兼容服务端多种日期格式的 serde 模块

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// `<input type="datetime-local">` 使用的格式
const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// 序列化到服务端时使用的格式
const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// =========================================================
// Clock
// =========================================================

/// 当前时间来源
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// 系统时钟（浏览器中由 chrono 的 wasmbind 支持）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// =========================================================
// 格式转换
// =========================================================

/// 查询参数 `start=` 中使用的时间戳，例如 `2026-10-09T12:00:00Z`
pub fn query_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// 解析 `datetime-local` 输入框的值
///
/// 空字符串或格式错误时返回 None
pub fn parse_local_input(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, LOCAL_INPUT_FORMAT))
        .ok()
}

/// 格式化为 `datetime-local` 输入框可接受的值
pub fn format_local_input(value: &NaiveDateTime) -> String {
    value.format(LOCAL_INPUT_FORMAT).to_string()
}

/// 表格中显示的时间
pub fn format_display(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// 尽量宽松地解析服务端返回的日期
///
/// 带时区的值保留其本地墙上时间。
pub fn parse_lenient(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// serde 适配：序列化为 `%Y-%m-%dT%H:%M:%S`，反序列化接受多种格式
pub mod lenient {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(super::WIRE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_lenient(&raw)
            .ok_or_else(|| D::Error::custom(format!("unrecognized datetime: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 4, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_local_input_accepts_minutes_and_seconds() {
        assert_eq!(parse_local_input("2018-04-01T11:15"), Some(at(11, 15)));
        assert_eq!(parse_local_input("2018-04-01T11:15:00"), Some(at(11, 15)));
        assert_eq!(parse_local_input(""), None);
        assert_eq!(parse_local_input("tomorrow"), None);
        assert_eq!(format_local_input(&at(9, 5)), "2018-04-01T09:05");
    }

    #[test]
    fn test_lenient_accepts_server_formats() {
        assert_eq!(parse_lenient("2018-04-01 11:15:00+00:00"), Some(at(11, 15)));
        assert_eq!(parse_lenient("2018-04-01T11:15:00Z"), Some(at(11, 15)));
        assert_eq!(parse_lenient("2018-04-01T11:15:00"), Some(at(11, 15)));
        assert_eq!(
            parse_lenient("2018-04-01 11:15:00.250000"),
            Some(at(11, 15) + chrono::Duration::milliseconds(250))
        );
        assert_eq!(parse_lenient("01/04/2018"), None);
    }

    #[test]
    fn test_query_timestamp_is_utc_seconds() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap();
        assert_eq!(query_timestamp(now), "2026-10-16T08:30:00Z");
    }
}
