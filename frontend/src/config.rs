//! 应用配置
//!
//! 构建时通过环境变量覆盖默认值：
//! - `POOLMAN_API_URL`: 后端地址
//! - `POOLMAN_LOG_LEVEL`: 日志级别 (`error`/`warn`/`info`/`debug`/`trace`)

use log::LevelFilter;
use poolman_shared::DEFAULT_API_URL;

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl AppConfig {
    /// 读取构建时环境变量，未设置或无法解析时使用默认值
    pub fn from_env() -> Self {
        Self::from_values(option_env!("POOLMAN_API_URL"), option_env!("POOLMAN_LOG_LEVEL"))
    }

    fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: api_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            log_level: log_level
                .and_then(|level| level.trim().parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }
}
