use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod client;
pub mod date;
pub mod error;
pub mod http;
pub mod pool_table;
pub mod protocol;
pub mod reservation;
pub mod route;
pub mod session;
pub mod source;
pub mod stats;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use session::{Session, SessionAction};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_ACCEPT: &str = "Accept";
pub const AUTH_SCHEME: &str = "Token";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 一组可预约的虚拟机槽位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub pool_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "maximumCount")]
    pub maximum_count: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// 服务端返回的预约记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: u64,
    pub pool_id: String,
    pub slot_count: u32,
    #[serde(with = "date::lenient")]
    pub start_datetime: NaiveDateTime,
    #[serde(with = "date::lenient")]
    pub end_datetime: NaiveDateTime,
}

/// 创建预约的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub pool_id: String,
    pub slot_count: u32,
    #[serde(with = "date::lenient")]
    pub start_datetime: NaiveDateTime,
    #[serde(with = "date::lenient")]
    pub end_datetime: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 取消预约时放在 DELETE 请求体中的目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTarget {
    pub id: u64,
}

/// 批量导入时上传的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationUpload {
    pub content: Vec<u8>,
}

/// 统计表中的一行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    #[serde(default)]
    pub pool_id: Option<String>,
    #[serde(default)]
    pub total_slots: Option<u32>,
}

impl UsageEntry {
    pub fn pool_label(&self) -> &str {
        self.pool_id.as_deref().unwrap_or("unknown")
    }

    pub fn slots(&self) -> u32 {
        self.total_slots.unwrap_or(0)
    }
}

/// 服务端按时间窗口计算的使用排行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    #[serde(rename = "topReservations", default)]
    pub most_used: Vec<UsageEntry>,
    #[serde(rename = "leastReservations", default)]
    pub least_used: Vec<UsageEntry>,
}

// 列表接口的外层包装

#[derive(Debug, Default, Deserialize)]
pub struct PoolList {
    #[serde(default)]
    pub pools: Vec<Pool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReservationList {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}
