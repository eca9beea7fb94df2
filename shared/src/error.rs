use thiserror::Error;

// =========================================================
// 客户端错误类型
// =========================================================

/// 与 API 交互时可能出现的错误
///
/// 所有错误在 UI 边界终止：展示给用户，不重试，不持久化。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 网络失败，原样展示底层错误
    #[error("{0}")]
    Network(String),
    /// 401: 会话失效，已由客户端统一登出
    #[error("Session expired, please log in again")]
    Unauthorized,
    /// 登录接口返回 404
    #[error("Incorrect username or password")]
    InvalidCredentials,
    /// 409: 与已有预约冲突
    #[error("This reservation conflicts with existing reservations")]
    Conflict,
    /// 其它非成功状态码
    #[error("Request failed with status {status}")]
    Status { status: u16, body: String },
    /// 响应体解析失败
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// 客户端校验失败
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 对应的 HTTP 状态码（仅针对服务端返回的错误）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::InvalidCredentials => Some(404),
            ApiError::Conflict => Some(409),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Validation(_) => None,
        }
    }

    /// 401 已触发登出，视图无需再提示
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
