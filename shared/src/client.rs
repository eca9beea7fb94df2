//! API 客户端
//!
//! 所有视图通过 `ApiClient` 访问远端 API：
//! - 统一拼接 URL 与查询参数
//! - 为需要认证的请求添加 `Authorization: Token <token>`
//! - 统一拦截 401：调用注册的登出回调并返回 `ApiError::Unauthorized`

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::protocol::{
    ApiRequest, ImportReservationsRequest, ListPoolsRequest, ListReservationsRequest,
    LoginRequest, StatisticsRequest,
};
use crate::session::Session;
use crate::{
    AUTH_SCHEME, Credentials, DeleteTarget, HEADER_AUTHORIZATION, NewReservation,
    Pool, Reservation, ReservationUpload, StatisticsSnapshot,
};
use chrono::{DateTime, Utc};
use std::rc::Rc;

#[cfg(test)]
mod tests;

type UnauthorizedHook = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct ApiClient<C> {
    http: C,
    base_url: String,
    token: Option<String>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(http: C, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: None,
            on_unauthorized: None,
        }
    }

    /// 以当前会话的 URL 与 token 创建客户端
    pub fn from_session(http: C, session: &Session) -> Self {
        let mut client = Self::new(http, &session.api_base_url);
        client.token = session.token.clone();
        client
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 注册 401 回调（前端用于派发登出）
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &[(&'static str, String)]) -> String {
        let mut url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&encode_query_value(value));
        }
        url
    }

    /// 构建并发送请求，返回原始响应
    ///
    /// 需要认证而没有 token 时直接视为 401。
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> ApiResult<HttpResponse> {
        let url = self.url(R::PATH, &request.query());
        let mut req = HttpRequest::new(&url, R::METHOD).with_body(request.body()?);
        for (key, value) in request.headers() {
            req = req.with_header(key, &value);
        }

        if R::AUTHENTICATED {
            let Some(token) = self.token.as_deref() else {
                self.unauthorized(&url);
                return Err(ApiError::Unauthorized);
            };
            req = req.with_header(HEADER_AUTHORIZATION, &format!("{} {}", AUTH_SCHEME, token));
        }

        log::debug!("{} {}", R::METHOD.as_str(), url);
        let response = self.http.send(req).await.inspect_err(|e| {
            log::warn!("{} {} failed: {}", R::METHOD.as_str(), url, e);
        })?;

        if R::AUTHENTICATED && response.status == 401 {
            self.unauthorized(&url);
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    /// 发送请求并按端点语义解码
    pub async fn call<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let response = self.execute(request).await?;
        R::decode(response)
    }

    fn unauthorized(&self, url: &str) {
        log::warn!("Unauthorized response from {}, ending session", url);
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    // --- Endpoints ---

    /// 登录，成功时返回 token
    pub async fn login(&self, credentials: Credentials) -> ApiResult<String> {
        self.call(&LoginRequest(credentials)).await
    }

    pub async fn list_pools(&self) -> ApiResult<Vec<Pool>> {
        self.call(&ListPoolsRequest).await
    }

    pub async fn create_reservation(&self, reservation: &NewReservation) -> ApiResult<()> {
        self.call(reservation).await
    }

    pub async fn list_reservations(&self, start: DateTime<Utc>) -> ApiResult<Vec<Reservation>> {
        self.call(&ListReservationsRequest { start }).await
    }

    /// 批量导入，返回服务端原始文本
    pub async fn import_reservations(&self, upload: ReservationUpload) -> ApiResult<String> {
        self.call(&ImportReservationsRequest(upload)).await
    }

    pub async fn cancel_reservation(&self, id: u64) -> ApiResult<()> {
        self.call(&DeleteTarget { id }).await
    }

    pub async fn statistics(&self, start: DateTime<Utc>) -> ApiResult<StatisticsSnapshot> {
        self.call(&StatisticsRequest { start }).await
    }
}

/// 查询参数只会包含时间戳，按 RFC 3986 转义保留字符
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b':' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
