use crate::date::query_timestamp;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpResponse, MultipartFile, RequestBody};
use crate::{
    Credentials, DeleteTarget, HEADER_ACCEPT, NewReservation, Pool, PoolList, Reservation, ReservationList,
    ReservationUpload, StatisticsSnapshot,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Status handling lives in `decode`, so every endpoint states its own success codes.
/// 401 never reaches `decode` for authenticated requests: `ApiClient` intercepts it.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response;
    /// The URL path (with the trailing slash the server routes expect).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request carries the session token.
    const AUTHENTICATED: bool = true;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        Ok(RequestBody::Empty)
    }

    fn decode(response: HttpResponse) -> ApiResult<Self::Response>;
}

/// 非 2xx 统一转换为 `ApiError::Status`
fn expect_success(response: &HttpResponse) -> ApiResult<()> {
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status {
            status: response.status,
            body: response.body.clone(),
        })
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange credentials for a session token
#[derive(Debug, Clone)]
pub struct LoginRequest(pub Credentials);

impl ApiRequest for LoginRequest {
    type Response = String;
    const PATH: &'static str = "/auth/";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(&self.0)
    }

    fn decode(response: HttpResponse) -> ApiResult<String> {
        match response.status {
            200 => {
                // 服务端返回 JSON 字符串 "abc123"，去掉引号；兼容裸 token
                let token = serde_json::from_str::<String>(&response.body)
                    .unwrap_or_else(|_| response.body.trim().trim_matches('"').to_string());
                if token.is_empty() {
                    Err(ApiError::Decode("empty token".to_string()))
                } else {
                    Ok(token)
                }
            }
            404 => Err(ApiError::InvalidCredentials),
            _ => {
                expect_success(&response)?;
                Err(ApiError::Decode(format!(
                    "unexpected login status {}",
                    response.status
                )))
            }
        }
    }
}

/// List all pools
#[derive(Debug, Clone, Copy)]
pub struct ListPoolsRequest;

impl ApiRequest for ListPoolsRequest {
    type Response = Vec<Pool>;
    const PATH: &'static str = "/pools/";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn decode(response: HttpResponse) -> ApiResult<Vec<Pool>> {
        expect_success(&response)?;
        Ok(response.json::<PoolList>()?.pools)
    }
}

/// Create a reservation (201 on success, 409 on conflict)
impl ApiRequest for NewReservation {
    type Response = ();
    const PATH: &'static str = "/reservations/";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(self)
    }

    fn decode(response: HttpResponse) -> ApiResult<()> {
        match response.status {
            201 => Ok(()),
            409 => Err(ApiError::Conflict),
            status => Err(ApiError::Status {
                status,
                body: response.body,
            }),
        }
    }
}

/// Reservations starting at or after `start`
#[derive(Debug, Clone, Copy)]
pub struct ListReservationsRequest {
    pub start: DateTime<Utc>,
}

impl ApiRequest for ListReservationsRequest {
    type Response = Vec<Reservation>;
    const PATH: &'static str = "/reservations/";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("start", query_timestamp(self.start))]
    }

    fn decode(response: HttpResponse) -> ApiResult<Vec<Reservation>> {
        expect_success(&response)?;
        Ok(response.json::<ReservationList>()?.reservations)
    }
}

/// Bulk import from a file; the server answers with free text
#[derive(Debug, Clone)]
pub struct ImportReservationsRequest(pub ReservationUpload);

impl ImportReservationsRequest {
    pub const FIELD: &'static str = "reservations";
}

impl ApiRequest for ImportReservationsRequest {
    type Response = String;
    const PATH: &'static str = "/reservations/";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![(HEADER_ACCEPT, "application/json, */*".to_string())]
    }

    fn body(&self) -> ApiResult<RequestBody> {
        Ok(RequestBody::Multipart(MultipartFile {
            field: Self::FIELD.to_string(),
            file_name: Self::FIELD.to_string(),
            content: self.0.content.clone(),
        }))
    }

    // 不区分状态码，原样返回文本
    fn decode(response: HttpResponse) -> ApiResult<String> {
        Ok(response.body)
    }
}

/// Cancel a reservation, id travels in the body
impl ApiRequest for DeleteTarget {
    type Response = ();
    const PATH: &'static str = "/reservations/";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(self)
    }

    fn decode(response: HttpResponse) -> ApiResult<()> {
        expect_success(&response)
    }
}

/// Usage ranking since `start`
#[derive(Debug, Clone, Copy)]
pub struct StatisticsRequest {
    pub start: DateTime<Utc>,
}

impl ApiRequest for StatisticsRequest {
    type Response = StatisticsSnapshot;
    const PATH: &'static str = "/stats/";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("start", query_timestamp(self.start))]
    }

    fn decode(response: HttpResponse) -> ApiResult<StatisticsSnapshot> {
        expect_success(&response)?;
        if response.body.trim().is_empty() {
            return Ok(StatisticsSnapshot::default());
        }
        response.json::<StatisticsSnapshot>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_login_strips_quotes() {
        assert_eq!(
            LoginRequest::decode(response(200, "\"abc123\"")).unwrap(),
            "abc123"
        );
        assert_eq!(LoginRequest::decode(response(200, "abc123")).unwrap(), "abc123");
        assert!(matches!(
            LoginRequest::decode(response(200, "\"\"")),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_login_status_mapping() {
        assert_eq!(
            LoginRequest::decode(response(404, "\"Login failed\"")),
            Err(ApiError::InvalidCredentials)
        );
        assert_eq!(
            LoginRequest::decode(response(400, "Incorrect request body")),
            Err(ApiError::Status {
                status: 400,
                body: "Incorrect request body".to_string()
            })
        );
    }

    #[test]
    fn test_pool_list_defaults() {
        let body = r#"{"pools":[{"pool_id":"s7n-vm1","displayName":"VM 1","maximumCount":4}]}"#;
        let pools = ListPoolsRequest::decode(response(200, body)).unwrap();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].display_name, "VM 1");
        assert_eq!(pools[0].description, "");
        assert!(pools[0].enabled);
    }

    #[test]
    fn test_reservation_list_missing_key_is_empty() {
        let list = ListReservationsRequest::decode(response(200, "{}")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_statistics_defaults_to_empty() {
        let snapshot = StatisticsRequest::decode(response(200, "{}")).unwrap();
        assert_eq!(snapshot, StatisticsSnapshot::default());

        let body = r#"{"topReservations":[{"pool_id":"s7n-vm1","total_slots":15},{}]}"#;
        let snapshot = StatisticsRequest::decode(response(200, body)).unwrap();
        assert_eq!(snapshot.most_used[0].pool_label(), "s7n-vm1");
        assert_eq!(snapshot.most_used[1].pool_label(), "unknown");
        assert_eq!(snapshot.most_used[1].slots(), 0);
        assert!(snapshot.least_used.is_empty());
    }

    #[test]
    fn test_import_returns_text_for_any_status() {
        assert_eq!(
            ImportReservationsRequest::decode(response(400, "Incorrect file")).unwrap(),
            "Incorrect file"
        );
    }
}
