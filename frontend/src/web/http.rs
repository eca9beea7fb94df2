//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现 `poolman_shared::http::HttpClient`。

use async_trait::async_trait;
use poolman_shared::ApiError;
use poolman_shared::error::ApiResult;
use poolman_shared::http::{HttpClient, HttpRequest, HttpResponse, MultipartFile, RequestBody};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData, Headers, Request, RequestInit, Response};

/// fetch 层错误，统一转换为 `ApiError::Network`
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("{0}")]
    RequestBuildFailed(String),
    #[error("{0}")]
    NetworkError(String),
    #[error("{0}")]
    ResponseReadFailed(String),
    #[error("Could not read file: {0}")]
    FileReadFailed(String),
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// 取出 JS 异常的可读文本，如 `TypeError: Failed to fetch`
fn js_error_text(value: JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.to_string());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn multipart_body(file: &MultipartFile) -> Result<FormData, HttpError> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(file.content.as_slice()));
    let blob = Blob::new_with_u8_array_sequence(&parts)
        .map_err(|e| HttpError::RequestBuildFailed(js_error_text(e)))?;
    let form = FormData::new().map_err(|e| HttpError::RequestBuildFailed(js_error_text(e)))?;
    form.append_with_blob_and_filename(&file.field, &blob, &file.file_name)
        .map_err(|e| HttpError::RequestBuildFailed(js_error_text(e)))?;
    Ok(form)
}

fn build_request(req: &HttpRequest) -> Result<Request, HttpError> {
    let headers = Headers::new().map_err(|e| HttpError::RequestBuildFailed(js_error_text(e)))?;
    for (key, value) in &req.headers {
        headers
            .set(key, value)
            .map_err(|e| HttpError::RequestBuildFailed(js_error_text(e)))?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());

    match &req.body {
        RequestBody::Empty => {}
        RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
        // 浏览器自动生成 multipart boundary 与 Content-Type
        RequestBody::Multipart(file) => opts.set_body(&multipart_body(file)?.into()),
    }

    Request::new_with_str_and_init(&req.url, &opts)
        .map_err(|e| HttpError::RequestBuildFailed(js_error_text(e)))
}

async fn read_text(response: &Response) -> Result<String, HttpError> {
    let promise = response
        .text()
        .map_err(|e| HttpError::ResponseReadFailed(js_error_text(e)))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| HttpError::ResponseReadFailed(js_error_text(e)))?;
    Ok(text.as_string().unwrap_or_default())
}

async fn fetch(req: HttpRequest) -> Result<HttpResponse, HttpError> {
    let request = build_request(&req)?;
    let window = web_sys::window()
        .ok_or_else(|| HttpError::NetworkError("window is not available".to_string()))?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| HttpError::NetworkError(js_error_text(e)))?;
    let response: Response = value
        .dyn_into()
        .map_err(|e| HttpError::ResponseReadFailed(js_error_text(e)))?;

    Ok(HttpResponse {
        status: response.status(),
        body: read_text(&response).await?,
    })
}

/// 浏览器 fetch 客户端
#[derive(Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        Ok(fetch(req).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_read_failure_is_named() {
        let err: ApiError = HttpError::FileReadFailed("NotReadableError".to_string()).into();
        assert_eq!(
            err,
            ApiError::Network("Could not read file: NotReadableError".to_string())
        );
    }
}
