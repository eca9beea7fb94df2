//! 文件输入读取

use poolman_shared::ReservationUpload;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use super::http::HttpError;

/// 读取 `<input type="file">` 中选中的第一个文件，未选择时返回 `Ok(None)`
pub async fn read_selected(input: &HtmlInputElement) -> Result<Option<ReservationUpload>, HttpError> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| HttpError::FileReadFailed(format!("{:?}", e)))?;
    Ok(Some(ReservationUpload {
        content: js_sys::Uint8Array::new(&buffer).to_vec(),
    }))
}
