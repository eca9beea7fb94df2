//! 预约相关的交互状态
//!
//! - `ReservationDialog`: 预约弹窗 `Closed -> Open -> Closed`
//! - `CancelConfirmation`: 取消确认 `Closed -> ConfirmOpen -> Closed`
//! - `ImportForm`: 批量导入文件
//!
//! 这些状态机不依赖 DOM，前端组件把它们放进信号里驱动界面。

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::source::DataSource;
use crate::{NewReservation, ReservationUpload};
use chrono::NaiveDateTime;


// =========================================================
// 预约弹窗
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

/// 弹窗中的表单字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    /// 自由输入，提交时解析为整数
    pub slot_count: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl ReservationForm {
    /// 设置开始时间时结束时间同步为相同值
    pub fn set_start(&mut self, start: Option<NaiveDateTime>) {
        self.start = start;
        self.end = start;
    }

    pub fn set_end(&mut self, end: Option<NaiveDateTime>) {
        self.end = end;
    }

    /// 只校验槽位数非空且为数字，以及起止时间已填写；上限由服务端校验
    pub fn to_request(&self, pool_id: &str) -> ApiResult<NewReservation> {
        let raw = self.slot_count.trim();
        if raw.is_empty() {
            return Err(ApiError::validation("Slot count is required"));
        }
        let slot_count = raw
            .parse::<u32>()
            .map_err(|_| ApiError::validation("Slot count must be a number"))?;
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(ApiError::validation("Start and end time are required"));
        };
        Ok(NewReservation {
            pool_id: pool_id.to_string(),
            slot_count,
            start_datetime: start,
            end_datetime: end,
        })
    }
}

/// 绑定到单个预约池的预约弹窗
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationDialog {
    pub pool_id: String,
    pub state: DialogState,
    pub form: ReservationForm,
    pub submitting: bool,
    /// 冲突、校验或请求错误的提示，弹窗保持打开
    pub message: Option<String>,
}

impl ReservationDialog {
    pub fn new(pool_id: impl Into<String>) -> Self {
        Self {
            pool_id: pool_id.into(),
            ..Default::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    /// 打开时重置表单
    pub fn open(&mut self) {
        self.state = DialogState::Open;
        self.form = ReservationForm::default();
        self.submitting = false;
        self.message = None;
    }

    pub fn close(&mut self) {
        self.state = DialogState::Closed;
        self.submitting = false;
    }

    /// 校验表单并进入提交中状态
    ///
    /// 校验失败时记录提示并返回 None；正在提交时也返回 None。
    pub fn begin_submit(&mut self) -> Option<NewReservation> {
        if self.submitting || !self.is_open() {
            return None;
        }
        match self.form.to_request(&self.pool_id) {
            Ok(request) => {
                self.submitting = true;
                self.message = None;
                Some(request)
            }
            Err(e) => {
                self.message = Some(e.to_string());
                None
            }
        }
    }

    /// 处理提交结果，返回 true 表示成功且弹窗已关闭，调用方应触发成功回调
    pub fn finish_submit(&mut self, result: ApiResult<()>) -> bool {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.close();
                true
            }
            Err(ApiError::Unauthorized) => {
                // 会话已由客户端结束
                self.close();
                false
            }
            Err(e) => {
                log::warn!("Reservation for pool {} failed: {}", self.pool_id, e);
                self.message = Some(e.to_string());
                false
            }
        }
    }
}

// =========================================================
// 取消确认
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelConfirmation {
    #[default]
    Closed,
    ConfirmOpen {
        current_id: u64,
    },
}

impl CancelConfirmation {
    pub fn request(&mut self, id: u64) {
        *self = CancelConfirmation::ConfirmOpen { current_id: id };
    }

    pub fn dismiss(&mut self) {
        *self = CancelConfirmation::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, CancelConfirmation::ConfirmOpen { .. })
    }

    pub fn pending_id(&self) -> Option<u64> {
        match self {
            CancelConfirmation::ConfirmOpen { current_id } => Some(*current_id),
            CancelConfirmation::Closed => None,
        }
    }

    /// 确认：关闭弹窗并取出待取消的 id
    pub fn accept(&mut self) -> Option<u64> {
        let id = self.pending_id();
        *self = CancelConfirmation::Closed;
        id
    }

    /// 确认并执行：一次 DELETE，成功后刷新一次列表
    ///
    /// 没有待取消的预约时不发送请求，返回 `Ok(None)`。
    pub async fn accept_and_cancel<C, S>(
        &mut self,
        client: &ApiClient<C>,
        source: &S,
    ) -> ApiResult<Option<S::Output>>
    where
        C: HttpClient,
        S: DataSource,
    {
        let Some(id) = self.accept() else {
            return Ok(None);
        };
        client.cancel_reservation(id).await?;
        log::info!("Reservation {} cancelled", id);
        source.refresh().await.map(Some)
    }
}

// =========================================================
// 批量导入
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportForm {
    pub open: bool,
    pub selected: Option<ReservationUpload>,
}

impl ImportForm {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.selected = None;
    }

    pub fn select(&mut self, upload: Option<ReservationUpload>) {
        self.selected = upload;
    }

    /// 唯一的客户端校验：必须已选择文件
    pub fn upload(&self) -> ApiResult<ReservationUpload> {
        self.selected
            .clone()
            .ok_or_else(|| ApiError::validation("No file selected!"))
    }

    /// 上传并返回服务端原始文本
    pub async fn submit<C: HttpClient>(&self, client: &ApiClient<C>) -> ApiResult<String> {
        let upload = self.upload()?;
        client.import_reservations(upload).await
    }
}
