//! 视图的数据加载
//!
//! 每个视图持有一个 `DataSource` 和一个 `SourceState`，
//! 首次挂载以及变更成功后调用 `load` 重新拉取。

use crate::web::http::FetchClient;
use leptos::prelude::*;
use leptos::task::spawn_local;
use poolman_shared::source::DataSource;
use poolman_shared::{ApiClient, ApiError};
use std::rc::Rc;

pub type PoolApi = ApiClient<FetchClient>;

/// 一次加载的结果信号
pub struct SourceState<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl<T: Send + Sync + 'static> Clone for SourceState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for SourceState<T> {}

impl<T: Send + Sync + 'static> SourceState<T> {
    pub fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// 直接写入已获取的数据（如取消预约后的刷新结果）
    pub fn accept(&self, data: T) {
        self.data.try_set(Some(data));
        self.error.try_set(None);
    }

    /// 记录失败；401 已由客户端处理，不再提示
    pub fn fail(&self, error: ApiError) {
        if !error.is_unauthorized() {
            self.error.try_set(Some(error.to_string()));
        }
    }

    /// 拉取数据，不去重也不取消进行中的请求
    pub fn load<S>(self, source: Rc<S>)
    where
        S: DataSource<Output = T> + 'static,
    {
        self.loading.set(true);
        spawn_local(async move {
            match source.refresh().await {
                Ok(data) => self.accept(data),
                Err(e) => {
                    log::warn!("Loading failed: {}", e);
                    self.fail(e);
                }
            }
            // 视图可能已因登出卸载
            self.loading.try_set(false);
        });
    }
}
