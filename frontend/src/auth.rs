//! 认证模块
//!
//! 会话是不可变值，通过 Context 在组件间共享；
//! 唯一的变更入口是 `AuthContext::dispatch`，它应用 reducer 并持久化。
//! 路由服务只通过注入的登录状态信号感知认证。

use crate::api::PoolApi;
use crate::config::AppConfig;
use crate::web::http::FetchClient;
use crate::web::storage::BrowserStorage;
use leptos::prelude::*;
use poolman_shared::session::{self, Session, SessionAction};
use poolman_shared::{ApiClient, ApiResult, Credentials};

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 当前会话（只读）
    pub state: ReadSignal<Session>,
    set_state: WriteSignal<Session>,
}

impl AuthContext {
    /// 在首次渲染前从 LocalStorage 恢复会话
    pub fn new(config: &AppConfig) -> Self {
        let restored = session::restore(&BrowserStorage, &config.api_url);
        if restored.is_logged_in() {
            log::info!("Restored session for {}", restored.api_base_url);
        }
        let (state, set_state) = signal(restored);
        Self { state, set_state }
    }

    /// 登录状态信号（注入路由服务）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(Session::is_logged_in))
    }

    /// 应用 action 并持久化新状态
    pub fn dispatch(&self, action: SessionAction) {
        match &action {
            SessionAction::LoginFinished(_) => log::info!("Session started"),
            SessionAction::LogoutFinished => log::info!("Session ended"),
        }
        self.set_state.update(|current| {
            let next = current.clone().reduce(action);
            if !session::persist(&BrowserStorage, &next) {
                log::warn!("Session could not be persisted");
            }
            *current = next;
        });
    }

    /// 以当前会话创建 API 客户端，401 时自动登出
    pub fn client(&self) -> PoolApi {
        let ctx = *self;
        self.state.with_untracked(|session| {
            ApiClient::from_session(FetchClient, session)
                .on_unauthorized(move || ctx.dispatch(SessionAction::LogoutFinished))
        })
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// 登录，成功后写入 token
pub async fn login(ctx: &AuthContext, credentials: Credentials) -> ApiResult<()> {
    let token = ctx.client().login(credentials).await?;
    ctx.dispatch(SessionAction::LoginFinished(token));
    Ok(())
}

/// 注销，路由出口会随登录状态切换到登录页
pub fn logout(ctx: &AuthContext) {
    ctx.dispatch(SessionAction::LogoutFinished);
}
