//! PCOIP Pool Manager 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `poolman_shared`: 领域模型、API 客户端与各视图的状态机
//! - `web::router`: hash 路由服务与登录守卫
//! - `auth`: 会话状态与持久化
//! - `components`: UI 组件层

mod api;
mod auth;
pub mod config;
mod components {
    pub mod layout;
    pub mod login;
    pub mod notification;
    pub mod pools;
    mod reservation_dialog;
    pub mod reservations;
    pub mod statistics;
}

// 原生 Web API 封装模块
pub(crate) mod web {
    pub mod file;
    pub mod http;
    pub mod logger;
    pub mod router;
    pub mod storage;
}

use crate::auth::AuthContext;
use crate::components::layout::MainView;
use crate::components::login::LoginPage;
use crate::components::pools::PoolsPage;
use crate::components::reservations::ReservationsPage;
use crate::components::statistics::StatisticsPage;
use crate::config::AppConfig;
use crate::web::router::{Router, RouterOutlet};

use leptos::prelude::*;
use poolman_shared::route::AppRoute;

pub use crate::web::logger::init as init_logger;

fn login_view() -> AnyView {
    view! { <LoginPage /> }.into_any()
}

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Pools | AppRoute::NotFound => view! { <PoolsPage /> }.into_any(),
        AppRoute::Reservations => view! { <ReservationsPage /> }.into_any(),
        AppRoute::Statistics => view! { <StatisticsPage /> }.into_any(),
    };
    view! { <MainView>{page}</MainView> }.into_any()
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. 在渲染前恢复会话
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 2. 登录状态信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet login=login_view matcher=route_matcher />
        </Router>
    }
}
