//! 路由服务模块 - 核心引擎
//!
//! 基于 `location.hash` 的路由，所有对 window.location 的操作都集中在此模块。
//! 守卫规则由 `GuardDecision` 给出，这里只负责监听、重定向和渲染。

use leptos::prelude::*;
use poolman_shared::route::{AppRoute, GuardDecision};
use wasm_bindgen::prelude::*;

/// 获取当前 hash 路径（不含 `#`）
fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// 替换当前历史记录（用于重定向）
fn replace_hash(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().replace(&format!("#{}", path));
    }
}

/// 路由器服务
///
/// 通过注入的登录状态信号与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_hash()));
        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前路由在当前登录状态下的守卫结果
    pub fn decision(&self) -> GuardDecision {
        GuardDecision::resolve(self.current_route.get(), self.is_authenticated.get())
    }

    /// 浏览器前进/后退或手动修改 hash
    fn init_hashchange_listener(&self) {
        let set_route = self.set_route;
        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_hash()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 登录状态或路由变化时执行重定向
    fn setup_guard_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            if let GuardDecision::Redirect(target) = router.decision() {
                log::info!(
                    "Redirecting {} to {}",
                    router.current_route.get_untracked(),
                    target
                );
                replace_hash(target.to_path());
                router.set_route.set(target);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_hashchange_listener();
    router.setup_guard_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> Option<RouterService> {
    use_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 登录状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

/// 路由出口组件
///
/// 按守卫结果渲染：未登录渲染登录页（URL 不变），否则渲染页面。
#[component]
pub fn RouterOutlet(
    /// 未登录时的视图
    login: fn() -> AnyView,
    /// 页面匹配函数
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    // Redirect 与 Render 同一路由时不重新挂载页面
    let page = Memo::new(move |_| match router.map(|r| r.decision()) {
        None | Some(GuardDecision::Login) => None,
        Some(GuardDecision::Render(route)) | Some(GuardDecision::Redirect(route)) => Some(route),
    });

    move || match page.get() {
        None => login(),
        Some(route) => matcher(route),
    }
}
