//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由以及登录守卫的判定规则。

use std::fmt::Display;

/// 应用路由枚举（hash 路由，如 `#/reservations`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 预约池列表 (默认路由)
    #[default]
    Pools,
    /// 预约列表
    Reservations,
    /// 统计
    Statistics,
    /// 未知路径
    NotFound,
}

impl AppRoute {
    /// 所有需要登录才能访问的页面
    pub const PAGES: [AppRoute; 3] = [
        AppRoute::Pools,
        AppRoute::Reservations,
        AppRoute::Statistics,
    ];

    /// 将 hash 路径解析为路由枚举，接受带或不带 `#` 的形式
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('#');
        let path = path.split('?').next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "" | "/pools" => Self::Pools,
            "/reservations" => Self::Reservations,
            "/statistics" => Self::Statistics,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 hash 路径
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Pools => "/pools",
            Self::Reservations => "/reservations",
            Self::Statistics => "/statistics",
            Self::NotFound => "/404",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Pools => "Pools",
            Self::Reservations => "Reservations",
            Self::Statistics => "Statistics",
            Self::NotFound => "Not found",
        }
    }

    /// 定义该路由是否需要认证
    ///
    /// 目前所有路径都受保护，未知路径也不例外。
    pub fn requires_auth(&self) -> bool {
        true
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// **核心守卫逻辑**：给定路由与登录状态，决定渲染什么
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 在原地渲染登录表单，URL 不变
    Login,
    /// 渲染目标页面
    Render(AppRoute),
    /// 替换 URL 后渲染目标页面
    Redirect(AppRoute),
}

impl GuardDecision {
    pub fn resolve(route: AppRoute, is_logged_in: bool) -> Self {
        if route.requires_auth() && !is_logged_in {
            return Self::Login;
        }
        match route {
            AppRoute::NotFound => Self::Redirect(AppRoute::default()),
            page => Self::Render(page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(AppRoute::from_path(""), AppRoute::Pools);
        assert_eq!(AppRoute::from_path("#/"), AppRoute::Pools);
        assert_eq!(AppRoute::from_path("#/pools"), AppRoute::Pools);
        assert_eq!(AppRoute::from_path("#/reservations/"), AppRoute::Reservations);
        assert_eq!(AppRoute::from_path("/statistics?x=1"), AppRoute::Statistics);
        assert_eq!(AppRoute::from_path("#/admin"), AppRoute::NotFound);
    }

    #[test]
    fn test_paths_round_trip_for_pages() {
        for page in AppRoute::PAGES {
            assert_eq!(AppRoute::from_path(page.to_path()), page);
        }
    }

    #[test]
    fn test_logged_out_always_shows_login() {
        let mut routes = AppRoute::PAGES.to_vec();
        routes.push(AppRoute::NotFound);
        for route in routes {
            assert_eq!(GuardDecision::resolve(route, false), GuardDecision::Login);
        }
    }

    #[test]
    fn test_logged_in_renders_page() {
        for page in AppRoute::PAGES {
            let decision = GuardDecision::resolve(page, true);
            assert_eq!(decision, GuardDecision::Render(page));
            assert_ne!(decision, GuardDecision::Login);
        }
    }

    #[test]
    fn test_logged_in_unknown_path_redirects_home() {
        assert_eq!(
            GuardDecision::resolve(AppRoute::NotFound, true),
            GuardDecision::Redirect(AppRoute::Pools)
        );
    }
}
