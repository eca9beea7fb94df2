//! 会话模块
//!
//! `Session` 是不可变值，只能通过 `reduce` 应用 `SessionAction` 得到新值。
//! 持久化时整个状态树序列化为一个 JSON blob，启动时在渲染前恢复。

use serde::{Deserialize, Serialize};

/// 持久化 blob 所在的存储键
pub const STORAGE_STATE_KEY: &str = "poolman_state";

/// 当前会话
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// 登录后获得的 token，存在即视为已登录
    pub token: Option<String>,
    /// API 地址，启动时确定
    pub api_base_url: String,
}

impl Session {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            token: None,
            api_base_url: api_base_url.into(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// 唯一的状态变更入口
    pub fn reduce(self, action: SessionAction) -> Self {
        match action {
            SessionAction::LoginFinished(token) => Self {
                token: Some(token),
                ..self
            },
            SessionAction::LogoutFinished => Self {
                token: None,
                ..self
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    LoginFinished(String),
    LogoutFinished,
}

// =========================================================
// 持久化
// =========================================================

/// 键值存储抽象（浏览器中为 LocalStorage）
pub trait StateStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 持久化的状态树
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    user: Session,
}

/// 从存储恢复会话
///
/// token 取自 blob，API 地址始终使用启动配置。blob 缺失或损坏时返回未登录会话。
pub fn restore<S: StateStorage + ?Sized>(storage: &S, api_base_url: &str) -> Session {
    let fresh = Session::new(api_base_url);
    let Some(blob) = storage.get(STORAGE_STATE_KEY) else {
        return fresh;
    };
    match serde_json::from_str::<PersistedState>(&blob) {
        Ok(state) => Session {
            token: state.user.token,
            ..fresh
        },
        Err(e) => {
            log::warn!("Discarding unreadable persisted state: {}", e);
            storage.delete(STORAGE_STATE_KEY);
            fresh
        }
    }
}

/// 持久化会话
pub fn persist<S: StateStorage + ?Sized>(storage: &S, session: &Session) -> bool {
    let state = PersistedState {
        user: session.clone(),
    };
    match serde_json::to_string(&state) {
        Ok(blob) => storage.set(STORAGE_STATE_KEY, &blob),
        Err(e) => {
            log::error!("Failed to serialize session: {}", e);
            false
        }
    }
}

#[cfg(test)]
pub struct MemoryStorage(std::cell::RefCell<std::collections::HashMap<String, String>>);

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self(Default::default())
    }
}

#[cfg(test)]
impl StateStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.0.borrow_mut().remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://localhost:8000";

    #[test]
    fn test_new_session_is_logged_out() {
        let session = Session::new(URL);
        assert!(!session.is_logged_in());
        assert_eq!(session.api_base_url, URL);
    }

    #[test]
    fn test_login_then_logout() {
        let session = Session::new(URL).reduce(SessionAction::LoginFinished("abc".into()));
        assert_eq!(session.token.as_deref(), Some("abc"));

        let session = session.reduce(SessionAction::LogoutFinished);
        assert_eq!(session.token, None);
        assert_eq!(session.api_base_url, URL);
    }

    #[test]
    fn test_second_login_replaces_token() {
        let session = Session::new(URL)
            .reduce(SessionAction::LoginFinished("first".into()))
            .reduce(SessionAction::LoginFinished("second".into()));
        assert_eq!(session.token.as_deref(), Some("second"));
    }

    #[test]
    fn test_persist_and_restore_token() {
        let storage = MemoryStorage::new();
        let session = Session::new(URL).reduce(SessionAction::LoginFinished("abc".into()));
        assert!(persist(&storage, &session));

        let restored = restore(&storage, URL);
        assert_eq!(restored, session);
    }

    #[test]
    fn test_restore_uses_startup_url() {
        let storage = MemoryStorage::new();
        let session = Session::new("http://old:8000").reduce(SessionAction::LoginFinished("abc".into()));
        persist(&storage, &session);

        let restored = restore(&storage, URL);
        assert_eq!(restored.api_base_url, URL);
        assert_eq!(restored.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_restore_discards_corrupt_blob() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_STATE_KEY, "{not json");

        let restored = restore(&storage, URL);
        assert!(!restored.is_logged_in());
        assert_eq!(storage.get(STORAGE_STATE_KEY), None);
    }

    #[test]
    fn test_restore_without_blob() {
        let storage = MemoryStorage::new();
        assert_eq!(restore(&storage, URL), Session::new(URL));
    }
}
