use crate::models::User;

pub(crate) const TOKEN_KEY: &str = "auth_token";
pub(crate) const USER_KEY: &str = "user";

/// Durable key/value storage backing the session.
///
/// Writes are best-effort: a full or disabled storage must never break the UI.
pub(crate) trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

pub(crate) fn save_session_to_storage(storage: &dyn SessionStorage, token: &str, user: &User) {
    if let Ok(json) = serde_json::to_string(user) {
        storage.set(TOKEN_KEY, token);
        storage.set(USER_KEY, &json);
    }
}

/// Restores `(token, user)` only when both halves are present and valid.
pub(crate) fn load_session_from_storage(storage: &dyn SessionStorage) -> Option<(String, User)> {
    let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
    let json = storage.get(USER_KEY)?;
    let user: User = serde_json::from_str(&json).ok()?;
    Some((token, user))
}

pub(crate) fn clear_session_storage(storage: &dyn SessionStorage) {
    storage.remove(TOKEN_KEY);
    storage.remove(USER_KEY);
}
