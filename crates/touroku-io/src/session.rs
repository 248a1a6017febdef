//! Persisted session state behind an injectable store.
//!
//! Process-wide state (the admin token, the theme) lives in
//! [`PersistedValue`] instances with explicit `get`/`set`/`clear` and
//! a subscription list, rather than module-level singletons, so tests
//! can substitute [`MemoryStorage`] for the browser's localStorage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// localStorage key for the admin bearer token.
pub const AUTH_TOKEN_KEY: &str = "admin_token";

/// localStorage key for the theme (`"light"` / `"dark"`).
pub const THEME_KEY: &str = "theme";

/// Where persisted values are read from and written to.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn clear(&self, key: &str);
}

/// The browser's localStorage. All operations are best-effort:
/// storage may be unavailable (private browsing, quota) and a missing
/// value is indistinguishable from an unwritable one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl StorageBackend for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            storage.set_item(key, value).ok();
        }
    }

    fn clear(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            storage.remove_item(key).ok();
        }
    }
}

/// In-memory backend for tests and non-browser environments.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.into(), value.into());
    }

    fn clear(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

type Listener = Box<dyn Fn(Option<&str>)>;

struct Inner {
    backend: Rc<dyn StorageBackend>,
    key: &'static str,
    current: RefCell<Option<String>>,
    listeners: RefCell<Vec<Listener>>,
}

/// One persisted value with reactive subscribers.
///
/// Reads the persisted value once at construction; mutations write
/// through to the backend and notify every subscriber.
#[derive(Clone)]
pub struct PersistedValue {
    inner: Rc<Inner>,
}

impl PersistedValue {
    /// Create the store and load the persisted value, if any.
    #[must_use]
    pub fn new(backend: Rc<dyn StorageBackend>, key: &'static str) -> Self {
        let current = RefCell::new(backend.read(key));
        Self {
            inner: Rc::new(Inner {
                backend,
                key,
                current,
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The current value.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.inner.current.borrow().clone()
    }

    /// Set and persist the value, then notify subscribers.
    pub fn set(&self, value: &str) {
        self.inner.backend.write(self.inner.key, value);
        *self.inner.current.borrow_mut() = Some(value.to_owned());
        self.notify();
    }

    /// Clear the value from memory and the backend, then notify.
    pub fn clear(&self) {
        self.inner.backend.clear(self.inner.key);
        *self.inner.current.borrow_mut() = None;
        self.notify();
    }

    /// Register a callback invoked (with the new value) on every
    /// mutation. Subscriptions live as long as the store.
    pub fn subscribe(&self, listener: impl Fn(Option<&str>) + 'static) {
        self.inner.listeners.borrow_mut().push(Box::new(listener));
    }

    fn notify(&self) {
        let current = self.inner.current.borrow();
        for listener in self.inner.listeners.borrow().iter() {
            listener(current.as_deref());
        }
    }
}

/// Reflect a theme value onto `<html data-theme="...">` so the CSS
/// variable sets switch. No-op outside a browser.
pub fn apply_theme(value: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    element.set_attribute("data-theme", value).ok();
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_persisted_value_at_construction() {
        let backend = Rc::new(MemoryStorage::default());
        backend.write(AUTH_TOKEN_KEY, "tok_1");
        let store = PersistedValue::new(backend, AUTH_TOKEN_KEY);
        assert_eq!(store.get().unwrap(), "tok_1");
    }

    #[test]
    fn set_persists_and_clear_removes() {
        let backend = Rc::new(MemoryStorage::default());
        let store = PersistedValue::new(Rc::clone(&backend) as Rc<dyn StorageBackend>, THEME_KEY);
        assert!(store.get().is_none());

        store.set("dark");
        assert_eq!(store.get().unwrap(), "dark");
        assert_eq!(backend.read(THEME_KEY).unwrap(), "dark");

        store.clear();
        assert!(store.get().is_none());
        assert!(backend.read(THEME_KEY).is_none());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let backend = Rc::new(MemoryStorage::default());
        let store = PersistedValue::new(backend, THEME_KEY);

        let seen = Rc::new(RefCell::new(Vec::<Option<String>>::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |value| {
            sink.borrow_mut().push(value.map(str::to_owned));
        });

        store.set("light");
        store.set("dark");
        store.clear();

        assert_eq!(
            *seen.borrow(),
            vec![Some("light".to_owned()), Some("dark".to_owned()), None]
        );
    }

    #[test]
    fn clones_share_state() {
        let backend = Rc::new(MemoryStorage::default());
        let store = PersistedValue::new(backend, AUTH_TOKEN_KEY);
        let clone = store.clone();
        store.set("tok_2");
        assert_eq!(clone.get().unwrap(), "tok_2");
    }
}
