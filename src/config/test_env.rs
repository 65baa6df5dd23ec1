use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Process environment as seen by one test.
///
/// Holds the env lock for its whole lifetime and restores every variable it
/// touched, in reverse order, when dropped. `DATAWISE_*` and `API_URL` start
/// cleared so a developer's shell cannot leak into config tests.
pub(crate) struct EnvScope {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

pub(crate) const CONFIG_VARS: [&str; 3] = ["DATAWISE_API_URL", "API_URL", "DATAWISE_STORAGE_DIR"];

impl EnvScope {
    pub(crate) fn clean() -> Self {
        let mut scope = Self {
            saved: Vec::new(),
            _lock: ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner),
        };
        for key in CONFIG_VARS {
            scope.unset(key);
        }
        scope
    }

    pub(crate) fn set(&mut self, key: &'static str, value: &str) -> &mut Self {
        self.remember(key);
        // SAFETY: ENV_LOCK is held by this scope.
        unsafe { std::env::set_var(key, value) };
        self
    }

    pub(crate) fn unset(&mut self, key: &'static str) -> &mut Self {
        self.remember(key);
        // SAFETY: ENV_LOCK is held by this scope.
        unsafe { std::env::remove_var(key) };
        self
    }

    fn remember(&mut self, key: &'static str) {
        if !self.saved.iter().any(|(k, _)| *k == key) {
            self.saved.push((key, std::env::var(key).ok()));
        }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            // SAFETY: `_lock` is released only after this loop.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_original_value_after_repeated_sets() {
        let key = "DATAWISE_TEST_ENV_SCOPE";
        let mut env = EnvScope::clean();
        env.set(key, "first").set(key, "second").unset(key).set(key, "third");
        assert_eq!(std::env::var(key).as_deref(), Ok("third"));
        drop(env);
        assert!(std::env::var(key).is_err());
    }

    #[test]
    fn clean_scope_clears_config_vars() {
        let env = EnvScope::clean();
        for key in CONFIG_VARS {
            assert!(std::env::var(key).is_err(), "{key} should be cleared");
        }
        drop(env);
    }
}
