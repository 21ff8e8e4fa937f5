//! Persisted light/dark preference

use tracing::warn;

use crate::store::KeyValueStore;

pub const DARK_MODE_KEY: &str = "isDarkMode";

/// Dark-mode flag stored alongside the favorites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemePreference {
    pub is_dark_mode: bool,
}

impl ThemePreference {
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            is_dark_mode: store.get_bool(DARK_MODE_KEY),
        }
    }

    /// Flip the flag and persist it immediately
    pub fn toggle(&mut self, store: &mut impl KeyValueStore) {
        self.is_dark_mode = !self.is_dark_mode;
        if let Err(e) = store.set_bool(DARK_MODE_KEY, self.is_dark_mode) {
            warn!("Failed to save theme preference: {}", e);
        }
    }

    pub fn label(&self) -> &'static str {
        if self.is_dark_mode {
            "dark"
        } else {
            "light"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_defaults_to_light() {
        let store = MemoryStore::new();
        assert!(!ThemePreference::load(&store).is_dark_mode);
    }

    #[test]
    fn test_toggle_persists() {
        let mut store = MemoryStore::new();
        let mut pref = ThemePreference::load(&store);

        pref.toggle(&mut store);
        assert!(pref.is_dark_mode);
        assert!(ThemePreference::load(&store).is_dark_mode);

        pref.toggle(&mut store);
        assert_eq!(pref.label(), "light");
        assert!(!ThemePreference::load(&store).is_dark_mode);
    }
}
