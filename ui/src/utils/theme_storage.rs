//! Platform storage for the theme preference.
//!
//! - Native: a small file under the user's config directory.
//! - Web: `window.localStorage`.

use roster_business::ThemeStorage;

/// Storage for the current platform.
pub fn platform_storage() -> Box<dyn ThemeStorage> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(native::FileThemeStorage::new())
    }

    #[cfg(target_arch = "wasm32")]
    {
        Box::new(web::LocalThemeStorage)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileThemeStorage;

#[cfg(target_arch = "wasm32")]
pub use web::LocalThemeStorage;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::{Path, PathBuf};

    use log::warn;
    use roster_business::ThemeStorage;
    use roster_business::theme::THEME_STORAGE_KEY;

    /// Stores the preference in `<config_dir>/roster/theme`.
    #[derive(Debug, Clone)]
    pub struct FileThemeStorage {
        path: Option<PathBuf>,
    }

    impl Default for FileThemeStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FileThemeStorage {
        pub fn new() -> Self {
            let path = dirs::config_dir().map(|dir| dir.join("roster").join(THEME_STORAGE_KEY));
            if path.is_none() {
                warn!("No config directory; theme preference will not persist");
            }
            Self { path }
        }

        pub fn at(path: impl Into<PathBuf>) -> Self {
            Self {
                path: Some(path.into()),
            }
        }

        pub fn path(&self) -> Option<&Path> {
            self.path.as_deref()
        }
    }

    impl ThemeStorage for FileThemeStorage {
        fn load(&self) -> Option<String> {
            let path = self.path.as_ref()?;
            fs::read_to_string(path)
                .ok()
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        }

        fn store(&mut self, value: &str) {
            let Some(path) = self.path.as_ref() else {
                return;
            };

            if let Some(parent) = path.parent() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!("Failed to create {}: {err}", parent.display());
                    return;
                }
            }

            if let Err(err) = fs::write(path, value) {
                warn!("Failed to store theme in {}: {err}", path.display());
            }
        }
    }

}

#[cfg(target_arch = "wasm32")]
mod web {
    use log::warn;
    use roster_business::ThemeStorage;
    use roster_business::theme::THEME_STORAGE_KEY;

    /// Stores the preference in `window.localStorage["theme"]`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalThemeStorage;

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    impl ThemeStorage for LocalThemeStorage {
        fn load(&self) -> Option<String> {
            local_storage()?.get_item(THEME_STORAGE_KEY).ok().flatten()
        }

        fn store(&mut self, value: &str) {
            let Some(storage) = local_storage() else {
                warn!("localStorage unavailable; theme preference will not persist");
                return;
            };
            if let Err(err) = storage.set_item(THEME_STORAGE_KEY, value) {
                warn!("Failed to store theme: {err:?}");
            }
        }
    }
}
