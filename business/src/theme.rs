//! Light/dark theme selection with persistence.
//!
//! `ThemeManager` decides which theme is active. It talks to the outside world through two
//! traits: `ThemeStorage` persists the user's explicit choice and `ThemeRoot` applies the
//! theme to whatever renders it. The ui crate provides the platform adapters.

use std::fmt;
use std::str::FromStr;

use log::{info, warn};
use thiserror::Error;

/// Key the preference is stored under.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown theme: {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Key-value persistence for the theme preference.
///
/// Implementations must not fail loudly: a storage that cannot be read behaves as empty.
pub trait ThemeStorage {
    /// The raw stored value, if any.
    fn load(&self) -> Option<String>;

    fn store(&mut self, value: &str);
}

impl<S: ThemeStorage + ?Sized> ThemeStorage for Box<S> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn store(&mut self, value: &str) {
        (**self).store(value);
    }
}

/// In-process storage for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStorage {
    value: Option<String>,
}

impl MemoryThemeStorage {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ThemeStorage for MemoryThemeStorage {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn store(&mut self, value: &str) {
        self.value = Some(value.to_owned());
    }
}

/// The visual root the active theme is applied to.
pub trait ThemeRoot {
    fn apply(&mut self, theme: Theme);
}

pub struct ThemeManager<S, R> {
    theme: Theme,
    /// Whether storage holds a valid choice, read once by `initialize`.
    explicit: bool,
    storage: S,
    root: R,
}

impl<S: ThemeStorage, R: ThemeRoot> ThemeManager<S, R> {
    /// Creates a manager in the light theme. Call [`ThemeManager::initialize`] before rendering.
    pub fn new(storage: S, root: R) -> Self {
        Self {
            theme: Theme::default(),
            explicit: false,
            storage,
            root,
        }
    }

    /// Picks the stored preference if it is valid, else the host's color scheme, and applies it.
    ///
    /// Nothing is persisted here, so later host changes keep applying until the user chooses.
    pub fn initialize(&mut self, system_prefers_dark: bool) -> Theme {
        let stored = self.stored();
        self.explicit = stored.is_some();
        self.theme = match stored {
            Some(theme) => {
                info!("Using stored theme: {theme}");
                theme
            }
            None => {
                let theme = Theme::from_dark(system_prefers_dark);
                info!("No stored theme, following system: {theme}");
                theme
            }
        };
        self.root.apply(self.theme);
        self.theme
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    /// Applies and persists `theme` as the user's explicit preference.
    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.explicit = true;
        self.root.apply(theme);
        self.storage.store(theme.as_str());
    }

    /// Follows a host color-scheme change unless the user has an explicit preference.
    ///
    /// Returns true when the theme was applied.
    pub fn on_system_change(&mut self, prefers_dark: bool) -> bool {
        if self.has_explicit_preference() {
            return false;
        }
        self.theme = Theme::from_dark(prefers_dark);
        self.root.apply(self.theme);
        true
    }

    pub fn has_explicit_preference(&self) -> bool {
        self.explicit
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    fn stored(&self) -> Option<Theme> {
        let raw = self.storage.load()?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(err) => {
                warn!("Ignoring stored theme: {err}");
                None
            }
        }
    }
}
