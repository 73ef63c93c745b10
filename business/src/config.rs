use std::any::Any;
use std::time::Duration;

use anyhow::Context as _;
use log::info;
use roster_states::{SnapshotClone, State, state_assign_impl};
use serde::Deserialize;
use ustr::Ustr;

/// Prefix shared by every environment variable the app reads.
pub const ENV_PREFIX: &str = "ROSTER_";

pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_USERS_MAX_AGE: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Base URL of the users API. Empty means "relative to the page origin" on wasm.
    pub api_base_url: String,
    /// Per-request timeout. Only enforced on native targets.
    pub request_timeout: Duration,
    /// Initial page size of the dashboard table.
    pub page_size: usize,
    /// Delay applied to filter inputs. `None` applies filters on every keystroke.
    pub filter_debounce: Option<Duration>,
    /// How long a loaded users list is served from cache before a load refetches it.
    pub users_max_age: Duration,
}

/// Environment shape read by `serde-env`, with the `ROSTER_` prefix already stripped.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    page_size: Option<usize>,
    filter_debounce_ms: Option<u64>,
    users_max_age_secs: Option<u64>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads configuration from `ROSTER_*` environment variables.
    ///
    /// On wasm the values are baked in at compile time.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        #[cfg(not(target_arch = "wasm32"))]
        let vars: Vec<(String, String)> = std::env::vars().collect();

        #[cfg(target_arch = "wasm32")]
        let vars: Vec<(String, String)> = [
            ("ROSTER_API_BASE_URL", option_env!("ROSTER_API_BASE_URL")),
            ("ROSTER_PAGE_SIZE", option_env!("ROSTER_PAGE_SIZE")),
            (
                "ROSTER_FILTER_DEBOUNCE_MS",
                option_env!("ROSTER_FILTER_DEBOUNCE_MS"),
            ),
            (
                "ROSTER_USERS_MAX_AGE_SECS",
                option_env!("ROSTER_USERS_MAX_AGE_SECS"),
            ),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key.to_owned(), value.to_owned())))
        .collect();

        Self::from_vars(vars)
    }

    /// Builds configuration from arbitrary `(key, value)` pairs; keys without the prefix are ignored.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> anyhow::Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.as_ref()
                    .strip_prefix(ENV_PREFIX)
                    .map(|key| (key.to_owned(), value.as_ref().to_owned()))
            })
            .collect();

        let raw: RawConfig = serde_env::from_iter(scoped)
            .context("Failed to parse ROSTER_* environment variables")?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            api_base_url,
            request_timeout_secs,
            page_size,
            filter_debounce_ms,
            users_max_age_secs,
        } = raw;

        let defaults = Self::default();

        let api_base_url = match api_base_url {
            Some(url) => {
                info!("Using provided API_BASE_URL: {url}");
                url.trim_end_matches('/').to_owned()
            }
            None => defaults.api_base_url,
        };

        let request_timeout = match request_timeout_secs {
            Some(0) => anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than 0"),
            Some(secs) => Duration::from_secs(secs),
            None => defaults.request_timeout,
        };

        let page_size = match page_size {
            Some(0) => anyhow::bail!("PAGE_SIZE must be greater than 0"),
            Some(size) => size,
            None => defaults.page_size,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            page_size,
            filter_debounce: filter_debounce_ms.map(Duration::from_millis),
            // 0 makes every load refetch.
            users_max_age: users_max_age_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.users_max_age),
        })
    }

    /// Base URL the users endpoints hang off.
    pub fn api_url(&self) -> Ustr {
        Ustr::from(self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else {
                DEFAULT_API_BASE_URL.to_owned()
            },
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            filter_debounce: None,
            users_max_age: DEFAULT_USERS_MAX_AGE,
        }
    }
}

impl SnapshotClone for BusinessConfig {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
