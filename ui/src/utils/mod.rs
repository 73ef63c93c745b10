pub mod colors;
#[cfg(target_arch = "wasm32")]
pub mod location;
pub mod theme_root;
pub mod theme_storage;
