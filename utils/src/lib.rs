//! Shared utilities for the Roster workspace.
//!
//! Holds build-time metadata that both `business` and `ui` display.

pub mod version_info;
