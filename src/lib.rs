//! # Image-Style
//!
//! Cosmetic rounded corners for images rendered in a note-taking app's
//! document view.
//!
//! The host notifies the plugin when a document fragment is rendered, when
//! nodes are inserted beneath a rendered fragment, and when the live editing
//! surface updates. Each notification triggers an idempotent decoration pass
//! that reconciles border-radius classes on the affected images against the
//! user's persisted selection.
//!
//! ## Quick Start
//!
//! ```rust
//! use image_style::{
//!     dom::Element,
//!     plugin::ImageStylePlugin,
//!     settings::JsonFileStore,
//! };
//!
//! # fn main() -> image_style::Result<()> {
//! let mut plugin = ImageStylePlugin::load(JsonFileStore::new("data.json"));
//!
//! // Host delivers a freshly rendered fragment
//! let fragment = Element::new("div");
//! let image = Element::new("img");
//! Element::append_child(&fragment, &image);
//! plugin.on_render(&fragment);
//!
//! assert!(image.has_class("image-style-rounded-sm"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`styles`] - The enumerated border-radius styles and active selection
//! - [`decorate`] - Idempotent class reconciliation over a DOM region
//! - [`observe`] - Adapters between host change notifications and decoration
//! - [`dom`] - Minimal single-threaded element tree with mutation watchers
//! - [`settings`] - Persisted settings and the host storage seam
//! - [`plugin`] - Lifecycle entry points the host calls
//!
//! The nine CSS classes (`image-style-rounded-none` through
//! `image-style-rounded-4xl`) map to fixed radii in the static stylesheet
//! shipped in `assets/styles.css`.

pub mod decorate;
pub mod dom;
pub mod error;
pub mod observe;
pub mod plugin;
pub mod settings;
pub mod styles;

// Re-export commonly used types for convenience
pub use crate::{
    decorate::ImageDecorator,
    error::{ImageStyleError, Result},
    plugin::ImageStylePlugin,
    settings::{ImageStyleSettings, SettingsStore},
    styles::StyleRegistry,
};
