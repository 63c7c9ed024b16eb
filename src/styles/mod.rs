//! # Border-Radius Style System
//!
//! Holds the fixed table of border-radius styles and the user's current
//! selection. The registry is built once from persisted settings at plugin
//! activation and is the single source of truth for which CSS class every
//! decoration pass applies.
//!
//! ## Usage
//!
//! ```rust
//! use image_style::settings::ImageStyleSettings;
//! use image_style::styles::StyleRegistry;
//!
//! let registry = StyleRegistry::from_settings(&ImageStyleSettings::default());
//! assert_eq!(registry.selected_class(), "image-style-rounded-sm");
//! ```

pub mod registry;

// Re-exports for convenience
pub use registry::StyleRegistry;
