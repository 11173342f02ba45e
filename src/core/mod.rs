//! Component Base
//!
//! Building blocks shared by every scene component:
//! - [`Component`]: identity, ownership and lifecycle capability
//! - [`ComponentConfig`]: configuration common to all component types
//! - [`RedrawSink`]: the render-invalidation signal consumed by the renderer

pub mod component;
pub mod config;
pub mod redraw;

pub use component::{Component, ComponentBody, ComponentKey, ComponentRecord, Lifecycle};
pub use config::{ComponentConfig, Meta};
pub use redraw::{RedrawFlag, RedrawSink};
