//! Dependency injection infrastructure.
//!
//! Plugins receive their collaborators through compile-time injection based
//! on the `FromRef` trait and the derive macros from `di-macros`.
//!
//! # Overview
//!
//! - `FromRef<T>`: Trait for extracting a value from a reference to `T`
//! - `#[derive(Context)]`: Makes each field of a bundle extractable via `FromRef`
//! - `#[derive(FromContext)]`: Generates `FromRef` impl by resolving each field
//! - `#[derive(ExposesPlugins)]`: Lists the plugins a flavor holds
//!
//! # Example
//!
//! ```ignore
//! use crate::di::FromRef;
//! use crate::infra::PluginInfraDeps;
//!
//! #[derive(FromContext, Clone)]
//! #[from_context(Context = "PluginInfraDeps")]
//! pub struct Deps {
//!     pub plugin_name: PluginName, // resolved via FromRef<PluginInfraDeps>
//!     pub log: PluginLogger,
//! }
//!
//! // Usage, from a flavor's inject step
//! let deps = Deps::from_ref(&flavor.infra_deps("cassandra"));
//! ```

/// Trait for extracting a value from a reference to another type.
///
/// This is the core trait for compile-time dependency injection.
/// Types that implement `FromRef<T>` can be extracted from `&T`.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Blanket implementation: any Clone type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

// Re-export derive macros
pub use di_macros::{Context, ExposesPlugins, FromContext};
