//! Compile-time dependency injection macros for plugin flavors.
//!
//! This crate provides derive macros for DI and plugin discovery:
//! - `#[derive(Context)]` to make a struct's fields extractable
//! - `#[derive(FromContext)]` to auto-resolve fields from a context
//! - `#[derive(ExposesPlugins)]` to list the plugins held by a flavor
//!
//! The `FromRef`, `ExposesPlugins` and `NamedPlugin` items must be reachable
//! at the consuming crate root. Generated code references `crate::FromRef`,
//! `crate::ExposesPlugins` and `crate::NamedPlugin`.

use proc_macro::TokenStream;

mod context;
mod exposes_plugins;
mod fields;
mod from_context;

/// Derive macro for creating a DI context.
///
/// When applied to a struct, generates `FromRef` implementations for each
/// field type, allowing them to be extracted from the context.
///
/// # Requirements
///
/// - All fields must implement `Clone`
/// - Field types must be distinct
///
/// # Example
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct PluginInfraDeps {
///     pub plugin_name: PluginName,
///     pub log: PluginLogger,
/// }
///
/// // Generated implementations:
/// // impl FromRef<PluginInfraDeps> for PluginName { ... }
/// // impl FromRef<PluginInfraDeps> for PluginLogger { ... }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for types that can be constructed from a context.
///
/// When applied to a struct, generates a `FromRef<Context>` implementation
/// that resolves each field by calling `FromRef::from_ref` on the context.
///
/// # Requirements
///
/// - Each field type must implement `FromRef<Context>`
/// - The context type defaults to `Context` but can be overridden with
///   `#[from_context(Context = "MyContext")]`
///
/// # Example
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// #[from_context(Context = "PluginInfraDeps")]
/// pub struct Deps {
///     pub plugin_name: PluginName, // resolved via PluginName::from_ref(ctx)
///     pub log: PluginLogger,       // resolved via PluginLogger::from_ref(ctx)
/// }
/// ```
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}

/// Derive macro listing the plugins a flavor holds.
///
/// Generates an `ExposesPlugins` implementation that walks the annotated
/// fields in declaration order:
///
/// - `#[expose]` lists the field as one plugin named after the field
/// - `#[expose(name = "Custom")]` lists it under an explicit name
/// - `#[expose(flavor)]` splices in the nested flavor's own plugin list
///
/// Fields without the attribute are not plugins and are skipped.
///
/// # Example
///
/// ```ignore
/// #[derive(ExposesPlugins)]
/// pub struct FlavorRpc {
///     #[expose(flavor)]
///     local: FlavorLocal,
///     #[expose]
///     http: rest::Plugin,
///     injected: bool,
/// }
///
/// // Generated implementation:
/// // impl ExposesPlugins for FlavorRpc {
/// //     fn exposes_plugins(&mut self) -> Vec<NamedPlugin<'_>> {
/// //         let mut plugins = Vec::new();
/// //         plugins.extend(ExposesPlugins::exposes_plugins(&mut self.local));
/// //         plugins.push(NamedPlugin::new("http", &mut self.http));
/// //         plugins
/// //     }
/// // }
/// ```
#[proc_macro_derive(ExposesPlugins, attributes(expose))]
pub fn derive_exposes_plugins(input: TokenStream) -> TokenStream {
    exposes_plugins::derive_exposes_plugins_impl(input)
}
