//! Terragen
//!
//! Code generation engine that brings discovered Azure resources under
//! Terraform management. Given a resource descriptor from Azure Resource
//! Graph, it produces an `import` block binding the live resource ID to a
//! Terraform address, plus either a blueprint module call (when a curated
//! module exists for the type) or a best-effort raw resource block.
//!
//! Secret-shaped property values never reach generated text; they are
//! replaced with `****_UPDATE_*_****` placeholders for the reviewer to
//! fill in.
//!
//! The engine is a stateless pipeline: the only I/O is the read-only
//! template lookup, and a [`Generator`] can be shared freely across
//! threads.

pub mod emitter;
pub mod generator;
pub mod mapping;
pub mod naming;
pub mod redact;
pub mod resource;
pub mod schema;
pub mod template;
pub mod variables;

pub use generator::{GenerateError, GeneratedCode, Generator};
pub use resource::ResourceDescriptor;
