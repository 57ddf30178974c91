//! Generated file contents and the placeholder buffers
//!
//! This module provides:
//! - Canonical contents of every file a module can emit
//! - [`TemplateContext`], the buffers later modules rewrite through tokens

pub mod context;
pub mod sources;

pub use context::{Buffer, Substitution, TemplateContext, TemplateError, Token};
