//! Backend selection.
//!
//! [`BackendKind`] enumerates the backends a configuration may name, and
//! [`BackendRegistry`] maps each kind to the loader that turns a path into an
//! [`ImageHandle`]. Adding a backend means adding a variant and registering its
//! loader in [`BackendRegistry::builtin`]; the planner and pipeline are
//! unaffected.

use super::backend::{BackendError, ImageHandle};
use super::rust_backend::RustHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Named codec backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The `image` crate, statically linked.
    #[default]
    Rust,
}

impl BackendKind {
    /// Every backend a configuration may select.
    pub fn available() -> &'static [BackendKind] {
        &[BackendKind::Rust]
    }

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Rust => "rust",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown backend '{name}', available: {}", available_names())]
pub struct UnknownBackend {
    pub name: String,
}

fn available_names() -> String {
    BackendKind::available()
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackendKind::available()
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownBackend {
                name: s.to_string(),
            })
    }
}

/// Decodes a file into a backend-specific handle.
pub type Loader = fn(&Path) -> Result<Box<dyn ImageHandle>, BackendError>;

/// Loaders keyed by backend kind.
#[derive(Clone)]
pub struct BackendRegistry {
    loaders: HashMap<BackendKind, Loader>,
}

impl BackendRegistry {
    /// A registry with no loaders; every lookup fails until one is registered.
    pub fn empty() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Registry with every backend shipped in this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(BackendKind::Rust, RustHandle::open);
        registry
    }

    /// Install (or replace) the loader for `kind`.
    pub fn register(&mut self, kind: BackendKind, loader: Loader) -> &mut Self {
        self.loaders.insert(kind, loader);
        self
    }

    pub fn loader(&self, kind: BackendKind) -> Option<Loader> {
        self.loaders.get(&kind).copied()
    }

    pub fn is_registered(&self, kind: BackendKind) -> bool {
        self.loaders.contains_key(&kind)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.loaders.keys()).finish()
    }
}
