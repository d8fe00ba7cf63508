//! Introspection of already-compiled modules
//!
//! The completion stage never reaches into a global module table; it asks an
//! injected [`Introspection`] service. [`ModuleRegistry`] is the in-memory
//! implementation used by the CLI driver and tests.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::builtin;
use super::metadata::{ModuleName, TypeKind};

/// A type as reported by a compiled module or the builtin catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrospectedType {
    pub name: String,
    pub arity: usize,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub spec: String,
    #[serde(default)]
    pub doc: String,
    /// Human-readable signature such as `keyword(value)`
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Read-only view of compiled modules and builtin types
pub trait Introspection: Send + Sync {
    /// Whether `module` is compiled and loaded
    fn module_exists(&self, module: &ModuleName) -> bool;

    /// Public types of `module` whose name satisfies `matches`
    fn list_types(&self, module: &ModuleName, matches: &dyn Fn(&str) -> bool) -> Vec<IntrospectedType>;

    /// Builtin types whose name satisfies `matches`
    fn list_builtin_types(&self, matches: &dyn Fn(&str) -> bool) -> Vec<IntrospectedType> {
        builtin::find_builtin_types(matches)
    }
}

/// In-memory registry of compiled modules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleRegistry {
    modules: FxHashMap<ModuleName, Vec<IntrospectedType>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled module; types of an already registered module are appended
    pub fn insert_module(&mut self, module: impl Into<ModuleName>, types: Vec<IntrospectedType>) {
        self.modules.entry(module.into()).or_default().extend(types);
    }

    pub fn with_module(mut self, module: impl Into<ModuleName>, types: Vec<IntrospectedType>) -> Self {
        self.insert_module(module, types);
        self
    }
}

impl Introspection for ModuleRegistry {
    fn module_exists(&self, module: &ModuleName) -> bool {
        self.modules.contains_key(module)
    }

    fn list_types(&self, module: &ModuleName, matches: &dyn Fn(&str) -> bool) -> Vec<IntrospectedType> {
        let Some(types) = self.modules.get(module) else {
            return Vec::new();
        };
        // Private types are not part of a compiled module's public interface
        types
            .iter()
            .filter(|ty| !ty.kind.is_private() && matches(&ty.name))
            .cloned()
            .collect()
    }
}
