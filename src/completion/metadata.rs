//! Read-only inputs of the typespec completion stage
//!
//! The scope tracker and metadata builder that produce these values live outside
//! this crate. Everything here is a plain snapshot: constructed per request,
//! never mutated by the completion pipeline.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::serde_helpers;

/// Printed name of a module.
///
/// Alias-style modules are stored without the `Elixir.` prefix (`MyApp.Foo`),
/// plain atom modules keep their leading colon (`:lists`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        let name = name.strip_prefix("Elixir.").unwrap_or(name);
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for atom modules such as `:lists`
    pub fn is_atom(&self) -> bool {
        self.0.starts_with(':')
    }

    /// First segment and the (possibly empty) remainder, `Foo.Bar.Baz` -> (`Foo`, `Bar.Baz`)
    pub fn split_first(&self) -> (&str, Option<&str>) {
        match self.0.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (&self.0, None),
        }
    }

    /// Appends a dotted suffix: `MyApp` + `Foo.Bar` -> `MyApp.Foo.Bar`
    pub fn join(&self, suffix: &str) -> Self {
        if suffix.is_empty() {
            return self.clone();
        }
        Self(format!("{}.{}", self.0, suffix))
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ModuleName {
    fn from(value: String) -> Self {
        ModuleName::new(value)
    }
}

impl From<&str> for ModuleName {
    fn from(value: &str) -> Self {
        ModuleName::new(value)
    }
}

impl From<ModuleName> for String {
    fn from(value: ModuleName) -> Self {
        value.0
    }
}

/// Lexical scope at the cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    /// Top level of a file, outside any module
    #[default]
    File,
    /// Module body
    Module,
    /// Inside a function clause
    Function { name: String, arity: usize },
    /// Inside a `@type`/`@spec`/`@callback` body
    Typespec { name: String, arity: usize },
}

impl Scope {
    pub fn is_typespec(&self) -> bool {
        matches!(self, Scope::Typespec { .. })
    }
}

/// Best-effort inferred value of a variable or module attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Binding {
    Atom(String),
    Map,
    Struct(Option<ModuleName>),
    Tuple,
    List,
    Number,
    Binary,
    Other,
    Unknown,
}

/// Snapshot of the lexical context at the cursor position
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Module currently being edited
    pub module: Option<ModuleName>,
    /// Alias table: short alias (`Bar`) -> fully-qualified module (`MyApp.Bar`)
    pub aliases: BTreeMap<String, ModuleName>,
    pub scope: Scope,
    pub variables: BTreeMap<String, Binding>,
    pub attributes: BTreeMap<String, Binding>,
}

impl Environment {
    pub fn new(module: Option<ModuleName>, scope: Scope) -> Self {
        Self {
            module,
            scope,
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<ModuleName>) -> Self {
        self.aliases.insert(alias.into(), target.into());
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.variables.insert(name.into(), binding);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.attributes.insert(name.into(), binding);
        self
    }
}

/// Visibility kind of a type definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// `@type`
    #[default]
    Type,
    /// `@typep`
    Typep,
    /// `@opaque`
    Opaque,
}

impl TypeKind {
    pub fn is_private(self) -> bool {
        self == TypeKind::Typep
    }
}

/// A type declared in the file being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileTypeInfo {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Parameter names, `@type pair(a, b)` -> `["a", "b"]`
    #[serde(default)]
    pub args: Vec<String>,
    /// Rendered spec clauses in declaration order
    #[serde(default)]
    pub specs: Vec<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

impl FileTypeInfo {
    pub fn new(name: impl Into<String>, kind: TypeKind, args: &[&str], spec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            args: args.iter().map(|arg| arg.to_string()).collect(),
            specs: vec![spec.into()],
            doc: None,
            meta: BTreeMap::new(),
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

/// Index key of a file-declared type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey {
    pub module: ModuleName,
    pub name: String,
    pub arity: usize,
}

/// Declarations found in the file currently being edited
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMetadata {
    /// Modules defined in the file, compiled or not
    pub modules: BTreeSet<ModuleName>,
    #[serde(
        serialize_with = "serde_helpers::serialize_type_index",
        deserialize_with = "serde_helpers::deserialize_type_index"
    )]
    pub types: BTreeMap<TypeKey, FileTypeInfo>,
}

impl FileMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type declaration; the module is recorded as defined in the file.
    ///
    /// A later declaration with the same (module, name, arity) replaces the earlier one.
    pub fn insert_type(&mut self, module: impl Into<ModuleName>, info: FileTypeInfo) {
        let module = module.into();
        self.modules.insert(module.clone());
        let key = TypeKey {
            module,
            name: info.name.clone(),
            arity: info.arity(),
        };
        self.types.insert(key, info);
    }

    pub fn with_type(mut self, module: impl Into<ModuleName>, info: FileTypeInfo) -> Self {
        self.insert_type(module, info);
        self
    }

    pub fn with_module(mut self, module: impl Into<ModuleName>) -> Self {
        self.modules.insert(module.into());
        self
    }

    pub fn defines_module(&self, module: &ModuleName) -> bool {
        self.modules.contains(module) || self.types.keys().any(|key| &key.module == module)
    }

    /// All types declared for `module`, in (name, arity) order
    pub fn types_of<'a>(&'a self, module: &'a ModuleName) -> impl Iterator<Item = &'a FileTypeInfo> + 'a {
        self.types
            .iter()
            .filter(move |(key, _)| &key.module == module)
            .map(|(_, info)| info)
    }
}
