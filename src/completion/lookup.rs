//! Visibility-aware module type lookup and source merging
//!
//! Resolution flow:
//! 1. Decide the lookup target: the referenced module if it exists, the module
//!    being edited for unqualified hints, nothing otherwise
//! 2. Gather matching types from file metadata, then from introspection
//! 3. Shape, deduplicate by (name, arity) keeping the first entry, sort

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::candidate::{shape, Candidate, TypeSource};
use super::introspection::Introspection;
use super::matcher::NameMatcher;
use super::metadata::{FileMetadata, ModuleName};

/// Where module-scoped types are looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    Module {
        module: ModuleName,
        include_private: bool,
    },
    /// Unknown module, or no module context at all
    Nothing,
}

/// Choose the lookup target for an alias-expanded module reference.
///
/// Private types are only visible for unqualified hints, which always target
/// the module being edited.
pub fn lookup_target(
    requested: Option<&ModuleName>,
    current: Option<&ModuleName>,
    metadata: &FileMetadata,
    introspection: &dyn Introspection,
) -> LookupTarget {
    let exists = |module: &ModuleName| introspection.module_exists(module) || metadata.defines_module(module);

    let Some(requested) = requested else {
        return match current {
            Some(current) => LookupTarget::Module {
                module: current.clone(),
                include_private: true,
            },
            None => LookupTarget::Nothing,
        };
    };

    if exists(requested) {
        return LookupTarget::Module {
            module: requested.clone(),
            include_private: false,
        };
    }

    // Nested module declared in the current one but not aliased yet
    if let Some(current) = current.filter(|_| !requested.is_atom()) {
        let nested = current.join(requested.as_str());
        if exists(&nested) {
            trace!("resolved {} as nested module {}", requested, nested);
            return LookupTarget::Module {
                module: nested,
                include_private: false,
            };
        }
    }

    debug!("Module {} not found, no typespec candidates", requested);
    LookupTarget::Nothing
}

/// Types of `target` matching `hint`, file declarations first, then compiled types
pub fn find_module_types(
    target: &LookupTarget,
    hint: &str,
    metadata: &FileMetadata,
    introspection: &dyn Introspection,
    matcher: &dyn NameMatcher,
) -> Vec<Candidate> {
    let LookupTarget::Module { module, include_private } = target else {
        return Vec::new();
    };

    let from_file: Vec<TypeSource> = metadata
        .types_of(module)
        .filter(|info| *include_private || !info.kind.is_private())
        .filter(|info| matcher.matches(&info.name, hint))
        .cloned()
        .map(TypeSource::File)
        .collect();

    let from_compiled: Vec<TypeSource> = introspection
        .list_types(module, &|name| matcher.matches(name, hint))
        .into_iter()
        .map(TypeSource::Introspected)
        .collect();

    debug!(
        "Module {}: {} file types, {} compiled types (include_private: {})",
        module,
        from_file.len(),
        from_compiled.len(),
        include_private
    );

    merge_candidates(
        from_file
            .into_iter()
            .chain(from_compiled)
            .map(|source| shape(source, Some(module))),
    )
}

/// Builtin types matching `hint`, attributed to no module
pub fn find_builtin_types(hint: &str, introspection: &dyn Introspection, matcher: &dyn NameMatcher) -> Vec<Candidate> {
    merge_candidates(
        introspection
            .list_builtin_types(&|name| matcher.matches(name, hint))
            .into_iter()
            .map(|ty| shape(TypeSource::Introspected(ty), None)),
    )
}

/// Deduplicate by (name, arity), keeping the first occurrence, and sort by the same key
pub fn merge_candidates(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    let mut merged: BTreeMap<(String, usize), Candidate> = BTreeMap::new();
    for candidate in candidates {
        merged.entry((candidate.name.clone(), candidate.arity)).or_insert(candidate);
    }
    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::introspection::{IntrospectedType, ModuleRegistry};
    use crate::completion::matcher::FuzzyMatcher;
    use crate::completion::metadata::{FileTypeInfo, TypeKind};

    fn compiled(name: &str, arity: usize, spec: &str) -> IntrospectedType {
        IntrospectedType {
            name: name.to_string(),
            arity,
            kind: TypeKind::Type,
            spec: spec.to_string(),
            doc: String::new(),
            signature: Some(format!("{}()", name)),
            metadata: BTreeMap::new(),
        }
    }

    fn metadata() -> FileMetadata {
        FileMetadata::new()
            .with_type("MyApp.Foo", FileTypeInfo::new("t", TypeKind::Type, &[], "@type t :: integer()"))
            .with_type("MyApp.Foo", FileTypeInfo::new("priv", TypeKind::Typep, &[], "@typep priv :: atom()"))
            .with_type("MyApp.Foo.Inner", FileTypeInfo::new("inner", TypeKind::Type, &[], "@type inner :: term()"))
    }

    fn registry() -> ModuleRegistry {
        ModuleRegistry::new()
            .with_module("MyApp.Foo", vec![compiled("t", 0, "@type t :: binary()"), compiled("old", 0, "@type old :: term()")])
            .with_module("MyApp.Bar", vec![compiled("t", 0, "@type t :: map()")])
    }

    fn module(name: &str) -> ModuleName {
        ModuleName::new(name)
    }

    #[test]
    fn test_unqualified_targets_current_module_with_privates() {
        let current = module("MyApp.Foo");
        assert_eq!(
            lookup_target(None, Some(&current), &metadata(), &registry()),
            LookupTarget::Module { module: current.clone(), include_private: true }
        );
        assert_eq!(lookup_target(None, None, &metadata(), &registry()), LookupTarget::Nothing);
    }

    #[test]
    fn test_existing_module_excludes_privates() {
        let current = module("MyApp.Foo");
        assert_eq!(
            lookup_target(Some(&module("MyApp.Bar")), Some(&current), &metadata(), &registry()),
            LookupTarget::Module { module: module("MyApp.Bar"), include_private: false }
        );
        // Explicit self-reference is still a qualified reference
        assert_eq!(
            lookup_target(Some(&current), Some(&current), &metadata(), &registry()),
            LookupTarget::Module { module: current.clone(), include_private: false }
        );
    }

    #[test]
    fn test_nested_module_lookup() {
        assert_eq!(
            lookup_target(Some(&module("Inner")), Some(&module("MyApp.Foo")), &metadata(), &registry()),
            LookupTarget::Module { module: module("MyApp.Foo.Inner"), include_private: false }
        );
    }

    #[test]
    fn test_unknown_module_has_no_fallback() {
        assert_eq!(
            lookup_target(Some(&module("Nope")), Some(&module("MyApp.Foo")), &metadata(), &registry()),
            LookupTarget::Nothing
        );
        let found = find_module_types(&LookupTarget::Nothing, "", &metadata(), &registry(), &FuzzyMatcher::default());
        assert!(found.is_empty());
    }

    #[test]
    fn test_file_metadata_takes_precedence_over_compiled_types() {
        let target = LookupTarget::Module { module: module("MyApp.Foo"), include_private: true };
        let found = find_module_types(&target, "", &metadata(), &registry(), &FuzzyMatcher::default());

        let keys: Vec<_> = found.iter().map(|c| (c.name.as_str(), c.arity)).collect();
        assert_eq!(keys, vec![("old", 0), ("priv", 0), ("t", 0)]);

        let t = found.iter().find(|c| c.name == "t").unwrap();
        assert_eq!(t.spec, "@type t :: integer()");
        assert!(found.iter().all(|c| c.origin == Some(module("MyApp.Foo"))));
    }

    #[test]
    fn test_private_file_types_hidden_when_not_included() {
        let target = LookupTarget::Module { module: module("MyApp.Foo"), include_private: false };
        let found = find_module_types(&target, "", &metadata(), &registry(), &FuzzyMatcher::default());
        assert!(found.iter().all(|c| c.name != "priv"));
    }

    #[test]
    fn test_builtin_types_have_no_origin() {
        let found = find_builtin_types("nonempty_l", &registry(), &FuzzyMatcher::default());
        assert!(!found.is_empty());
        assert!(found.iter().all(|c| c.origin.is_none()));
        assert!(found.windows(2).all(|pair| pair[0].key() < pair[1].key()));
    }

    #[test]
    fn test_merge_keeps_same_name_different_arity() {
        let target = LookupTarget::Module { module: module("MyApp.Foo"), include_private: true };
        let metadata = metadata()
            .with_type("MyApp.Foo", FileTypeInfo::new("t", TypeKind::Type, &["a"], "@type t(a) :: [a]"));
        let found = find_module_types(&target, "t", &metadata, &registry(), &FuzzyMatcher::default());
        let keys: Vec<_> = found.iter().map(|c| (c.name.as_str(), c.arity)).collect();
        assert_eq!(keys, vec![("t", 0), ("t", 1)]);
    }
}
