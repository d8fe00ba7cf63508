//! Typespec completion
//!
//! This module provides:
//! - Hint splitting into qualifier and bare type name
//! - Qualifier resolution through best-effort binding inference
//! - Alias and nested-module expansion
//! - Visibility-aware lookup over file metadata and compiled modules
//! - The builtin type catalog
//! - Shaping into uniform candidates, deduplicated and sorted by (name, arity)

pub mod alias;
pub mod binding;
pub mod builtin;
pub mod candidate;
pub mod hint;
pub mod introspection;
pub mod lookup;
pub mod matcher;
pub mod metadata;

use std::sync::Arc;

use tracing::debug;

pub use binding::{BindingInference, EnvironmentBindings, Reference, ResolvedQualifier};
pub use candidate::{Candidate, CandidateKind, TypeSource};
pub use hint::{Qualifier, SplitHint};
pub use introspection::{IntrospectedType, Introspection, ModuleRegistry};
pub use lookup::LookupTarget;
pub use matcher::{FuzzyMatcher, MatchMode, NameMatcher};
pub use metadata::{Binding, Environment, FileMetadata, FileTypeInfo, ModuleName, Scope, TypeKind};

use crate::config::CompletionConfig;

/// Typespec completion stage
///
/// Holds the external collaborators; every request is computed from the
/// read-only environment and file metadata passed in, so one instance can
/// serve concurrent requests.
#[derive(Clone)]
pub struct TypespecCompletion {
    introspection: Arc<dyn Introspection>,
    inference: Arc<dyn BindingInference>,
    matcher: Arc<dyn NameMatcher>,
    max_results: Option<usize>,
    include_builtins: bool,
}

impl TypespecCompletion {
    pub fn new(
        introspection: Arc<dyn Introspection>,
        inference: Arc<dyn BindingInference>,
        matcher: Arc<dyn NameMatcher>,
    ) -> Self {
        Self {
            introspection,
            inference,
            matcher,
            max_results: None,
            include_builtins: true,
        }
    }

    /// Build a stage with the table-driven inference and the configured matcher
    pub fn from_config(introspection: Arc<dyn Introspection>, config: &CompletionConfig) -> Self {
        Self {
            introspection,
            inference: Arc::new(EnvironmentBindings),
            matcher: Arc::new(FuzzyMatcher::new(config.matcher)),
            max_results: config.max_results,
            include_builtins: config.include_builtins,
        }
    }

    /// Every visible type matching `hint`, sorted by (name, arity) without duplicates.
    ///
    /// Returns nothing when `scope_guard` is false (cursor outside a typespec).
    pub fn resolve_type_candidates(
        &self,
        hint: &str,
        environment: &Environment,
        metadata: &FileMetadata,
        scope_guard: bool,
    ) -> Vec<Candidate> {
        if !scope_guard {
            return Vec::new();
        }

        let split = hint::split_hint(hint, environment.module.as_ref());
        let resolved = binding::resolve_qualifier(&split.qualifier, environment, self.inference.as_ref());

        let requested = match resolved {
            ResolvedQualifier::None => None,
            ResolvedQualifier::Module(module) => Some(alias::expand_alias(&module, &environment.aliases)),
            ResolvedQualifier::Qualified(module) => Some(module),
            ResolvedQualifier::Unresolved => {
                debug!("Unresolved qualifier in hint {:?}, no typespec candidates", hint);
                return Vec::new();
            }
        };

        let target = lookup::lookup_target(
            requested.as_ref(),
            environment.module.as_ref(),
            metadata,
            self.introspection.as_ref(),
        );

        let module_types = lookup::find_module_types(
            &target,
            &split.name,
            metadata,
            self.introspection.as_ref(),
            self.matcher.as_ref(),
        );

        let builtin_types = if requested.is_none() && self.include_builtins {
            lookup::find_builtin_types(&split.name, self.introspection.as_ref(), self.matcher.as_ref())
        } else {
            Vec::new()
        };

        debug!(
            "Typespec hint {:?}: {} module candidates, {} builtin candidates",
            hint,
            module_types.len(),
            builtin_types.len()
        );

        let mut candidates = lookup::merge_candidates(module_types.into_iter().chain(builtin_types));
        if let Some(max_results) = self.max_results {
            candidates.truncate(max_results);
        }
        candidates
    }

    /// Reducer-chain entry point: appends this stage's candidates to `acc`.
    ///
    /// Outside a typespec scope the accumulator is returned unchanged.
    pub fn reduce(
        &self,
        hint: &str,
        environment: &Environment,
        metadata: &FileMetadata,
        mut acc: Vec<Candidate>,
    ) -> Vec<Candidate> {
        let scope_guard = environment.scope.is_typespec();
        acc.extend(self.resolve_type_candidates(hint, environment, metadata, scope_guard));
        acc
    }
}

impl Default for TypespecCompletion {
    fn default() -> Self {
        Self::new(
            Arc::new(ModuleRegistry::new()),
            Arc::new(EnvironmentBindings),
            Arc::new(FuzzyMatcher::default()),
        )
    }
}
