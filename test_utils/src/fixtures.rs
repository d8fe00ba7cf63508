//! Builders for completion requests used across integration tests

use std::collections::BTreeMap;
use std::sync::Arc;

use typespec_completion::completion::{
    Candidate, Environment, FileMetadata, IntrospectedType, ModuleName, ModuleRegistry, Scope, TypeKind,
    TypespecCompletion,
};
use typespec_completion::config::CompletionConfig;

/// Environment positioned inside `@type t :: ` of `module`
pub fn typespec_env(module: Option<&str>) -> Environment {
    Environment::new(
        module.map(ModuleName::new),
        Scope::Typespec {
            name: "t".to_string(),
            arity: 0,
        },
    )
}

/// A compiled type whose signature lists `params`
pub fn compiled_type(name: &str, params: &[&str], kind: TypeKind) -> IntrospectedType {
    let rendered = params.join(", ");
    IntrospectedType {
        name: name.to_string(),
        arity: params.len(),
        kind,
        spec: format!("@type {}({}) :: term()", name, rendered),
        doc: format!("Compiled {}", name),
        signature: Some(format!("{}({})", name, rendered)),
        metadata: BTreeMap::new(),
    }
}

/// Completion stage with default configuration over `registry`
pub fn completion_with(registry: ModuleRegistry) -> TypespecCompletion {
    TypespecCompletion::from_config(Arc::new(registry), &CompletionConfig::default())
}

/// Run the stage as the reducer chain would, starting from an empty accumulator
pub fn complete(
    completion: &TypespecCompletion,
    hint: &str,
    environment: &Environment,
    metadata: &FileMetadata,
) -> Vec<Candidate> {
    completion.reduce(hint, environment, metadata, Vec::new())
}

/// `name/arity` labels, handy for assertions
pub fn labels(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|candidate| format!("{}/{}", candidate.name, candidate.arity))
        .collect()
}
