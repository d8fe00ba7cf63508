//! Qualifier resolution through binding inference
//!
//! `@repo.t` and `mod.t` only name a module if the attribute or variable is
//! known to hold an atom. Inference is best-effort; anything other than an atom
//! leaves the qualifier unresolved and the completion stage returns nothing.

use tracing::debug;

use super::hint::Qualifier;
use super::metadata::{Binding, Environment, ModuleName};

/// Variable or attribute whose value is needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Variable(String),
    Attribute(String),
}

/// Best-effort value inference for variables and module attributes
pub trait BindingInference: Send + Sync {
    /// Infer the value of `reference`; `Binding::Unknown` when nothing is known
    fn infer(&self, reference: &Reference, environment: &Environment) -> Binding;
}

/// Reads the binding tables carried by the environment snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentBindings;

impl BindingInference for EnvironmentBindings {
    fn infer(&self, reference: &Reference, environment: &Environment) -> Binding {
        let table = match reference {
            Reference::Variable(name) => environment.variables.get(name),
            Reference::Attribute(name) => environment.attributes.get(name),
        };
        table.cloned().unwrap_or(Binding::Unknown)
    }
}

/// Qualifier after inference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedQualifier {
    /// Unqualified hint
    None,
    /// Module path, not yet alias-expanded
    Module(ModuleName),
    /// Fully qualified module, alias expansion must not touch it
    Qualified(ModuleName),
    /// Reference whose value could not be inferred as a module
    Unresolved,
}

/// Resolve variable and attribute qualifiers to a module path
pub fn resolve_qualifier(
    qualifier: &Qualifier,
    environment: &Environment,
    inference: &dyn BindingInference,
) -> ResolvedQualifier {
    let reference = match qualifier {
        Qualifier::None => return ResolvedQualifier::None,
        Qualifier::Module(module) => return ResolvedQualifier::Module(module.clone()),
        Qualifier::CurrentModule(module) => return ResolvedQualifier::Qualified(module.clone()),
        Qualifier::Variable(name) => Reference::Variable(name.clone()),
        Qualifier::Attribute(name) => Reference::Attribute(name.clone()),
    };

    match inference.infer(&reference, environment) {
        Binding::Atom(atom) => {
            debug!("Inferred {:?} as module {}", reference, atom);
            ResolvedQualifier::Module(atom_to_module(&atom))
        }
        other => {
            debug!("Could not resolve {:?} to a module (inferred {:?})", reference, other);
            ResolvedQualifier::Unresolved
        }
    }
}

/// `Elixir.Foo` and `Foo` name the alias `Foo`; any other atom keeps its colon form
fn atom_to_module(atom: &str) -> ModuleName {
    let atom = atom.strip_prefix(':').unwrap_or(atom);
    if atom.starts_with("Elixir.") || atom.starts_with(|c: char| c.is_ascii_uppercase()) {
        ModuleName::new(atom)
    } else {
        ModuleName::new(format!(":{}", atom))
    }
}
