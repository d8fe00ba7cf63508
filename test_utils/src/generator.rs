//! Random completion scenarios for property-based testing.
//!
//! Names and modules come from small vocabularies so that generated hints
//! actually collide with declared types, aliases and bindings.

use quickcheck::{Arbitrary, Gen};

use typespec_completion::completion::{Binding, Environment, FileMetadata, FileTypeInfo, ModuleRegistry, TypeKind};

use crate::fixtures::{compiled_type, typespec_env};

const TYPE_NAMES: &[&str] = &["t", "priv", "list", "state", "term", "struct", "option", "keyword"];
const MODULES: &[&str] = &["MyApp.Foo", "MyApp.Bar", "Other"];
const PARAMS: &[&str] = &["a", "b", "c"];
const HINTS: &[&str] = &[
    "", "t", "s", "Str", "li", "k", "Bar.", "Bar.t", "MyApp.Bar.s", "MyApp.Foo.", "Other.o", "Nope.t",
    "@repo.t", "@config.", "mod.s", "missing.t", "__MODULE__.", ":lists.t", "My-App.t",
];

/// A complete completion request with random contents
#[derive(Clone, Debug)]
pub struct CompletionScenario {
    pub hint: String,
    pub environment: Environment,
    pub metadata: FileMetadata,
    pub registry: ModuleRegistry,
}

fn pick<'a>(g: &mut Gen, items: &[&'a str]) -> &'a str {
    g.choose(items).copied().unwrap_or_default()
}

fn arbitrary_kind(g: &mut Gen) -> TypeKind {
    *g.choose(&[TypeKind::Type, TypeKind::Typep, TypeKind::Opaque]).unwrap_or(&TypeKind::Type)
}

fn keyword(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Type => "@type",
        TypeKind::Typep => "@typep",
        TypeKind::Opaque => "@opaque",
    }
}

fn arbitrary_params(g: &mut Gen) -> Vec<&'static str> {
    let arity = usize::arbitrary(g) % (PARAMS.len() + 1);
    PARAMS[..arity].to_vec()
}

impl Arbitrary for CompletionScenario {
    fn arbitrary(g: &mut Gen) -> Self {
        let current = if bool::arbitrary(g) { Some(pick(g, MODULES)) } else { None };

        let mut environment: Environment = typespec_env(current).with_alias("Bar", "MyApp.Bar");
        if bool::arbitrary(g) {
            environment = environment.with_attribute("repo", Binding::Atom("Elixir.MyApp.Bar".to_string()));
        }
        environment = environment
            .with_attribute("config", Binding::Map)
            .with_variable("mod", Binding::Atom("MyApp.Foo".to_string()));

        let mut metadata = FileMetadata::new();
        for _ in 0..(usize::arbitrary(g) % 8) {
            let params = arbitrary_params(g);
            let name = pick(g, TYPE_NAMES);
            let kind = arbitrary_kind(g);
            let mut info = FileTypeInfo::new(
                name,
                kind,
                &params,
                format!("{} {}({}) :: term()", keyword(kind), name, params.join(", ")),
            );
            if bool::arbitrary(g) {
                info.specs.push(format!("{} {}({}) :: any()", keyword(kind), name, params.join(", ")));
            }
            metadata.insert_type(pick(g, MODULES), info);
        }

        let mut registry = ModuleRegistry::new();
        for _ in 0..(usize::arbitrary(g) % 8) {
            let params = arbitrary_params(g);
            let ty = compiled_type(pick(g, TYPE_NAMES), &params, arbitrary_kind(g));
            registry.insert_module(pick(g, MODULES), vec![ty]);
        }

        CompletionScenario {
            hint: pick(g, HINTS).to_string(),
            environment,
            metadata,
            registry,
        }
    }
}
