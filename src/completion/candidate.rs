//! Uniform candidate record and the shaper that builds it
//!
//! Type descriptors arrive in two shapes: declarations parsed from the file
//! being edited, and types reported by introspection (compiled modules and the
//! builtin catalog). Both become a [`Candidate`].

use std::collections::BTreeMap;

use lsp_types::{
    CompletionItem, CompletionItemKind, CompletionItemLabelDetails, Documentation, InsertTextFormat,
    MarkupContent, MarkupKind,
};
use serde::Serialize;

use super::introspection::IntrospectedType;
use super::metadata::{FileTypeInfo, ModuleName, TypeKind};

/// Suggestion kind marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    TypeSpec,
}

/// A single typespec completion candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    #[serde(rename = "type")]
    pub kind: CandidateKind,
    pub name: String,
    pub arity: usize,
    /// Defining module; `None` for builtin types
    pub origin: Option<ModuleName>,
    pub args_list: Vec<String>,
    pub spec: String,
    pub doc: String,
    pub signature: String,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Candidate {
    /// Deduplication and ordering key
    pub fn key(&self) -> (&str, usize) {
        (&self.name, self.arity)
    }

    /// Convert to an LSP completion item; `sort_order` is the position in the result list
    pub fn to_completion_item(&self, sort_order: usize) -> CompletionItem {
        let mut item = CompletionItem {
            label: format!("{}/{}", self.name, self.arity),
            kind: Some(CompletionItemKind::TYPE_PARAMETER),
            label_details: Some(CompletionItemLabelDetails {
                detail: None,
                description: self.origin.as_ref().map(|origin| origin.to_string()),
            }),
            filter_text: Some(self.name.clone()),
            insert_text: Some(self.insert_snippet()),
            insert_text_format: Some(InsertTextFormat::SNIPPET),
            ..Default::default()
        };

        if !self.spec.is_empty() {
            item.detail = Some(self.spec.clone());
        }

        if !self.doc.is_empty() {
            item.documentation = Some(Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value: self.doc.clone(),
            }));
        }

        item.sort_text = Some(format!("{:04}", sort_order));

        item
    }

    /// `pair(${1:a}, ${2:b})`, falling back to positional placeholders when names are missing
    fn insert_snippet(&self) -> String {
        let placeholders: Vec<String> = (0..self.arity)
            .map(|index| {
                let label = self
                    .args_list
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| format!("arg{}", index + 1));
                format!("${{{}:{}}}", index + 1, label)
            })
            .collect();
        format!("{}({})", self.name, placeholders.join(", "))
    }
}

/// Type descriptor in either upstream shape
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSource {
    /// Declared in the file being edited
    File(FileTypeInfo),
    /// Reported by introspection (compiled module or builtin catalog)
    Introspected(IntrospectedType),
}

/// Normalize a descriptor into a candidate attributed to `origin`
pub fn shape(source: TypeSource, origin: Option<&ModuleName>) -> Candidate {
    let origin = origin.cloned();
    match source {
        TypeSource::File(info) => {
            let rendered_args = info.args.join(", ");
            let spec = match info.kind {
                TypeKind::Opaque => format!("@opaque {}({})", info.name, rendered_args),
                // The last clause shadows earlier redefinitions
                TypeKind::Type | TypeKind::Typep => info.specs.last().cloned().unwrap_or_default(),
            };
            Candidate {
                kind: CandidateKind::TypeSpec,
                signature: format!("{}({})", info.name, rendered_args),
                arity: info.args.len(),
                name: info.name,
                origin,
                args_list: info.args,
                spec,
                doc: info.doc.unwrap_or_default(),
                metadata: info.meta,
            }
        }
        TypeSource::Introspected(ty) => Candidate {
            kind: CandidateKind::TypeSpec,
            args_list: ty.signature.as_deref().map(signature_args).unwrap_or_default(),
            name: ty.name,
            arity: ty.arity,
            origin,
            spec: ty.spec,
            doc: ty.doc,
            signature: ty.signature.unwrap_or_default(),
            metadata: ty.metadata,
        },
    }
}

/// Argument names from the parenthesized part of a signature.
///
/// `keyword(value)` -> `["value"]`; missing or unbalanced parentheses give `[]`.
pub fn signature_args(signature: &str) -> Vec<String> {
    let (Some(open), Some(close)) = (signature.find('('), signature.rfind(')')) else {
        return Vec::new();
    };
    if close < open {
        return Vec::new();
    }

    signature[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn introspected(name: &str, arity: usize, signature: Option<&str>) -> IntrospectedType {
        IntrospectedType {
            name: name.to_string(),
            arity,
            kind: TypeKind::Type,
            spec: format!("@type {}", name),
            doc: "docs".to_string(),
            signature: signature.map(str::to_string),
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn test_file_type_takes_last_spec_clause() {
        let mut info = FileTypeInfo::new("t", TypeKind::Type, &[], "@type t :: integer()");
        info.specs.push("@type t :: atom()".to_string());

        let candidate = shape(TypeSource::File(info), Some(&ModuleName::new("MyApp.Foo")));

        assert_eq!(candidate.spec, "@type t :: atom()");
        assert_eq!(candidate.signature, "t()");
        assert_eq!(candidate.arity, 0);
        assert_eq!(candidate.doc, "");
        assert_eq!(candidate.origin, Some(ModuleName::new("MyApp.Foo")));
    }

    #[test]
    fn test_opaque_file_type_synthesizes_spec() {
        let info = FileTypeInfo::new("queue", TypeKind::Opaque, &["a", "b"], "@opaque queue(a, b) :: {[a], [b]}");

        let candidate = shape(TypeSource::File(info), None);

        assert_eq!(candidate.spec, "@opaque queue(a, b)");
        assert_eq!(candidate.signature, "queue(a, b)");
        assert_eq!(candidate.args_list, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(candidate.arity, 2);
    }

    #[test]
    fn test_file_type_without_specs_renders_empty_spec() {
        let mut info = FileTypeInfo::new("t", TypeKind::Typep, &[], "");
        info.specs.clear();
        info.doc = Some("A private type".to_string());

        let candidate = shape(TypeSource::File(info), None);

        assert_eq!(candidate.spec, "");
        assert_eq!(candidate.doc, "A private type");
    }

    #[test]
    fn test_introspected_type_parses_args_from_signature() {
        let candidate = shape(TypeSource::Introspected(introspected("keyword", 1, Some("keyword(value)"))), None);
        assert_eq!(candidate.args_list, vec!["value".to_string()]);
        assert_eq!(candidate.signature, "keyword(value)");
        assert_eq!(candidate.doc, "docs");
        assert_eq!(candidate.origin, None);
    }

    #[test]
    fn test_missing_signature_gives_empty_args() {
        let candidate = shape(TypeSource::Introspected(introspected("t", 0, None)), None);
        assert!(candidate.args_list.is_empty());
        assert_eq!(candidate.signature, "");
    }

    #[test]
    fn test_signature_args_edge_cases() {
        assert_eq!(signature_args("pair( a ,b )"), vec!["a".to_string(), "b".to_string()]);
        assert!(signature_args("t()").is_empty());
        assert!(signature_args("t").is_empty());
        assert!(signature_args("t(a").is_empty());
        assert!(signature_args(")t(").is_empty());
    }

    #[test]
    fn test_to_completion_item() {
        let candidate = shape(
            TypeSource::File(FileTypeInfo::new("pair", TypeKind::Type, &["a", "b"], "@type pair(a, b) :: {a, b}")),
            Some(&ModuleName::new("MyApp.Foo")),
        );

        let item = candidate.to_completion_item(3);

        assert_eq!(item.label, "pair/2");
        assert_eq!(item.kind, Some(CompletionItemKind::TYPE_PARAMETER));
        assert_eq!(item.detail.as_deref(), Some("@type pair(a, b) :: {a, b}"));
        assert_eq!(item.insert_text.as_deref(), Some("pair(${1:a}, ${2:b})"));
        assert_eq!(item.sort_text.as_deref(), Some("0003"));
        assert!(item.documentation.is_none());
        assert_eq!(
            item.label_details.and_then(|details| details.description).as_deref(),
            Some("MyApp.Foo")
        );
    }
}
