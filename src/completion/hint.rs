//! Hint splitting
//!
//! Separates the text typed before the cursor into a qualifier and a bare type
//! name, and classifies the qualifier:
//!
//! | hint            | qualifier                 | name  |
//! |-----------------|---------------------------|-------|
//! | `Str`           | none                      | `Str` |
//! | `MyApp.Bar.t`   | module `MyApp.Bar`        | `t`   |
//! | `Bar.`          | module `Bar`              | (empty) |
//! | `:lists.f`      | module `:lists`           | `f`   |
//! | `@repo.t`       | attribute `repo`          | `t`   |
//! | `mod.t`         | variable `mod`            | `t`   |
//! | `__MODULE__.t`  | current module            | `t`   |
//! | `__MODULE__.S.t`| current module + `S`      | `t`   |

use tracing::trace;

use super::metadata::ModuleName;

/// Module-referencing portion of a hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// Unqualified hint
    None,
    /// `@attr.` - value must be inferred
    Attribute(String),
    /// `var.` - value must be inferred
    Variable(String),
    /// Literal module path, not yet alias-expanded
    Module(ModuleName),
    /// `__MODULE__` or `__MODULE__.Sub`, already fully qualified
    CurrentModule(ModuleName),
}

/// Result of splitting a hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitHint {
    pub qualifier: Qualifier,
    pub name: String,
}

impl SplitHint {
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            qualifier: Qualifier::None,
            name: name.into(),
        }
    }
}

/// Split `hint` at its last dot and classify the qualifier.
///
/// Never fails: a qualifier that is not a module path, attribute or variable
/// reference is dropped and the text after the last dot is kept as the name.
pub fn split_hint(hint: &str, current_module: Option<&ModuleName>) -> SplitHint {
    let hint = hint.trim();

    let Some((prefix, name)) = hint.rsplit_once('.') else {
        return SplitHint::unqualified(hint);
    };

    let qualifier = classify(prefix, current_module);
    trace!("split hint {:?} into {:?} / {:?}", hint, qualifier, name);

    SplitHint {
        qualifier,
        name: name.to_string(),
    }
}

fn classify(prefix: &str, current_module: Option<&ModuleName>) -> Qualifier {
    if let Some(rest) = prefix.strip_prefix("__MODULE__") {
        return match (current_module, rest) {
            (Some(module), "") => Qualifier::CurrentModule(module.clone()),
            (Some(module), rest) => match rest.strip_prefix('.') {
                Some(suffix) if is_alias_path(suffix) => Qualifier::CurrentModule(module.join(suffix)),
                _ => Qualifier::None,
            },
            (None, _) => Qualifier::None,
        };
    }

    if let Some(attribute) = prefix.strip_prefix('@') {
        if is_identifier(attribute) {
            return Qualifier::Attribute(attribute.to_string());
        }
        return Qualifier::None;
    }

    if let Some(atom) = prefix.strip_prefix(':') {
        if is_identifier(atom) {
            return Qualifier::Module(ModuleName::new(prefix));
        }
        return Qualifier::None;
    }

    if is_identifier(prefix) {
        return Qualifier::Variable(prefix.to_string());
    }

    if is_alias_path(prefix) {
        return Qualifier::Module(ModuleName::new(prefix));
    }

    Qualifier::None
}

/// Lowercase identifier: `repo`, `_mod`, `mod2`
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Dotted alias path where every segment is capitalized: `MyApp.Foo`
fn is_alias_path(text: &str) -> bool {
    !text.is_empty()
        && text.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
