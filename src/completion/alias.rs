//! Alias expansion for module qualifiers

use std::collections::BTreeMap;

use tracing::trace;

use super::metadata::ModuleName;

/// Expand the first segment of `module` through the alias table.
///
/// `Bar.Baz` with `Bar => MyApp.Bar` becomes `MyApp.Bar.Baz`. Atom modules and
/// paths with no matching alias are returned unchanged.
pub fn expand_alias(module: &ModuleName, aliases: &BTreeMap<String, ModuleName>) -> ModuleName {
    if module.is_atom() {
        return module.clone();
    }

    let (head, rest) = module.split_first();
    match aliases.get(head) {
        Some(target) => {
            let expanded = target.join(rest.unwrap_or(""));
            trace!("expanded alias {} -> {}", module, expanded);
            expanded
        }
        None => module.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> BTreeMap<String, ModuleName> {
        BTreeMap::from([
            ("Bar".to_string(), ModuleName::new("MyApp.Bar")),
            ("Repo".to_string(), ModuleName::new("MyApp.Repo")),
        ])
    }

    #[test]
    fn test_expands_exact_alias() {
        assert_eq!(expand_alias(&ModuleName::new("Bar"), &aliases()).as_str(), "MyApp.Bar");
    }

    #[test]
    fn test_expands_alias_prefix() {
        assert_eq!(expand_alias(&ModuleName::new("Bar.Baz"), &aliases()).as_str(), "MyApp.Bar.Baz");
    }

    #[test]
    fn test_unknown_paths_pass_through() {
        assert_eq!(expand_alias(&ModuleName::new("Baz.Bar"), &aliases()).as_str(), "Baz.Bar");
        assert_eq!(expand_alias(&ModuleName::new("Barista"), &aliases()).as_str(), "Barista");
    }

    #[test]
    fn test_atom_modules_are_not_expanded() {
        let mut aliases = aliases();
        aliases.insert(":lists".to_string(), ModuleName::new("Nope"));
        assert_eq!(expand_alias(&ModuleName::new(":lists"), &aliases).as_str(), ":lists");
    }
}
