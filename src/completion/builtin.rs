//! Builtin and basic Elixir types
//!
//! These types exist independent of any module and are offered only for
//! unqualified hints.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::introspection::IntrospectedType;
use super::metadata::TypeKind;

struct BuiltinType {
    name: &'static str,
    params: &'static [&'static str],
    spec: &'static str,
    doc: &'static str,
}

const BUILTIN_TYPES: &[BuiltinType] = &[
    // Basic types
    BuiltinType { name: "any", params: &[], spec: "@type any :: any()", doc: "The top type, the set of all terms" },
    BuiltinType { name: "none", params: &[], spec: "@type none :: none()", doc: "The bottom type, contains no terms" },
    BuiltinType { name: "atom", params: &[], spec: "@type atom :: atom()", doc: "An atom is a constant whose name is its own value" },
    BuiltinType { name: "map", params: &[], spec: "@type map :: %{optional(any) => any}", doc: "Any map" },
    BuiltinType { name: "pid", params: &[], spec: "@type pid :: pid()", doc: "A process identifier" },
    BuiltinType { name: "port", params: &[], spec: "@type port :: port()", doc: "A port identifier" },
    BuiltinType { name: "reference", params: &[], spec: "@type reference :: reference()", doc: "A unique reference" },
    BuiltinType { name: "struct", params: &[], spec: "@type struct :: %{:__struct__ => atom, optional(atom) => any}", doc: "Any struct" },
    BuiltinType { name: "tuple", params: &[], spec: "@type tuple :: tuple()", doc: "A tuple of any size" },
    BuiltinType { name: "float", params: &[], spec: "@type float :: float()", doc: "A floating-point number" },
    BuiltinType { name: "integer", params: &[], spec: "@type integer :: integer()", doc: "An integer number" },
    BuiltinType { name: "neg_integer", params: &[], spec: "@type neg_integer :: neg_integer()", doc: "A negative integer" },
    BuiltinType { name: "non_neg_integer", params: &[], spec: "@type non_neg_integer :: non_neg_integer()", doc: "A non-negative integer" },
    BuiltinType { name: "pos_integer", params: &[], spec: "@type pos_integer :: pos_integer()", doc: "A positive integer" },
    BuiltinType { name: "list", params: &["t"], spec: "@type list(t) :: [t]", doc: "Proper list of elements of type t" },
    BuiltinType { name: "nonempty_list", params: &["t"], spec: "@type nonempty_list(t) :: [t, ...]", doc: "Non-empty proper list of elements of type t" },
    BuiltinType { name: "maybe_improper_list", params: &["type1", "type2"], spec: "@type maybe_improper_list(type1, type2) :: maybe_improper_list(type1, type2)", doc: "Proper or improper list of type1 elements terminated by type2" },
    BuiltinType { name: "nonempty_improper_list", params: &["type1", "type2"], spec: "@type nonempty_improper_list(type1, type2) :: nonempty_improper_list(type1, type2)", doc: "Non-empty improper list of type1 elements terminated by type2" },
    BuiltinType { name: "nonempty_maybe_improper_list", params: &["type1", "type2"], spec: "@type nonempty_maybe_improper_list(type1, type2) :: nonempty_maybe_improper_list(type1, type2)", doc: "Non-empty proper or improper list" },
    // Built-in types
    BuiltinType { name: "term", params: &[], spec: "@type term :: any()", doc: "Same as any()" },
    BuiltinType { name: "arity", params: &[], spec: "@type arity :: 0..255", doc: "Number of arguments of a function" },
    BuiltinType { name: "as_boolean", params: &["t"], spec: "@type as_boolean(t) :: t", doc: "A value of type t used as a truthy or falsy value" },
    BuiltinType { name: "binary", params: &[], spec: "@type binary :: <<_::_*8>>", doc: "A bitstring whose size is divisible by 8" },
    BuiltinType { name: "nonempty_binary", params: &[], spec: "@type nonempty_binary :: <<_::8, _::_*8>>", doc: "A binary of at least one byte" },
    BuiltinType { name: "bitstring", params: &[], spec: "@type bitstring :: <<_::_*1>>", doc: "A sequence of bits" },
    BuiltinType { name: "nonempty_bitstring", params: &[], spec: "@type nonempty_bitstring :: <<_::1, _::_*1>>", doc: "A bitstring of at least one bit" },
    BuiltinType { name: "boolean", params: &[], spec: "@type boolean :: true | false", doc: "The atoms true and false" },
    BuiltinType { name: "byte", params: &[], spec: "@type byte :: 0..255", doc: "An integer between 0 and 255" },
    BuiltinType { name: "char", params: &[], spec: "@type char :: 0..0x10FFFF", doc: "A Unicode code point" },
    BuiltinType { name: "charlist", params: &[], spec: "@type charlist :: [char()]", doc: "A list of characters" },
    BuiltinType { name: "nonempty_charlist", params: &[], spec: "@type nonempty_charlist :: [char(), ...]", doc: "A non-empty list of characters" },
    BuiltinType { name: "fun", params: &[], spec: "@type fun :: (... -> any)", doc: "Any function" },
    BuiltinType { name: "function", params: &[], spec: "@type function :: fun()", doc: "Same as fun()" },
    BuiltinType { name: "identifier", params: &[], spec: "@type identifier :: pid() | port() | reference()", doc: "A process, port or reference identifier" },
    BuiltinType { name: "iodata", params: &[], spec: "@type iodata :: iolist() | binary()", doc: "Data that can be written to an IO device" },
    BuiltinType { name: "iolist", params: &[], spec: "@type iolist :: maybe_improper_list(byte() | binary() | iolist(), binary() | [])", doc: "A possibly nested list of bytes and binaries" },
    BuiltinType { name: "keyword", params: &[], spec: "@type keyword :: [{atom(), any()}]", doc: "A keyword list" },
    BuiltinType { name: "keyword", params: &["t"], spec: "@type keyword(t) :: [{atom(), t}]", doc: "A keyword list with values of type t" },
    BuiltinType { name: "list", params: &[], spec: "@type list :: [any()]", doc: "A list of any terms" },
    BuiltinType { name: "nonempty_list", params: &[], spec: "@type nonempty_list :: nonempty_list(any())", doc: "A non-empty list of any terms" },
    BuiltinType { name: "maybe_improper_list", params: &[], spec: "@type maybe_improper_list :: maybe_improper_list(any(), any())", doc: "A proper or improper list of any terms" },
    BuiltinType { name: "nonempty_maybe_improper_list", params: &[], spec: "@type nonempty_maybe_improper_list :: nonempty_maybe_improper_list(any(), any())", doc: "A non-empty proper or improper list of any terms" },
    BuiltinType { name: "mfa", params: &[], spec: "@type mfa :: {module(), atom(), arity()}", doc: "A module, function and arity triple" },
    BuiltinType { name: "module", params: &[], spec: "@type module :: atom()", doc: "A module name" },
    BuiltinType { name: "no_return", params: &[], spec: "@type no_return :: none()", doc: "Return type of functions that never return" },
    BuiltinType { name: "node", params: &[], spec: "@type node :: atom()", doc: "A node name" },
    BuiltinType { name: "number", params: &[], spec: "@type number :: integer() | float()", doc: "An integer or a float" },
    BuiltinType { name: "timeout", params: &[], spec: "@type timeout :: :infinity | non_neg_integer()", doc: "A timeout in milliseconds or :infinity" },
    BuiltinType { name: "dynamic", params: &[], spec: "@type dynamic :: dynamic()", doc: "A term whose type is checked at runtime" },
];

static CATALOG: Lazy<Vec<IntrospectedType>> = Lazy::new(|| {
    BUILTIN_TYPES
        .iter()
        .map(|builtin| IntrospectedType {
            name: builtin.name.to_string(),
            arity: builtin.params.len(),
            kind: TypeKind::Type,
            spec: builtin.spec.to_string(),
            doc: builtin.doc.to_string(),
            signature: Some(format!("{}({})", builtin.name, builtin.params.join(", "))),
            metadata: BTreeMap::from([("builtin".to_string(), serde_json::Value::Bool(true))]),
        })
        .collect()
});

/// The full builtin catalog
pub fn builtin_types() -> &'static [IntrospectedType] {
    &CATALOG
}

/// Builtin types whose name satisfies `matches`
pub fn find_builtin_types(matches: &dyn Fn(&str) -> bool) -> Vec<IntrospectedType> {
    CATALOG.iter().filter(|ty| matches(&ty.name)).cloned().collect()
}
