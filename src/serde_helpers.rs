//! Serde helpers for request fixtures
//!
//! JSON objects only take string keys, so the file type index (keyed by
//! module, name and arity) is written as a flat sequence of entries instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::completion::metadata::{FileTypeInfo, ModuleName, TypeKey};

#[derive(Serialize)]
struct TypeEntryRef<'a> {
    module: &'a ModuleName,
    #[serde(flatten)]
    info: &'a FileTypeInfo,
}

#[derive(Deserialize)]
struct TypeEntry {
    module: ModuleName,
    #[serde(flatten)]
    info: FileTypeInfo,
}

/// Serialize the type index as `[{"module": ..., "name": ..., ...}]`
pub fn serialize_type_index<S>(
    index: &BTreeMap<TypeKey, FileTypeInfo>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(index.len()))?;
    for (key, info) in index {
        seq.serialize_element(&TypeEntryRef { module: &key.module, info })?;
    }
    seq.end()
}

/// Deserialize the type index; the key arity is derived from the parameter list
pub fn deserialize_type_index<'de, D>(deserializer: D) -> Result<BTreeMap<TypeKey, FileTypeInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<TypeEntry> = Vec::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| {
            let key = TypeKey {
                module: entry.module,
                name: entry.info.name.clone(),
                arity: entry.info.arity(),
            };
            (key, entry.info)
        })
        .collect())
}
