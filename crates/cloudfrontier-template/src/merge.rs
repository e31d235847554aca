//! Deep merge of a prepared fragment into a deployment template.

use serde_yaml::Value;

/// Recursively merges `fragment` into `base`.
///
/// Nested mappings merge key by key; scalars and sequences from the
/// fragment overwrite the base value; keys present only in the base are
/// preserved. The fragment is consumed, so a merged document can never be
/// re-merged with stale state.
pub fn deep_merge(base: &mut Value, fragment: Value) {
    match (base, fragment) {
        (Value::Mapping(base_map), Value::Mapping(fragment_map)) => {
            for (key, value) in fragment_map {
                if let Some(slot) = base_map.get_mut(&key) {
                    deep_merge(slot, value);
                } else {
                    let _ = base_map.insert(key, value);
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
