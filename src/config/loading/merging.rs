use toml::{Value, map::Map};

/// Merges imported board files beneath the importing file.
///
/// Imports are folded in listing order, so a later import overrides an
/// earlier one; the importing file overrides them all.
pub(super) fn merge_toml_configs(imports: Vec<Value>, main: Value) -> Value {
    let merged_imports = imports
        .into_iter()
        .fold(Value::Table(Map::new()), merge_two_toml_configs);

    let mut merged = merge_two_toml_configs(merged_imports, main);
    if let Value::Table(table) = &mut merged {
        table.remove("imports");
    }
    merged
}

/// Deep merges two TOML values; tables merge key by key, anything else is
/// replaced by the overlay.
pub(super) fn merge_two_toml_configs(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(mut merged_table)) => {
            for (key, base_value) in base_table {
                let value = match merged_table.remove(&key) {
                    None => base_value,
                    Some(overlay_value) => merge_two_toml_configs(base_value, overlay_value),
                };
                merged_table.insert(key, value);
            }

            Value::Table(merged_table)
        }
        (_, overlay) => overlay,
    }
}
