use std::path::Path;

use formfill::MappingRegistry;
use serde_json::Value;

/// Load mapping configuration from a JSON file or a directory of JSON
/// files, with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr when the path does
/// not exist or does not parse.
pub fn load_registry(path: &Path) -> Result<MappingRegistry, i32> {
    if !path.exists() {
        eprintln!("Error: mappings not found: {}", path.display());
        return Err(1);
    }
    let result = if path.is_dir() {
        MappingRegistry::from_dir(path)
    } else {
        let bytes = std::fs::read(path).map_err(|e| {
            eprintln!("Error: failed to read {}: {e}", path.display());
            1
        })?;
        MappingRegistry::from_json_slice(&bytes)
    };
    result.map_err(|e| {
        eprintln!("Error: failed to load mappings: {e}");
        1
    })
}

/// Load a submission data file as JSON.
pub fn load_json(path: &Path) -> Result<Value, i32> {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        return Err(1);
    }
    let bytes = std::fs::read(path).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", path.display());
        1
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        eprintln!("Error: {} is not valid JSON: {e}", path.display());
        1
    })
}
