use std::path::Path;

use formfill::build_field_data;

use crate::cli::OutputFormat;
use crate::shared::{load_json, load_registry};

pub fn run(data: &Path, mappings: &Path, form: &str, format: &OutputFormat) -> Result<(), i32> {
    let registry = load_registry(mappings)?;
    let Some(set) = registry.get(form) else {
        eprintln!("Error: no mapping set for form type '{form}'");
        return Err(1);
    };
    if set.fields.is_empty() {
        eprintln!("Error: form type '{form}' has no template field mappings");
        return Err(1);
    }
    let application = load_json(data)?;
    let field_data = build_field_data(&set.fields, &application);

    match format {
        OutputFormat::Text => {
            for (name, value) in &field_data.values {
                println!("{name}\t{value}");
            }
            for name in &field_data.skipped {
                println!("# skipped: {name}");
            }
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "formType": form,
                "fields": field_data.values,
                "skipped": field_data.skipped,
            });
            println!("{}", serde_json::to_string_pretty(&obj).map_err(|_| 1)?);
        }
    }
    Ok(())
}
