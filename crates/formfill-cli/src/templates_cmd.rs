use formfill::HttpFillBackend;

use crate::cli::OutputFormat;

pub fn run(backend_url: &str, backend_token: Option<&str>, format: &OutputFormat) -> Result<(), i32> {
    let backend =
        HttpFillBackend::new(backend_url, backend_token.map(str::to_string)).map_err(|e| {
            eprintln!("Error: invalid backend configuration: {e}");
            1
        })?;
    let templates = backend.templates().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match format {
        OutputFormat::Text => {
            for form_type in &templates {
                println!("{form_type}");
            }
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({ "templates": templates });
            println!("{}", serde_json::to_string(&obj).map_err(|_| 1)?);
        }
    }
    Ok(())
}
