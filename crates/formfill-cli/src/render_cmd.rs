use std::path::{Path, PathBuf};

use formfill::{HttpFillBackend, Renderer};

use crate::shared::{load_json, load_registry};

#[allow(clippy::too_many_arguments)]
pub fn run(
    data: &Path,
    mappings: &Path,
    form: &str,
    supplemental: Option<&Path>,
    output: Option<&Path>,
    backend_url: Option<&str>,
    backend_token: Option<&str>,
) -> Result<(), i32> {
    let registry = load_registry(mappings)?;
    let primary = load_json(data)?;
    let supplemental = supplemental.map(load_json).transpose()?;

    let mut renderer = Renderer::new(registry);
    if let Some(url) = backend_url {
        let backend = HttpFillBackend::new(url, backend_token.map(str::to_string)).map_err(|e| {
            eprintln!("Error: invalid backend configuration: {e}");
            1
        })?;
        renderer = renderer.with_backend(Box::new(backend.clone()), Box::new(backend));
    }

    let result = renderer.render(form, &primary, supplemental.as_ref());
    if !result.succeeded {
        eprintln!(
            "Error: render failed: {}",
            result.error_message.as_deref().unwrap_or("unknown error")
        );
        return Err(1);
    }

    let bytes = result.document_bytes.unwrap_or_default();
    let out_path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(result.file_name.as_deref().unwrap_or("output.pdf")),
    };
    std::fs::write(&out_path, &bytes).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", out_path.display());
        1
    })?;

    if result.used_template {
        let (filled, total) = result
            .stats
            .as_ref()
            .map(|s| (s.filled_count, s.total_count))
            .unwrap_or_default();
        println!(
            "Wrote {} (template fill, {filled}/{total} fields)",
            out_path.display()
        );
    } else {
        println!("Wrote {} (fallback summary)", out_path.display());
    }
    if let Some(stats) = &result.stats {
        for name in &stats.skipped_field_names {
            println!("  skipped: {name}");
        }
        for error in &stats.errors {
            println!("  field error: {error}");
        }
    }
    Ok(())
}
