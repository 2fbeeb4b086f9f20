mod cli;
mod fields_cmd;
mod render_cmd;
mod shared;
mod templates_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Render {
            ref data,
            ref mappings,
            ref form,
            ref supplemental,
            ref output,
            ref backend_url,
            ref backend_token,
        } => render_cmd::run(
            data,
            mappings,
            form,
            supplemental.as_deref(),
            output.as_deref(),
            backend_url.as_deref(),
            backend_token.as_deref(),
        ),
        cli::Commands::Fields {
            ref data,
            ref mappings,
            ref form,
            ref format,
        } => fields_cmd::run(data, mappings, form, format),
        cli::Commands::Templates {
            ref backend_url,
            ref backend_token,
            ref format,
        } => templates_cmd::run(backend_url, backend_token.as_deref(), format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
