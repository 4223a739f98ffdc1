//! Print the OpenAPI document as JSON or YAML.

use std::io::Write;
use std::process::ExitCode;

use backend::doc::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

/// Dump the profile API's OpenAPI document to stdout.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump")]
struct Args {
    /// Emit YAML instead of pretty-printed JSON.
    #[arg(long)]
    yaml: bool,
}

fn render(args: &Args) -> Result<String, String> {
    let doc = ApiDoc::openapi();
    if args.yaml {
        doc.to_yaml().map_err(|e| e.to_string())
    } else {
        doc.to_pretty_json().map_err(|e| e.to_string())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match render(&args) {
        Ok(text) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{text}") {
                eprintln!("failed to write OpenAPI document: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to serialise OpenAPI document: {e}");
            ExitCode::FAILURE
        }
    }
}
