#![deny(unsafe_code)]
//! CLI binary for typed-gl.
//!
//! Subcommands:
//! - `catalog` -- print every GLSL type keyword and the roles it may fill
//! - `assemble` -- generate vertex and fragment sources from a schema file
//!   and two body templates

mod error;
mod logging;
mod template;

use clap::{Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use template::{render, validate_names, Scope};
use typed_gl_core::shader::{assemble, stage_names};
use typed_gl_core::types::{catalog, CatalogEntry};
use typed_gl_core::{GlConfig, ProgramSchema, ShaderSources};

#[derive(Parser)]
#[command(name = "typed-gl", about = "Typed shader program tooling")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log filter in env_logger syntax; defaults to RUST_LOG, then "warn".
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List type keywords, attribute component counts and role eligibility.
    Catalog,
    /// Generate shader sources for a schema.
    Assemble {
        /// Program schema as a JSON file.
        #[arg(long)]
        schema: PathBuf,

        /// Vertex body template.
        #[arg(long)]
        vertex: PathBuf,

        /// Fragment body template.
        #[arg(long)]
        fragment: PathBuf,

        /// GL configuration as a JSON file; missing keys use defaults.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))
}

fn roles(entry: &CatalogEntry) -> String {
    [
        (entry.attribute, "attribute"),
        (entry.uniform, "uniform"),
        (entry.varying, "varying"),
        (entry.texture, "texture"),
    ]
    .iter()
    .filter(|(eligible, _)| *eligible)
    .map(|(_, role)| *role)
    .collect::<Vec<_>>()
    .join(", ")
}

/// Reads the schema, optional config and both body templates, then
/// generates the two stage sources.
fn assemble_files(
    schema: &Path,
    vertex: &Path,
    fragment: &Path,
    config: Option<&Path>,
) -> Result<ShaderSources, CliError> {
    let schema = ProgramSchema::from_json(&read(schema)?)
        .map_err(|e| CliError::Input(format!("invalid schema JSON: {e}")))?;
    let config = match config {
        Some(path) => GlConfig::from_json(&read(path)?)
            .map_err(|e| CliError::Input(format!("invalid config JSON: {e}")))?,
        None => GlConfig::default(),
    };
    validate_names(&schema)?;

    let (vertex_names, fragment_names) = stage_names(&schema);
    let vertex_body = render(&read(vertex)?, &Scope::vertex(&vertex_names))?;
    let fragment_body = render(&read(fragment)?, &Scope::fragment(&fragment_names))?;
    log::debug!(
        "assembling {} declarations with {} precision",
        schema.len(),
        config.precision
    );

    Ok(assemble(&schema, |_| vertex_body, |_| fragment_body, &config))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Catalog => {
            let entries = catalog();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{:<10} {:>10}  roles", "type", "components");
                for entry in &entries {
                    let components = entry
                        .components
                        .map_or_else(|| "-".to_string(), |n| n.to_string());
                    println!("{:<10} {:>10}  {}", entry.keyword, components, roles(entry));
                }
            }
        }
        Command::Assemble {
            schema,
            vertex,
            fragment,
            config,
        } => {
            let sources = assemble_files(&schema, &vertex, &fragment, config.as_deref())?;

            if cli.json {
                let info = serde_json::json!({
                    "vertex": sources.vertex,
                    "fragment": sources.fragment,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("// vertex\n{}\n", sources.vertex);
                println!("// fragment\n{}", sources.fragment);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.log.as_deref());
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
