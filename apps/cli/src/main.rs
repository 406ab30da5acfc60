//! tsgen - transpile type models to TypeScript
//!
//! Usage:
//!   tsgen --model types.json [--docs Assembly.xml]... [--templates dir] [--config tsgen.yaml] --out generated

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use tsgen_transpiler::{
    transpile_model_file, GeneratorConfig, PropertyNaming, TranspileOptions, UnresolvedTypePolicy,
};

#[derive(Parser, Debug)]
#[clap(name = "tsgen")]
#[clap(about = "Transpile type models to TypeScript interface declarations", version)]
struct Args {
    /// JSON type model document
    #[clap(short, long)]
    model: PathBuf,

    /// XML documentation file (repeatable; later files override earlier ones)
    #[clap(short, long = "docs")]
    docs: Vec<PathBuf>,

    /// Directory with `*.template` files overriding the built-in templates
    #[clap(short, long)]
    templates: Option<PathBuf>,

    /// YAML generator configuration
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Type to transpile, by full or simple name (repeatable; default: all types)
    #[clap(long)]
    types: Vec<String>,

    /// Output directory
    #[clap(short, long)]
    out: PathBuf,

    /// Do not emit documentation comments
    #[clap(long)]
    no_docs: bool,

    /// Spell property names in camelCase
    #[clap(long)]
    camel_case: bool,

    /// Emit `any` for unresolved types instead of failing
    #[clap(long)]
    allow_unresolved: bool,

    /// Verbose logging
    #[clap(short, long)]
    verbose: bool,
}

impl Args {
    /// Configuration file (if any) with command line overrides applied
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let yaml = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                GeneratorConfig::from_yaml(&yaml)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GeneratorConfig::default(),
        };

        if self.no_docs {
            config = config.generate_docs(false);
        }
        if self.camel_case {
            config = config.property_naming(PropertyNaming::CamelCase);
        }
        if self.allow_unresolved {
            config = config.unresolved_types(UnresolvedTypePolicy::Any);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let options = TranspileOptions {
        model: args.model.clone(),
        documentation: args.docs.clone(),
        templates: args.templates.clone(),
        types: args.types.clone(),
        config: args.generator_config()?,
    };

    info!(model = %options.model.display(), "Transpiling type model");

    let result = transpile_model_file(&options, &args.out)?;

    let edges = result.dependency_edges().count();
    let self_referencing = result
        .code_fragments()
        .iter()
        .filter(|f| f.is_self_referencing())
        .count();
    info!(
        fragments = result.len(),
        dependencies = edges,
        self_referencing,
        out = %args.out.display(),
        "Done"
    );

    Ok(())
}
