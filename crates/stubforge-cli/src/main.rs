//! stubforge CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use stubforge_core::{
    generator::hydrator_classes, Config, Namer, OpenApiContext, TemplateKind,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stubforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate handlers, hydrators and the route table from an OpenAPI spec
    Generate(GenerateArgs),
    /// Print the hydrator/model class pairs of a spec as JSON
    Hydrators {
        /// Path or URL to the OpenAPI spec (YAML or JSON)
        #[arg(long)]
        spec: String,
        /// Base namespace of the generated code
        #[arg(long)]
        namespace: String,
        /// Template kind deciding the namespace separator (rust, php)
        #[arg(long, default_value = "rust")]
        template_kind: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Configuration file (YAML, or JSON by extension); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Path or URL to the OpenAPI spec (YAML or JSON)
    ///
    /// Example: --spec path/to/openapi.yaml
    /// Example: --spec https://example.com/openapi.json
    #[arg(long)]
    spec: Option<String>,
    /// Base namespace of the generated code
    #[arg(long)]
    namespace: Option<String>,
    /// Output directory for handlers and hydrators
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Directory receiving the route table (default: <output-dir>/config)
    #[arg(long)]
    config_dir: Option<PathBuf>,
    /// Template kind (rust, php)
    #[arg(long)]
    template_kind: Option<String>,
    /// Custom template directory containing one sub-directory per kind
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Ignore file listing artifacts that must not be written
    #[arg(long)]
    ignore_file: Option<PathBuf>,
    /// Overwrite files that already exist
    #[arg(long)]
    force: bool,
}

impl GenerateArgs {
    /// Merge the flags over the configuration file, if any
    async fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::new(
                self.spec.clone().context("--spec is required without --config")?,
                self.namespace
                    .clone()
                    .context("--namespace is required without --config")?,
                self.output_dir
                    .as_ref()
                    .context("--output-dir is required without --config")?
                    .to_string_lossy(),
            ),
        };

        if let Some(spec) = self.spec {
            config.spec = spec;
        }
        if let Some(namespace) = self.namespace {
            config.namespace = namespace;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir.to_string_lossy().into_owned();
        }
        if let Some(config_dir) = self.config_dir {
            config.config_dir = Some(config_dir.to_string_lossy().into_owned());
        }
        if let Some(template_kind) = self.template_kind {
            config.template_kind = template_kind;
        }
        if let Some(template_dir) = self.template_dir {
            config.template_dir = Some(template_dir.to_string_lossy().into_owned());
        }
        if let Some(ignore_file) = self.ignore_file {
            config.ignore_file = Some(ignore_file.to_string_lossy().into_owned());
        }
        config.overwrite |= self.force;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => {
            let config = args.into_config().await?;
            tracing::debug!(?config, "Resolved configuration");

            let report = stubforge_core::generate(&config)
                .await
                .with_context(|| format!("Failed to generate from {}", config.spec))?;

            for handler in &report.handlers {
                println!("handler   {handler}");
            }
            for hydrator in &report.hydrators {
                println!("hydrator  {hydrator}");
            }
            if report.routes_written {
                println!("routes    {}", config.config_dir().display());
            }
        }
        Commands::Hydrators {
            spec,
            namespace,
            template_kind,
        } => {
            let kind: TemplateKind = template_kind
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid template kind '{template_kind}': {e}"))?;
            let spec = OpenApiContext::from_file_or_url(&spec)
                .await
                .with_context(|| format!("Failed to load OpenAPI spec {spec}"))?;

            let classes = hydrator_classes(
                &Namer::new(kind.namespace_separator()),
                spec.document(),
                &namespace,
            );
            println!("{}", serde_json::to_string_pretty(&classes)?);
        }
    }

    Ok(())
}
