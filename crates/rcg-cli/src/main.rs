use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use rcg_core::config::{self, CONFIG_FILE_NAME, RcgConfig};
use rcg_core::ir::ServiceSpec;
use rcg_core::load::{HttpFetcher, SpecLoader};
use rcg_core::{CodeGenerator, GeneratedFile};
use rcg_python_client::{PythonClientConfig, PythonClientGenerator};

#[derive(Parser)]
#[command(name = "rcg", about = "REST client generator for OpenAPI and Swagger specs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Python client for a service
    Generate {
        #[command(flatten)]
        spec: SpecArgs,

        /// Emit async methods over httpx.AsyncClient
        #[arg(long)]
        async_mode: bool,

        /// Only generate clients for these tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        api_tags: Vec<String>,

        /// Directory with templates overriding the embedded ones
        #[arg(long)]
        templates_dir: Option<PathBuf>,

        /// Root directory of generated clients
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Print a summary of the parsed service
    Inspect {
        #[command(flatten)]
        spec: SpecArgs,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new rcg configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(clap::Args)]
struct SpecArgs {
    /// URL or local path of the OpenAPI/Swagger document
    #[arg(short, long)]
    url: String,

    /// Service name; names the package and the cache file
    #[arg(short, long)]
    service_name: String,
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("rcg=info"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            spec,
            async_mode,
            api_tags,
            templates_dir,
            output_dir,
        } => {
            let mut cfg = load_config()?;
            if let Some(dir) = output_dir {
                cfg.output_dir = dir;
            }
            if templates_dir.is_some() {
                cfg.templates_dir = templates_dir;
            }
            cmd_generate(&spec, &cfg, async_mode, &api_tags)
        }

        Commands::Inspect { spec, format } => cmd_inspect(&spec, &load_config()?, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "rcg", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the project config from the current directory, or the defaults.
fn load_config() -> Result<RcgConfig> {
    let cfg = config::load_config(Path::new(CONFIG_FILE_NAME))?;
    Ok(cfg.unwrap_or_default())
}

/// Load, normalize and parse the service document.
fn load_service(spec: &SpecArgs, cfg: &RcgConfig, api_tags: &[String]) -> Result<ServiceSpec> {
    let fetcher = HttpFetcher::new(&cfg.fetch)?;
    let loader = SpecLoader::new(fetcher, &cfg.cache_dir);
    let loaded = loader.load(&spec.url, &spec.service_name)?;
    log::debug!("loaded '{}' from {:?}", spec.service_name, loaded.source);

    let parser = rcg_core::transform::Parser::new(&cfg.parser);
    Ok(parser.parse(&loaded.spec, &spec.service_name, api_tags))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    spec: &SpecArgs,
    cfg: &RcgConfig,
    async_mode: bool,
    api_tags: &[String],
) -> Result<()> {
    let service = load_service(spec, cfg, api_tags)?;
    let generator_config = PythonClientConfig {
        async_mode,
        templates_dir: cfg.templates_dir.clone(),
        ..PythonClientConfig::default()
    };
    let files = PythonClientGenerator.generate(&service, &generator_config)?;

    write_files(&cfg.output_dir, &files)?;
    log::info!(
        "generated {} files for '{}' in {}",
        files.len(),
        service.service_name,
        cfg.output_dir.display()
    );
    Ok(())
}

fn cmd_inspect(spec: &SpecArgs, cfg: &RcgConfig, format: InspectFormat) -> Result<()> {
    let service = load_service(spec, cfg, &[])?;
    let summary = build_inspect_summary(&service);

    match format {
        InspectFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&summary)?),
        InspectFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn build_inspect_summary(service: &ServiceSpec) -> serde_json::Value {
    let handlers: Vec<serde_json::Value> = service
        .handlers
        .iter()
        .map(|handler| {
            serde_json::json!({
                "operation_id": handler.operation_id,
                "method": handler.method.as_str(),
                "path": handler.raw_path,
                "tags": handler.tags,
                "request_model": handler.request_model(),
                "success_response": handler.success_response().map(|(_, model)| model),
                "deprecated": handler.deprecated,
            })
        })
        .collect();

    serde_json::json!({
        "service_name": service.service_name,
        "info": service.info,
        "tags": service.all_tags,
        "tag_descriptions": service.tag_descriptions,
        "handlers": handlers,
        "models": service.all_models(),
        "request_models": service.request_models(),
        "response_models": service.response_models(),
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    log::info!("created {}", config_path.display());
    Ok(())
}
