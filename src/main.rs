use nerkit::cli::{Cli, Commands, ConfigAction, OutputArgs};
use nerkit::config::{Config, ConfigValidator};
use nerkit::demo;
use nerkit::entities::{extract, extract_by_label, labels, Document};
use nerkit::error::{NerError, Result};
use nerkit::model::{self, ModelHandle};
use nerkit::output;
use std::io::Read;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match cli.command {
        None => {
            let config = load_config(cli.config.as_deref(), cli.model, cli.models_dir)?;
            cmd_demo(&config, &OutputArgs::default())?;
        }
        Some(Commands::Demo { output }) => {
            let config = load_config(cli.config.as_deref(), cli.model, cli.models_dir)?;
            cmd_demo(&config, &output)?;
        }
        Some(Commands::Extract {
            text,
            file,
            label,
            labels,
            output,
        }) => {
            let config = load_config(cli.config.as_deref(), cli.model, cli.models_dir)?;
            cmd_extract(&config, text, file, label, labels, &output)?;
        }
        Some(Commands::Models) => {
            let config = load_config(cli.config.as_deref(), cli.model, cli.models_dir)?;
            cmd_models(&config)?;
        }
        Some(Commands::Config { action }) => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "nerkit=debug" } else { "nerkit=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_handle(config: &Config) -> Result<ModelHandle> {
    let models_dir = resolve_models_dir(config)?;
    model::load_model(&config.model.name, models_dir.as_deref())
}

fn resolve_models_dir(config: &Config) -> Result<Option<PathBuf>> {
    match &config.model.models_dir {
        Some(dir) => expand_path(dir).map(Some),
        None => Ok(Config::default_models_dir().ok()),
    }
}

fn cmd_demo(config: &Config, args: &OutputArgs) -> Result<()> {
    let handle = load_handle(config)?;
    let results = demo::run(&handle)?;
    let show_offsets = args.offsets || config.output.show_offsets;

    if wants_json(config, args) {
        let docs: Vec<(Option<&str>, &Document)> = results
            .iter()
            .map(|(example, doc)| (Some(example.title), doc))
            .collect();
        println!("{}", output::render_json(&docs)?);
    } else {
        for (example, doc) in &results {
            print!("{}", output::render_section(example.title, doc, show_offsets));
        }
    }

    Ok(())
}

fn cmd_extract(
    config: &Config,
    text: Option<String>,
    file: Option<PathBuf>,
    label: Option<String>,
    list_labels: bool,
    args: &OutputArgs,
) -> Result<()> {
    let handle = load_handle(config)?;
    let text = read_input(text, file)?;

    if list_labels {
        for label in labels(&handle, &text)? {
            println!("{}", label);
        }
        return Ok(());
    }

    let doc = match &label {
        Some(label) => Document {
            entities: extract_by_label(&handle, &text, label)?,
            text,
        },
        None => extract(&handle, &text)?,
    };
    tracing::debug!("Extracted {} entities", doc.len());

    if wants_json(config, args) {
        println!("{}", output::render_json(&[(None, &doc)])?);
    } else {
        print!(
            "{}",
            output::render_plain(&doc, args.offsets || config.output.show_offsets)
        );
    }

    Ok(())
}

fn cmd_models(config: &Config) -> Result<()> {
    let models_dir = resolve_models_dir(config)?;
    for name in model::available_models(models_dir.as_deref())? {
        if name == config.model.name {
            println!("{} (selected)", name);
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path.as_deref(), None, None)?;
            let content = toml::to_string_pretty(&config)?;
            println!("{}", content);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
            println!("  Model: {}", config.model.name);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| NerError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(
    config_path: Option<&Path>,
    model: Option<String>,
    models_dir: Option<PathBuf>,
) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };

    let mut config = if path.exists() {
        Config::load(&path)?
    } else {
        if config_path.is_some() {
            return Err(NerError::ConfigNotFound { path });
        }
        tracing::debug!("Config file not found, using defaults");
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    };

    // Flags win over file and environment
    if let Some(model) = model {
        config.model.name = model;
    }
    if let Some(dir) = models_dir {
        config.model.models_dir = Some(dir);
    }
    ConfigValidator::validate(&config)?;

    Ok(config)
}

fn wants_json(config: &Config, args: &OutputArgs) -> bool {
    args.json || config.output.format == "json"
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path).map_err(|e| NerError::Io {
            source: e,
            context: format!("Failed to read input file: {:?}", path),
        });
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| NerError::Io {
            source: e,
            context: "Failed to read standard input".to_string(),
        })?;
    Ok(buf)
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| NerError::Config("Invalid path encoding".to_string()))?;

    if let Some(stripped) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| NerError::Config("Cannot determine home directory".to_string()))?;
        Ok(home.join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}
