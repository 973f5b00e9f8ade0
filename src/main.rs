// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use the_textkit::backends::local::LocalProcessorFactory;
use the_textkit::capabilities::{
    copy_to_clipboard, processor_download, CommandClipboard, DirectoryDownloadSink, DownloadSink,
};
use the_textkit::config::consts::SETTINGS_FILE;
use the_textkit::config::{
    load_and_validate_config, Config, OutputMode, ProcessorConfig, RuntimeBuilder, Settings,
};
use the_textkit::envelope::ProcessorRequest;
use the_textkit::errors::FailureStrategy;
use the_textkit::storage::{
    BoundedList, HistoryStore, JsonDirStore, SavedItem, SavedItems, PASSWORD_HISTORY_KEY,
    SPEECH_HISTORY_KEY,
};
use the_textkit::tools::catalog;
use the_textkit::tools::password::PasswordHistoryItem;
use the_textkit::traits::{PipelineOutput, Processor};
use the_textkit::utils::flatten_metadata;

#[derive(Parser)]
#[command(name = "textkit")]
#[command(about = "Text tools as composable processors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file path
    #[arg(long, value_name = "FILE", default_value = SETTINGS_FILE)]
    settings: PathBuf,

    /// Print results as JSON regardless of the settings file
    #[arg(long)]
    json: bool,

    /// Directory for `--download` files; overrides the settings file
    #[arg(long, value_name = "DIR")]
    download_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one processor over the text (or stdin)
    Run {
        /// Processor implementation, e.g. case_converter
        impl_name: String,

        /// Processor option as key=value; repeatable
        #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// Keep the result (the tool's report, when it has one) in its saved items
        #[arg(long)]
        save: bool,

        /// Title for the saved item
        #[arg(long, requires = "save")]
        title: Option<String>,

        /// Write the tool's report, or the output, to the download directory;
        /// `--download=NAME` picks the file name
        #[arg(
            long,
            value_name = "FILENAME",
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = ""
        )]
        download: Option<String>,

        /// Copy the output to the system clipboard
        #[arg(long)]
        copy: bool,

        text: Option<String>,
    },

    /// Run a pipeline file over the text (or stdin)
    Pipeline {
        config: PathBuf,
        text: Option<String>,
    },

    /// List the available tools
    List,

    /// Manage saved results
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },

    /// Show a persisted tool history, newest first
    History {
        #[arg(value_enum)]
        tool: HistoryTool,

        /// Delete the history instead of printing it
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum HistoryTool {
    Password,
    Speech,
}

#[derive(Subcommand)]
enum SavedAction {
    /// List saved results of a processor, newest first
    List { impl_name: String },
    /// Print one saved result
    Show { impl_name: String, id: String },
    /// Delete one saved result
    Delete { impl_name: String, id: String },
    /// Delete every saved result of a processor
    Clear { impl_name: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings)
        .with_context(|| format!("Failed to load settings from {}", cli.settings.display()))?;
    if cli.json {
        settings.output = OutputMode::Json;
    }
    if cli.download_dir.is_some() {
        settings.download_dir = cli.download_dir;
    }

    match cli.command {
        Commands::Run {
            impl_name,
            options,
            save,
            title,
            download,
            copy,
            text,
        } => {
            let input = read_input(text)?;
            let (processor, output) = run_single(&settings, &impl_name, &options, &input).await?;
            print_output(&output, settings.output)?;
            let payload = output.payload_text();

            if save || download.is_some() {
                let report =
                    processor_download(processor.as_ref(), &input, &payload, download.as_deref())
                        .await?;
                if save {
                    let mut saved = open_saved(&settings, &impl_name)?;
                    let item = SavedItem::new(
                        title.as_deref(),
                        &input,
                        &report.content,
                        chrono::Utc::now().timestamp_millis(),
                    );
                    eprintln!("Saved as {}", item.id);
                    saved.save(item)?;
                }
                if download.is_some() {
                    let sink = DirectoryDownloadSink::new(
                        settings.download_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
                    );
                    let path = sink.save(&report).await?;
                    eprintln!("Wrote {}", path.display());
                }
            }
            if copy {
                let clipboard = settings
                    .clipboard_command
                    .as_deref()
                    .and_then(CommandClipboard::from_command_line)
                    .unwrap_or_else(CommandClipboard::system);
                eprintln!("{}", copy_to_clipboard(&clipboard, &payload).await.message);
            }
        }
        Commands::Pipeline { config, text } => {
            let input = read_input(text)?;
            let output = run_pipeline(&settings, &config, &input).await?;
            print_output(&output, settings.output)?;
        }
        Commands::List => print_catalog(settings.output)?,
        Commands::Saved { action } => manage_saved(&settings, action)?,
        Commands::History { tool, clear } => show_history(&settings, tool, clear).await?,
    }

    Ok(())
}

/// The positional text, or all of stdin when none was given.
fn read_input(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("No input text given; pass it as an argument or pipe it on stdin");
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer).context("Failed to read stdin")?;
    Ok(buffer)
}

/// Turn `key=value` pairs into processor options. Values are read as YAML
/// scalars so `count=3` and `include_symbols=false` keep their types.
fn parse_options(pairs: &[String]) -> Result<serde_yaml::Mapping> {
    let mut options = serde_yaml::Mapping::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Option '{}' is not in key=value form", pair))?;
        // `separator=-` would otherwise parse as a sequence.
        let value = match serde_yaml::from_str::<serde_yaml::Value>(raw) {
            Ok(scalar @ (serde_yaml::Value::Bool(_)
            | serde_yaml::Value::Number(_)
            | serde_yaml::Value::String(_))) => scalar,
            _ => serde_yaml::Value::String(raw.to_string()),
        };
        options.insert(serde_yaml::Value::String(key.trim().to_string()), value);
    }
    Ok(options)
}

/// Run one processor as a single-step pipeline. Returns the processor too, for
/// its export.
async fn run_single(
    settings: &Settings,
    impl_name: &str,
    pairs: &[String],
    input: &str,
) -> Result<(Arc<dyn Processor>, PipelineOutput)> {
    let config = Config {
        failure_strategy: FailureStrategy::FailFast,
        storage: Some(settings.storage()),
        processors: vec![ProcessorConfig {
            id: impl_name.to_string(),
            impl_: Some(impl_name.to_string()),
            options: parse_options(pairs)?,
        }],
    };
    let (processors, executor, failure_strategy) = RuntimeBuilder::from_config(&config)?;
    let processor = processors
        .get(impl_name)
        .cloned()
        .ok_or_else(|| anyhow!("Unknown local processor implementation: '{}'", impl_name))?;

    let output = executor
        .execute_with_strategy(processors, ProcessorRequest::from_text(input), failure_strategy)
        .await?;
    Ok((processor, output))
}

/// Pipelines without a storage block keep their histories in the settings'
/// storage directory.
async fn run_pipeline(settings: &Settings, config_file: &Path, input: &str) -> Result<PipelineOutput> {
    let start_time = Instant::now();
    let mut config = load_and_validate_config(config_file)?;
    config.storage.get_or_insert_with(|| settings.storage());
    let (processors, executor, failure_strategy) = RuntimeBuilder::from_config(&config)?;

    let output = executor
        .execute_with_strategy(processors, ProcessorRequest::from_text(input), failure_strategy)
        .await?;
    tracing::debug!(elapsed = ?start_time.elapsed(), config = %config_file.display(), "pipeline finished");
    Ok(output)
}

fn print_output(output: &PipelineOutput, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Text => {
            println!("{}", output.payload_text());
            for (key, value) in flatten_metadata(&output.metadata) {
                eprintln!("  {}: {}", key, value);
            }
            for failure in &output.failures {
                eprintln!("! {}", failure);
            }
        }
        OutputMode::Json => {
            let metadata: serde_json::Map<String, serde_json::Value> = flatten_metadata(&output.metadata)
                .into_iter()
                .map(|(key, value)| (key, serde_json::Value::String(value)))
                .collect();
            let failures: Vec<String> = output.failures.iter().map(|f| f.to_string()).collect();
            let document = serde_json::json!({
                "payload": output.payload_text(),
                "metadata": metadata,
                "failures": failures,
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}

fn print_catalog(mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Text => {
            for tool in catalog() {
                println!("{:<18} {:<24} {}", tool.impl_name, tool.name, tool.description);
            }
        }
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(catalog())?),
    }
    Ok(())
}

fn open_saved(settings: &Settings, impl_name: &str) -> Result<SavedItems<JsonDirStore>> {
    if !LocalProcessorFactory::is_implementation_available(impl_name) {
        bail!("Unknown local processor implementation: '{}'", impl_name);
    }
    let store = JsonDirStore::open(&settings.storage_dir)?;
    Ok(SavedItems::open(store, impl_name, settings.max_items))
}

async fn show_history(settings: &Settings, tool: HistoryTool, clear: bool) -> Result<()> {
    let store = HistoryStore::open(&settings.storage_dir, settings.max_items)?;
    let json = settings.output == OutputMode::Json;
    match tool {
        HistoryTool::Password => {
            let entries: BoundedList<PasswordHistoryItem> = if clear {
                store.update(PASSWORD_HISTORY_KEY, BoundedList::clear).await
            } else {
                store.load(PASSWORD_HISTORY_KEY).await
            };
            if json {
                println!("{}", serde_json::to_string_pretty(entries.items())?);
                return Ok(());
            }
            for item in &entries {
                let when = chrono::DateTime::from_timestamp_millis(item.timestamp)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!("{}  {:<11}  {}", when, item.analysis.strength, item.password);
            }
        }
        HistoryTool::Speech => {
            let entries: BoundedList<String> = if clear {
                store.update(SPEECH_HISTORY_KEY, BoundedList::clear).await
            } else {
                store.load(SPEECH_HISTORY_KEY).await
            };
            if json {
                println!("{}", serde_json::to_string_pretty(entries.items())?);
                return Ok(());
            }
            for text in &entries {
                println!("{}", text);
            }
        }
    }
    Ok(())
}

fn manage_saved(settings: &Settings, action: SavedAction) -> Result<()> {
    match action {
        SavedAction::List { impl_name } => {
            let saved = open_saved(settings, &impl_name)?;
            if settings.output == OutputMode::Json {
                println!("{}", serde_json::to_string_pretty(saved.items())?);
                return Ok(());
            }
            if saved.items().is_empty() {
                println!("No saved items for {}", impl_name);
            }
            for item in saved.items() {
                let when = chrono::DateTime::from_timestamp_millis(item.timestamp)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!("{}  {}  {}", item.id, when, item.title);
            }
        }
        SavedAction::Show { impl_name, id } => {
            let saved = open_saved(settings, &impl_name)?;
            let item = saved
                .get(&id)
                .ok_or_else(|| anyhow!("No saved item '{}' for {}", id, impl_name))?;
            if settings.output == OutputMode::Json {
                println!("{}", serde_json::to_string_pretty(item)?);
            } else {
                println!("{}", item.output);
            }
        }
        SavedAction::Delete { impl_name, id } => {
            let mut saved = open_saved(settings, &impl_name)?;
            if !saved.delete(&id)? {
                bail!("No saved item '{}' for {}", id, impl_name);
            }
        }
        SavedAction::Clear { impl_name } => {
            open_saved(settings, &impl_name)?.clear()?;
        }
    }
    Ok(())
}
