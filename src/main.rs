use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use oktools::detect::detect_content_type;
use oktools::host::{HostMessage, Workbench, relay};
use oktools::storage::{JsonFileStore, PreferenceStore, Theme};
use oktools::tools::{LocalToolRouter, Tool, ToolCatalog, ToolCategory, ToolOptions, ToolResult};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging(level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oktools")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("oktools.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins over the configured level
    let mut builder = env_logger::Builder::new();
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn open_workbench(config: &Config) -> Result<Workbench<JsonFileStore>> {
    let store = JsonFileStore::open(&config.storage.state_dir).context(format!(
        "Failed to open preferences in {}",
        config.storage.state_dir.display()
    ))?;
    let router = LocalToolRouter::new(ToolCatalog::with_builtins()).with_defaults(config.tool_defaults());
    Ok(Workbench::open(router, store))
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if !config.output.color {
        colored::control::set_override(false);
    }

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let mut bench = open_workbench(config)?;

    match &cli.command {
        None => handle_list_command(&bench, None, None),
        Some(Commands::List { category, search }) => {
            handle_list_command(&bench, category.as_deref(), search.as_deref())
        }
        Some(Commands::Info { tool }) => handle_info_command(&bench, tool),
        Some(Commands::Run {
            tool,
            input,
            file,
            options,
        }) => handle_run_command(&mut bench, tool, input.as_deref(), file.as_deref(), options),
        Some(Commands::Last { run }) => handle_last_command(&bench, *run),
        Some(Commands::Detect { text }) => handle_detect_command(&bench, text),
        Some(Commands::Message { json }) => handle_message_command(&mut bench, json),
        Some(Commands::Theme { value }) => handle_theme_command(&bench, value.as_deref()),
    }
}

fn print_tool(tool: &dyn Tool) {
    println!(
        "  {} {:<18} {} {}",
        tool.icon(),
        tool.id().cyan(),
        tool.name().bold(),
        format!("- {}", tool.description()).dimmed()
    );
}

fn handle_list_command<S: PreferenceStore>(
    bench: &Workbench<S>,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    info!("Listing tools - category: {:?}, search: {:?}", category, search);
    let catalog = bench.router().catalog();

    let category = match category {
        Some(name) => match ToolCategory::from_str(name) {
            Some(c) => Some(c),
            None => bail!("Unknown category: {}", name),
        },
        None => None,
    };

    let matches: Option<HashSet<&'static str>> = match search {
        Some(query) => Some(
            bench
                .search(query)
                .context("Failed to record search")?
                .iter()
                .map(|t| t.id())
                .collect(),
        ),
        None => None,
    };

    let mut shown = 0;
    for (group, tools) in catalog.grouped() {
        if category.is_some_and(|c| c != group) {
            continue;
        }
        let tools: Vec<&dyn Tool> = tools
            .into_iter()
            .filter(|t| matches.as_ref().is_none_or(|m| m.contains(t.id())))
            .collect();
        if tools.is_empty() {
            continue;
        }
        println!("{} {}", group.icon(), group.display_name().green().bold());
        for tool in &tools {
            print_tool(*tool);
        }
        shown += tools.len();
    }

    if shown == 0 {
        println!("{}", "No tools found".yellow());
    }
    Ok(())
}

fn handle_info_command<S: PreferenceStore>(bench: &Workbench<S>, tool_id: &str) -> Result<()> {
    info!("Showing tool: {}", tool_id);
    let tool = bench.router().catalog().require(tool_id)?;
    print!("{}", tool.render());
    println!("  category: {} {}", tool.category().icon(), tool.category().display_name());
    Ok(())
}

/// Option values of the form `@path` are read from that file
fn resolve_options(pairs: &[(String, String)]) -> Result<ToolOptions> {
    let mut options = ToolOptions::new();
    for (key, value) in pairs {
        let value = match value.strip_prefix('@') {
            Some(path) => {
                let content = fs::read_to_string(path).context(format!("Failed to read option '{}' from {}", key, path))?;
                content.trim_end_matches(['\r', '\n']).to_string()
            }
            None => value.clone(),
        };
        options.insert(key.clone(), value);
    }
    Ok(options)
}

fn read_input(input: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = input {
        return Ok(text.to_string());
    }
    if let Some(path) = file {
        return fs::read_to_string(path).context(format!("Failed to read input from {}", path.display()));
    }
    io::read_to_string(io::stdin()).context("Failed to read input from stdin")
}

/// Successful output goes to stdout; a failed tool becomes the command's error
fn print_result(result: &ToolResult) -> Result<()> {
    match result.copy_text() {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => bail!("{}", result.content),
    }
}

fn handle_run_command<S: PreferenceStore>(
    bench: &mut Workbench<S>,
    tool_id: &str,
    input: Option<&str>,
    file: Option<&Path>,
    options: &[(String, String)],
) -> Result<()> {
    info!("Running tool: {}", tool_id);
    let options = resolve_options(options)?;
    // fail on an unknown id before blocking on stdin
    bench.router().catalog().require(tool_id)?;
    let input = read_input(input, file)?;
    let result = bench.open_tool(tool_id, &input, options)?;
    print_result(&result)
}

fn handle_last_command<S: PreferenceStore>(bench: &Workbench<S>, run: bool) -> Result<()> {
    let Some(tool) = bench.current() else {
        println!("{}", "No tool used yet".yellow());
        return Ok(());
    };
    let tool_id = tool.id();

    println!("{} {}", "Last used:".green(), tool_id);
    if run {
        let input = read_input(None, None)?;
        let result = bench.run(&input, ToolOptions::new())?;
        print_result(&result)?;
    } else {
        print!("{}", tool.render());
    }
    Ok(())
}

fn handle_detect_command<S: PreferenceStore>(bench: &Workbench<S>, text: &str) -> Result<()> {
    let kind = detect_content_type(text);
    info!("Detected content type: {}", kind);
    println!("{} {}", "Detected:".green(), kind);

    match kind.suggested_tool().and_then(|id| bench.router().catalog().get(id)) {
        Some(tool) => println!("{} {} {} ({})", "Suggested:".green(), tool.icon(), tool.name(), tool.id()),
        None => println!("{} none", "Suggested:".green()),
    }
    Ok(())
}

fn handle_message_command<S: PreferenceStore>(bench: &mut Workbench<S>, json: &str) -> Result<()> {
    let mut message = HostMessage::parse(json)?;
    if let Some(relayed) = relay(&message) {
        println!("{} {}", "Relayed:".cyan(), relayed.to_json()?);
        message = relayed;
    }

    let result = bench.handle(&message)?;
    println!("{} {}", "Opened:".green(), message.tool_id());
    if let Some(result) = result {
        print_result(&result)?;
    }
    Ok(())
}

fn handle_theme_command<S: PreferenceStore>(bench: &Workbench<S>, value: Option<&str>) -> Result<()> {
    let theme = match value {
        None => bench.theme()?,
        Some(v) if v.eq_ignore_ascii_case("toggle") => bench.toggle_theme()?,
        Some(v) => match Theme::from_str(v) {
            Some(theme) => bench.set_theme(theme)?,
            None => bail!("Unknown theme: {} (expected light, dark or toggle)", v),
        },
    };
    println!("{} {}", "Theme:".green(), theme);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
