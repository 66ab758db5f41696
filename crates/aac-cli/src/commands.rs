use std::fs;
use std::path::Path;

use aac_board::{BoardConfig, BoardController, ErrorPolicy};
use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.strict)?;
    let format = cli.format;
    match cli.command {
        Command::Show(args) => cmd_show(args, config, format),
        Command::Select(args) => cmd_select(args, config, format),
        Command::Add(args) => cmd_add(args, config, format),
        Command::Check(args) => cmd_check(args, config, format),
        Command::Export(args) => cmd_export(args, config, format),
    }
}

fn load_config(path: Option<&Path>, strict: bool) -> anyhow::Result<BoardConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => BoardConfig::default(),
    };
    if strict {
        config.on_error = ErrorPolicy::Strict;
    }
    Ok(config)
}

fn open_board(path: &Path, config: BoardConfig) -> anyhow::Result<BoardController> {
    debug!(path = %path.display(), policy = ?config.on_error, "opening board");
    BoardController::load_from_file(path, config)
        .with_context(|| format!("failed to load board {}", path.display()))
}

/// Move the cursor into the category called `name` by tapping its selector.
fn enter_category(board: &mut BoardController, name: &str) -> anyhow::Result<()> {
    let Some(selector) = board
        .home()
        .entries()
        .find(|(_, category)| *category == name)
        .map(|(image, _)| image.to_string())
    else {
        bail!("no category named {name:?}");
    };
    board.select(&selector)?;
    Ok(())
}

fn cmd_show(args: ShowArgs, config: BoardConfig, format: OutputFormat) -> anyhow::Result<()> {
    let board = open_board(&args.board, config)?;

    if let Some(name) = &args.category {
        let Some(category) = board.category_by_name(name) else {
            bail!("no category named {name:?}");
        };
        match format {
            OutputFormat::Json => {
                let items: Vec<_> = category
                    .entries()
                    .map(|(image, text)| json!({ "image": image, "text": text }))
                    .collect();
                println!("{}", json!({ "category": name, "items": items }));
            }
            OutputFormat::Text => {
                println!("Category {} ({} items)", name.yellow().bold(), category.len());
                for (image, text) in category.entries() {
                    println!("  {} → {}", image.cyan(), text);
                }
            }
        }
        return Ok(());
    }

    let home = board.home();
    match format {
        OutputFormat::Json => {
            let selectors: Vec<_> = home
                .entries()
                .map(|(image, name)| {
                    let items = board.category_by_name(name).map_or(0, |c| c.len());
                    json!({ "image": image, "category": name, "items": items })
                })
                .collect();
            println!("{}", json!({ "home": selectors }));
        }
        OutputFormat::Text => {
            println!("Home ({} categories)", home.len());
            for (image, name) in home.entries() {
                let items = board.category_by_name(name).map_or(0, |c| c.len());
                println!("  {} → {} ({} items)", image.cyan(), name.yellow(), items);
            }
        }
    }
    Ok(())
}

fn cmd_select(args: SelectArgs, config: BoardConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut board = open_board(&args.board, config)?;
    let mut taps = Vec::new();

    for image in &args.images {
        let spoken = board
            .select(image)
            .with_context(|| format!("cannot select {image}"))?;
        let category = board.category().to_string();
        if format == OutputFormat::Text {
            if spoken.is_empty() {
                println!("{} opened {}", image.cyan(), category.yellow().bold());
            } else {
                println!("{} says {}", image.cyan(), spoken.green().bold());
            }
        }
        taps.push(json!({ "image": image, "spoken": spoken, "category": category }));
    }

    if format == OutputFormat::Json {
        println!("{}", json!({ "taps": taps }));
    }
    Ok(())
}

fn cmd_add(args: AddArgs, config: BoardConfig, format: OutputFormat) -> anyhow::Result<()> {
    // Writing back in place must not drop lines a lenient load skipped.
    let config = match args.output {
        Some(_) => config,
        None => BoardConfig {
            on_error: ErrorPolicy::Strict,
            ..config
        },
    };
    let mut board = open_board(&args.board, config)?;
    let text = args.text.join(" ");

    if let Some(name) = &args.category {
        enter_category(&mut board, name)?;
    }
    board
        .add_item(&args.image, &text)
        .with_context(|| format!("cannot add {}", args.image))?;

    let target = args.output.as_deref().unwrap_or(args.board.as_path());
    board
        .write_to_file(target)
        .with_context(|| format!("failed to write board {}", target.display()))?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "image": args.image,
                "text": text,
                "category": args.category,
                "written": target.display().to_string(),
            })
        ),
        OutputFormat::Text => match &args.category {
            Some(name) => println!(
                "{} Added {} → {} to {}",
                "✓".green().bold(),
                args.image.cyan(),
                text,
                name.yellow()
            ),
            None => println!(
                "{} Added category {} ({})",
                "✓".green().bold(),
                text.yellow(),
                args.image.cyan()
            ),
        },
    }
    Ok(())
}

fn cmd_check(args: CheckArgs, config: BoardConfig, format: OutputFormat) -> anyhow::Result<()> {
    let config = BoardConfig {
        on_error: ErrorPolicy::Strict,
        ..config
    };
    let board = open_board(&args.board, config)?;
    let categories = board.categories().count();
    let items: usize = board.categories().map(|c| c.len()).sum();

    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "ok": true, "categories": categories, "items": items })
        ),
        OutputFormat::Text => {
            println!("{} Board is valid", "✓".green().bold());
            println!("  Categories: {}", categories.to_string().bold());
            println!("  Items: {}", items.to_string().bold());
        }
    }
    Ok(())
}

fn cmd_export(args: ExportArgs, config: BoardConfig, format: OutputFormat) -> anyhow::Result<()> {
    let board = open_board(&args.board, config)?;
    board
        .write_to_file(&args.output)
        .with_context(|| format!("failed to write board {}", args.output.display()))?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "written": args.output.display().to_string() })
        ),
        OutputFormat::Text => println!(
            "{} Exported {} to {}",
            "✓".green().bold(),
            args.board.display(),
            args.output.display().to_string().bold()
        ),
    }
    Ok(())
}
