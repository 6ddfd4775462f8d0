use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::sheet_io;
use crate::model::key::{KeyNotFound, get_delta, key_by_name, step_key};
use crate::model::{KEYS, Key, Line, RenderConfig, SELECTABLE_KEYS, SheetConfig};
use crate::ops::{fill, key_detect, transpose};
use crate::ops::transpose::Transposition;
use crate::parse::{chordpro, sheet_parser, sheet_serializer};

/// Key assumed when `--from` is missing and the sheet has no chords
const FALLBACK_KEY: &str = "C";

/// Settings shared by every command
struct Context {
    json: bool,
    output: Option<PathBuf>,
    config: SheetConfig,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref(), &cwd)?;
    let ctx = Context {
        json: cli.json,
        output: cli.output,
        config,
    };

    match cli.command {
        // Read commands
        Commands::Parse(args) => cmd_parse(args, &ctx),
        Commands::Key(args) => cmd_key(args, &ctx),
        Commands::Keys => cmd_keys(&ctx),

        // Transforming commands
        Commands::Transpose(args) => cmd_transpose(args, &ctx),
        Commands::Up(args) => cmd_step(args, 1, &ctx),
        Commands::Down(args) => cmd_step(args, -1, &ctx),
        Commands::Render(args) => cmd_render(args, &ctx),
        Commands::Fill(args) => cmd_fill(args, &ctx),
        Commands::Import(args) => cmd_import(args, &ctx),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_sheet(args: &SheetArgs) -> Result<String, sheet_io::SheetIoError> {
    sheet_io::read_sheet(args.file.as_deref())
}

/// Write plain text, or the JSON form when --json is set
fn emit<T: serde::Serialize>(
    ctx: &Context,
    text: &str,
    json: impl FnOnce() -> T,
) -> Result<(), Box<dyn std::error::Error>> {
    if ctx.json {
        let out = serde_json::to_string_pretty(&json())?;
        sheet_io::write_output(ctx.output.as_deref(), &out)?;
    } else {
        sheet_io::write_output(ctx.output.as_deref(), text)?;
    }
    Ok(())
}

/// The key a sheet is in: `--from` if given, else its first chord, else C
fn source_key(from: Option<&str>, lines: &[Line]) -> Result<&'static Key, KeyNotFound> {
    if let Some(name) = from {
        return key_by_name(name);
    }
    match key_detect::original_key(lines) {
        Some(root) => {
            log::debug!("detected source key {root}");
            key_by_name(root)
        }
        None => {
            log::debug!("no chords found, assuming {FALLBACK_KEY}");
            key_by_name(FALLBACK_KEY)
        }
    }
}

fn file_name(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_parse(args: SheetArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_sheet(&args)?;
    let lines = sheet_parser::parse_song_text_with(&raw, &ctx.config.classify);

    let mut text = String::new();
    for (i, line) in lines.iter().enumerate() {
        let body = match line {
            Line::Header { content } => {
                format!("{content}  [{}]", sheet_parser::header_type(content))
            }
            Line::Chords { tokens } => sheet_serializer::render_chord_line(tokens),
            Line::Text { content } => content.clone(),
            Line::Empty => String::new(),
        };
        text.push_str(format!("{:>4}  {:<6}  {}", i + 1, line.kind(), body).trim_end());
        text.push('\n');
    }

    emit(ctx, &text, || {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| LineJson {
                number: i + 1,
                line,
                section: match line {
                    Line::Header { content } => Some(sheet_parser::header_type(content)),
                    _ => None,
                },
            })
            .collect::<Vec<_>>()
    })
}

fn cmd_key(args: SheetArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_sheet(&args)?;
    let lines = sheet_parser::parse_song_text_with(&raw, &ctx.config.classify);
    let root = key_detect::original_key(&lines);

    if ctx.json {
        return emit(ctx, "", || DetectedKeyJson {
            root: root.map(str::to_string),
            key: root.and_then(|r| key_by_name(r).ok()).map(KeyJson::from),
        });
    }
    let root = root.ok_or("no chords found")?;
    sheet_io::write_output(ctx.output.as_deref(), root)?;
    Ok(())
}

fn cmd_keys(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let keys: Vec<&'static Key> = SELECTABLE_KEYS
        .iter()
        .filter_map(|name| KEYS.iter().find(|k| k.name == *name))
        .collect();
    let text = SELECTABLE_KEYS.join("\n");
    emit(ctx, &text, || {
        keys.iter().map(|k| KeyJson::from(*k)).collect::<Vec<_>>()
    })
}

// ---------------------------------------------------------------------------
// Transforming commands
// ---------------------------------------------------------------------------

fn cmd_transpose(args: TransposeArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_sheet(&args.sheet)?;
    let lines = sheet_parser::parse_song_text_with(&raw, &ctx.config.classify);
    let from = source_key(args.from.as_deref(), &lines)?;
    let target = key_by_name(&args.to)?;
    let transposition = Transposition::new(get_delta(from, target), target);
    write_transposed(&raw, from, transposition, ctx)
}

fn cmd_step(args: StepArgs, steps: i32, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_sheet(&args.sheet)?;
    let lines = sheet_parser::parse_song_text_with(&raw, &ctx.config.classify);
    let from = source_key(args.from.as_deref(), &lines)?;
    let target = step_key(from, steps);
    let transposition = Transposition::new(get_delta(from, target), target);
    write_transposed(&raw, from, transposition, ctx)
}

fn write_transposed(
    raw: &str,
    from: &Key,
    transposition: Transposition,
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("transposing {from} -> {}", transposition.target);
    let content = transpose::transpose_sheet(
        raw,
        transposition,
        &ctx.config.classify,
        &ctx.config.transpose,
    )?;
    emit(ctx, &content, || TransposeJson {
        from: from.name.to_string(),
        to: transposition.target.name.to_string(),
        delta: transposition.delta,
        content: content.clone(),
    })
}

fn cmd_render(args: RenderArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_sheet(&args.sheet)?;
    let mut lines = sheet_parser::parse_song_text_with(&raw, &ctx.config.classify);

    let mut key = None;
    if let Some(to) = args.to.as_deref() {
        let from = source_key(args.from.as_deref(), &lines)?;
        let target = key_by_name(to)?;
        let transposition = Transposition::new(get_delta(from, target), target);
        lines = transpose::transpose_lines(&lines, transposition, &ctx.config.transpose)?;
        key = Some(target.name.to_string());
    }

    let render = RenderConfig {
        hide_chords: args.hide_chords || ctx.config.render.hide_chords,
    };
    let content = sheet_serializer::serialize_lines(&lines, &render);
    emit(ctx, &content, || RenderJson {
        key: key.clone(),
        hide_chords: render.hide_chords,
        content: content.clone(),
    })
}

fn cmd_fill(args: SheetArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_sheet(&args)?;
    let content = fill::fill_missing_chords_with(&raw, &ctx.config.classify);
    emit(ctx, &content, || ContentJson {
        content: content.clone(),
    })
}

fn cmd_import(args: SheetArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_sheet(&args)?;
    let name = file_name(args.file.as_deref());
    let parsed = chordpro::parse_chord_pro(&raw, name.as_deref());
    if let Some(title) = &parsed.name {
        log::info!("imported {title:?}");
    }
    emit(ctx, &parsed.content, || parsed.clone())
}
