use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chordsheet",
    about = concat!("chordsheet v", env!("CARGO_PKG_VERSION"), " - chords over lyrics, in plain text"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./chordsheet.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the result to a file instead of stdout
    #[arg(short, long, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify each line as header, chords, text or empty
    Parse(SheetArgs),
    /// Detect the key a sheet is written in
    Key(SheetArgs),
    /// Transpose a sheet into another key
    Transpose(TransposeArgs),
    /// Transpose up one semitone
    Up(StepArgs),
    /// Transpose down one semitone
    Down(StepArgs),
    /// Print a sheet, optionally transposed or without chords
    Render(RenderArgs),
    /// Copy chords from the first annotated verse and chorus into bare ones
    Fill(SheetArgs),
    /// Convert a ChordPro document into a plain sheet
    Import(SheetArgs),
    /// List the key names that can be used with --to and --from
    Keys,
}

// ---------------------------------------------------------------------------
// Sheet args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SheetArgs {
    /// Sheet to read (default: stdin)
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct TransposeArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,
    /// Key to transpose into
    #[arg(long)]
    pub to: String,
    /// Key the sheet is in (default: detected from the first chord, else C)
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(Args)]
pub struct StepArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,
    /// Key the sheet is in (default: detected from the first chord, else C)
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,
    /// Transpose into this key before rendering
    #[arg(long)]
    pub to: Option<String>,
    /// Key the sheet is in (only used with --to)
    #[arg(long, requires = "to")]
    pub from: Option<String>,
    /// Leave chord lines out
    #[arg(long)]
    pub hide_chords: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_transpose_args() {
        let cli = Cli::try_parse_from([
            "chordsheet", "transpose", "song.txt", "--to", "D", "--from", "C", "--json", "-vv",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        let Commands::Transpose(args) = cli.command else {
            panic!("expected transpose");
        };
        assert_eq!(args.sheet.file, Some(PathBuf::from("song.txt")));
        assert_eq!(args.to, "D");
        assert_eq!(args.from.as_deref(), Some("C"));
    }

    #[test]
    fn test_transpose_requires_target() {
        assert!(Cli::try_parse_from(["chordsheet", "transpose"]).is_err());
    }

    #[test]
    fn test_render_from_needs_to() {
        assert!(Cli::try_parse_from(["chordsheet", "render", "--from", "C"]).is_err());
        assert!(Cli::try_parse_from(["chordsheet", "render", "--hide-chords"]).is_ok());
    }
}
