//! CLI interface using clap
//!
//! Defines all command-line arguments and subcommands.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};

use edrex::core::{
    expand_template, find_in, replace_in, translate_pattern, EngineConfig, EolMode, FindOptions,
    RegexSearch, TextDocument,
};
use edrex::output::json::format_json;
use edrex::output::text::{
    format_expand_result, format_find_result, format_replace_result, format_translate_result,
};

#[derive(Parser)]
#[command(name = "edrex")]
#[command(author, version, about = "Editor-flavored regex find and replace", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Backtracking steps allowed per search before it fails
    #[arg(long, global = true, default_value = "1000000")]
    pub backtrack_limit: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output (default)
    Json,
    /// Human-readable text
    Text,
}

/// Line-ending convention given on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EolArg {
    Lf,
    Cr,
    Crlf,
}

impl From<EolArg> for EolMode {
    fn from(arg: EolArg) -> Self {
        match arg {
            EolArg::Lf => EolMode::Lf,
            EolArg::Cr => EolMode::Cr,
            EolArg::Crlf => EolMode::CrLf,
        }
    }
}

/// Where the document comes from
#[derive(Args, Clone)]
pub struct InputArgs {
    /// Input text (use --file for file input, or pipe to stdin)
    pub input: Option<String>,

    /// File to read the document from
    #[arg(long, short = 'F')]
    pub file: Option<PathBuf>,
}

/// How the pattern is interpreted
#[derive(Args, Clone)]
pub struct PatternArgs {
    /// Case-insensitive matching
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Match whole words only
    #[arg(long, short = 'w')]
    pub whole_word: bool,

    /// Match only at the start of a word
    #[arg(long)]
    pub word_start: bool,

    /// Let `.` match line breaks
    #[arg(long, short = 's')]
    pub dot_all: bool,

    /// Treat the pattern as plain text
    #[arg(long)]
    pub literal: bool,

    /// Line-ending convention (default: detected from the input)
    #[arg(long)]
    pub eol: Option<EolArg>,
}

/// Which part of the document is searched
#[derive(Args, Clone)]
pub struct RangeArgs {
    /// Range start byte offset (default: 0)
    #[arg(long)]
    pub min: Option<usize>,

    /// Range end byte offset (default: end of input)
    #[arg(long)]
    pub max: Option<usize>,

    /// Search backward, reporting the last match in the range
    #[arg(long, short = 'b')]
    pub backward: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the next (or last, with --backward) match of a pattern
    Find {
        /// The editor regex pattern
        pattern: String,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        pattern_args: PatternArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// Report every match in the range
        #[arg(long, short = 'a')]
        all: bool,

        /// Maximum number of matches to return with --all
        #[arg(long, default_value = "100")]
        max_matches: usize,
    },

    /// Replace the next match, or every match with --all
    Replace {
        /// The editor regex pattern
        pattern: String,

        /// The replacement template (supports $1, \1, \n, \t, \xHH, \uHHHH)
        template: String,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        pattern_args: PatternArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// Replace every match in the range
        #[arg(long, short = 'a')]
        all: bool,

        /// Write the result back to --file
        #[arg(long, requires = "file")]
        write: bool,

        /// Disable backup (.bak) creation with --write
        #[arg(long)]
        no_backup: bool,
    },

    /// Show the engine pattern an editor pattern translates to
    Translate {
        /// The editor regex pattern
        pattern: String,

        #[command(flatten)]
        pattern_args: PatternArgs,
    },

    /// Show how a replacement template expands
    Expand {
        /// The replacement template
        template: String,
    },
}

/// Parse CLI arguments
pub fn parse() -> Cli {
    Cli::parse()
}

impl PatternArgs {
    fn find_options(&self, range: &RangeArgs, all: bool, max_matches: usize) -> FindOptions {
        FindOptions {
            min_pos: range.min,
            max_pos: range.max,
            backward: range.backward,
            case_sensitive: !self.ignore_case,
            whole_word: self.whole_word,
            word_start: self.word_start,
            dot_all: self.dot_all,
            literal: self.literal,
            all,
            max_matches,
        }
    }

    fn document(&self, text: String) -> TextDocument {
        let doc = TextDocument::new(text);
        match self.eol {
            Some(eol) => doc.with_eol_mode(eol.into()),
            None => doc,
        }
    }
}

/// Read the document from --file, the positional argument, or stdin
fn read_input(input: &InputArgs, hint: &str) -> anyhow::Result<String> {
    if let Some(path) = &input.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()));
    }
    if let Some(text) = &input.input {
        return Ok(text.clone());
    }

    if io::stdin().is_terminal() {
        eprintln!("edrex: reading from stdin (pipe data or press Ctrl-D when done)");
        eprintln!("  hint: {}", hint);
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

/// Handle the find command
pub fn handle_find(
    pattern: &str,
    input: &InputArgs,
    options: &FindOptions,
    pattern_args: &PatternArgs,
    config: EngineConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let text = read_input(
        input,
        &format!("edrex find '{}' \"text\" or cat file | edrex find '{}'", pattern, pattern),
    )?;
    let doc = pattern_args.document(text);

    let mut search = RegexSearch::with_config(config);
    let result = find_in(&mut search, &doc, pattern, options)?;

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_find_result(&result)),
    }
}

/// Handle the replace command
#[allow(clippy::too_many_arguments)]
pub fn handle_replace(
    pattern: &str,
    template: &str,
    input: &InputArgs,
    options: &FindOptions,
    pattern_args: &PatternArgs,
    write: bool,
    no_backup: bool,
    config: EngineConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let text = read_input(
        input,
        &format!(
            "edrex replace '{}' '{}' \"text\" or cat file | edrex replace '{}' '{}'",
            pattern, template, pattern, template
        ),
    )?;
    let mut doc = pattern_args.document(text);

    let mut search = RegexSearch::with_config(config);
    let mut result = replace_in(&mut search, &mut doc, pattern, template, options)?;

    if write {
        let Some(path) = &input.file else {
            bail!("--write needs --file");
        };
        result.file_path = Some(path.to_string_lossy().into_owned());
        if result.replacements_made > 0 {
            result.backup_path = write_back(path, &result.result, !no_backup)?;
            result.written = true;
        }
    }

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_replace_result(&result)),
    }
}

/// Write `content` to `path`, copying the original to `<path>.bak` first if
/// `backup` is set. Returns the backup path.
fn write_back(path: &Path, content: &str, backup: bool) -> anyhow::Result<Option<String>> {
    let mut backup_path = None;
    if backup {
        let bak = PathBuf::from(format!("{}.bak", path.display()));
        fs::copy(path, &bak).context("Failed to create backup")?;
        backup_path = Some(bak.to_string_lossy().into_owned());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(backup_path)
}

/// Handle the translate command
pub fn handle_translate(
    pattern: &str,
    pattern_args: &PatternArgs,
    config: EngineConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let options = pattern_args.find_options(
        &RangeArgs {
            min: None,
            max: None,
            backward: false,
        },
        false,
        0,
    );
    let eol = pattern_args.eol.map_or(EolMode::Lf, EolMode::from);
    let result = translate_pattern(pattern, &options, eol, &config);

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_translate_result(&result)),
    }
}

/// Handle the expand command
pub fn handle_expand(template: &str, format: OutputFormat) -> anyhow::Result<String> {
    let result = expand_template(template);

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_expand_result(&result)),
    }
}

/// Build find options from parsed arguments
pub fn find_options(
    pattern_args: &PatternArgs,
    range: &RangeArgs,
    all: bool,
    max_matches: usize,
) -> FindOptions {
    pattern_args.find_options(range, all, max_matches)
}
