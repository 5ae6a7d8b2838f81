use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use mccmd::Tool;
use mccmd::core::command::{self, BookSpec, SignSpec, TitleSlot};
use mccmd::core::config::{self, CliOverrides, ResolvedConfig};
use mccmd::core::history::{self, HistoryEntry};
use mccmd::core::legacy::{DEFAULT_PREFIXES, parse_legacy};
use mccmd::core::selector::Target;
use mccmd::core::text::drop_empty;
use mccmd::{SerializeOptions, TextSegment, VersionTier, serialize};

#[derive(Parser)]
#[command(
    name = "mccmd",
    version,
    about = "Minecraft text component and command generator"
)]
struct Cli {
    /// Minecraft version or tier (e.g. 1.20.4, 1.16+)
    #[arg(short = 'm', long = "mc-version", global = true)]
    mc_version: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Don't record generated commands
    #[arg(long, global = true)]
    no_history: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive editor (default)
    Edit,
    /// Print the text component
    Json {
        #[command(flatten)]
        input: InputArgs,
        /// Wrap runs as ["", ...]
        #[arg(long)]
        array: bool,
    },
    /// /tellraw command
    Tellraw {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        target: Option<String>,
        #[arg(long)]
        array: bool,
    },
    /// /title command, optionally preceded by its timing command
    Title {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        target: Option<String>,
        #[arg(long, value_enum, default_value_t = SlotArg::Title)]
        slot: SlotArg,
        /// Fade in, stay and fade out in ticks
        #[arg(long, value_name = "IN,STAY,OUT", value_parser = parse_times)]
        times: Option<TitleTimes>,
    },
    /// /setblock command for a sign; lines accept legacy codes
    Sign {
        #[arg(long = "line", value_name = "TEXT", required = true)]
        lines: Vec<String>,
        #[arg(long, default_value = "oak")]
        wood: String,
        #[arg(long)]
        glowing: bool,
    },
    /// /give command for a written book; pages accept legacy codes
    Book {
        #[arg(long = "page", value_name = "TEXT", required = true)]
        pages: Vec<String>,
        #[arg(long, default_value = "Untitled")]
        title: String,
        #[arg(long, default_value = "Anonymous")]
        author: String,
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Show or edit recorded commands
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    List,
    Remove { id: String },
    Clear,
}

/// Where the segments come from. Exactly one source is required.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Plain text, one unstyled segment
    #[arg(long)]
    text: Option<String>,
    /// Text with § or & formatting codes
    #[arg(long)]
    legacy: Option<String>,
    /// JSON array of segment records ("-" reads stdin)
    #[arg(long, value_name = "FILE")]
    segments: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SlotArg {
    Title,
    Subtitle,
    Actionbar,
}

impl SlotArg {
    fn slot(self) -> TitleSlot {
        match self {
            SlotArg::Title => TitleSlot::Title,
            SlotArg::Subtitle => TitleSlot::Subtitle,
            SlotArg::Actionbar => TitleSlot::Actionbar,
        }
    }

    fn tool(self) -> Tool {
        match self {
            SlotArg::Title => Tool::Title,
            SlotArg::Subtitle => Tool::Subtitle,
            SlotArg::Actionbar => Tool::Actionbar,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct TitleTimes {
    fade_in: u32,
    stay: u32,
    fade_out: u32,
}

fn parse_times(raw: &str) -> Result<TitleTimes, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [fade_in, stay, fade_out] = parts[..] else {
        return Err(format!("expected IN,STAY,OUT, got '{raw}'"));
    };
    let ticks = |s: &str| s.parse::<u32>().map_err(|e| format!("'{s}': {e}"));
    Ok(TitleTimes {
        fade_in: ticks(fade_in)?,
        stay: ticks(stay)?,
        fade_out: ticks(fade_out)?,
    })
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Edit);
    init_logging(
        matches!(command, Command::Edit),
        cli.verbose,
        config::data_dir().as_deref(),
    );

    // Explicit versions must be valid; config and env values fall back instead
    if let Some(raw) = &cli.mc_version {
        raw.parse::<VersionTier>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    }

    let file_config =
        config::load_config().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            version: cli.mc_version,
            target: None,
            no_history: cli.no_history,
        },
    );
    info!(
        "mccmd starting: version={}, target={}, history={}",
        resolved.version, resolved.target, resolved.history_enabled
    );

    match command {
        Command::Edit => mccmd::tui::run(resolved),
        Command::History { action } => run_history(action, &resolved),
        other => {
            let output = generate(other, &resolved)?;
            println!("{output}");
            Ok(())
        }
    }
}

/// Editor output goes to a file so it can't corrupt the screen; CLI output
/// goes to stderr.
fn init_logging(editor: bool, verbose: bool, data_dir: Option<&Path>) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if editor {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let Some(dir) = data_dir else { return };
        if fs::create_dir_all(dir).is_err() {
            return;
        }
        if let Ok(log_file) = File::create(dir.join("mccmd.log")) {
            let _ = WriteLogger::init(level, log_config, log_file);
        }
    } else {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        let _ = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto);
    }
}

fn parse_target(raw: Option<String>, fallback: &Target) -> io::Result<Target> {
    match raw {
        Some(raw) => raw
            .parse::<Target>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e)),
        None => Ok(fallback.clone()),
    }
}

/// Reads the selected input, dropping empty runs the same way the editor does.
fn read_segments(input: &InputArgs) -> io::Result<Vec<TextSegment>> {
    read_raw_segments(input).map(drop_empty)
}

fn read_raw_segments(input: &InputArgs) -> io::Result<Vec<TextSegment>> {
    if let Some(text) = &input.text {
        return Ok(vec![TextSegment::plain(text.clone())]);
    }
    if let Some(raw) = &input.legacy {
        return Ok(parse_legacy(raw, &DEFAULT_PREFIXES));
    }
    let Some(path) = &input.segments else {
        return Ok(Vec::new());
    };
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    let segments: Vec<TextSegment> =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    debug!("Read {} segments from {}", segments.len(), path.display());
    Ok(segments)
}

/// Builds the requested output, recording commands in the history.
fn generate(command: Command, config: &ResolvedConfig) -> io::Result<String> {
    let version = config.version;
    let (tool, output, segments) = match command {
        Command::Json { input, array } => {
            let segments = read_segments(&input)?;
            let options = SerializeOptions::new(version).with_array_format(array);
            // Bare components aren't commands; nothing to record
            return Ok(serialize(&segments, &options));
        }
        Command::Tellraw {
            input,
            target,
            array,
        } => {
            let segments = read_segments(&input)?;
            let target = parse_target(target, &config.target)?;
            let options = SerializeOptions::new(version).with_array_format(array);
            let output = command::tellraw(&target, &segments, &options);
            (Tool::Tellraw, output, segments)
        }
        Command::Title {
            input,
            target,
            slot,
            times,
        } => {
            let segments = read_segments(&input)?;
            let target = parse_target(target, &config.target)?;
            let options = SerializeOptions::new(version);
            let title = command::title(&target, slot.slot(), &segments, &options);
            let output = match times {
                Some(t) => format!(
                    "{}\n{}",
                    command::title_times(&target, t.fade_in, t.stay, t.fade_out),
                    title
                ),
                None => title,
            };
            (slot.tool(), output, segments)
        }
        Command::Sign {
            lines,
            wood,
            glowing,
        } => {
            let spec = SignSpec {
                lines: lines
                    .iter()
                    .map(|l| drop_empty(parse_legacy(l, &DEFAULT_PREFIXES)))
                    .collect(),
                wood,
                glowing,
            };
            let output = command::sign(&spec, version);
            (Tool::Sign, output, spec.lines.concat())
        }
        Command::Book {
            pages,
            title,
            author,
            target,
        } => {
            let mut spec = BookSpec {
                title,
                author,
                pages: pages
                    .iter()
                    .map(|p| drop_empty(parse_legacy(p, &DEFAULT_PREFIXES)))
                    .collect(),
                ..BookSpec::default()
            };
            if let Some(raw) = target {
                spec.target = parse_target(Some(raw), &spec.target)?;
            }
            let output = command::book(&spec, version);
            (Tool::Book, output, spec.pages.concat())
        }
        Command::Edit | Command::History { .. } => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a generating command",
            ));
        }
    };

    if config.history_enabled {
        history::record_quietly(
            config.data_dir.as_deref(),
            HistoryEntry::new(tool, version, output.clone(), segments),
            config.history_max_entries,
        );
    }
    Ok(output)
}

fn run_history(action: HistoryCommand, config: &ResolvedConfig) -> io::Result<()> {
    let dir = config.data_dir.as_deref().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no home directory for history")
    })?;
    match action {
        HistoryCommand::List => {
            for entry in history::load(dir)?.entries {
                println!(
                    "{}  {}  {:<9}  {:<7}  {}",
                    entry.id,
                    format_timestamp(entry.created_at),
                    entry.tool.label(),
                    entry.version.label(),
                    entry.command
                );
            }
        }
        HistoryCommand::Remove { id } => {
            if !history::remove(dir, &id)? {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no history entry {id}"),
                ));
            }
            println!("Removed {id}");
        }
        HistoryCommand::Clear => {
            history::clear(dir)?;
            println!("History cleared");
        }
    }
    Ok(())
}

fn format_timestamp(ts: i64) -> String {
    use chrono::{DateTime, Local, Utc};
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
