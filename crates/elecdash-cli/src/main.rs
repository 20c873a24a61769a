mod ui;

use std::env;
use std::fs;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use elecdash_core::bus::BusEvent;
use elecdash_core::bus::CommandBus;
use elecdash_core::bus::CommandEvent;
use elecdash_core::bus::NavigationCommand;
use elecdash_core::config::Config;
use elecdash_core::config::LoggingConfig;
use elecdash_core::dialogs::resolve_dialog;
use elecdash_core::error::ConfigError;
use elecdash_core::hierarchy::depth_of;
use elecdash_core::hierarchy::parent_of;
use elecdash_core::state::DashboardState;
use elecdash_core::views::ViewId;
use elecdash_core::views::ROOT_VIEW;
use elecdash_core::vocabulary::aliases_for;
use elecdash_core::vocabulary::resolve_view;
use elecdash_exec::coordinator::Coordinator;
use elecdash_exec::refresh::RecordingRefreshSink;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("elecdash {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "resolve" => {
            let options = parse_options(args.collect())?;
            if options.positional.is_empty() {
                return Err("resolve requires a phrase".into());
            }
            resolve(&options);
            Ok(())
        }
        "replay" => {
            let options = parse_options(args.collect())?;
            let Some(events) = options.events.clone() else {
                return Err("replay requires --events PATH".into());
            };
            reject_positional(&options)?;
            replay(&options, &events)
        }
        "shell" => {
            let options = parse_options(args.collect())?;
            reject_positional(&options)?;
            shell(&options)
        }
        _ => {
            print_help();
            Err(format!("unknown command: {command}").into())
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config: Option<PathBuf>,
    location: Option<String>,
    events: Option<PathBuf>,
    dialog: bool,
    json: bool,
    positional: Vec<String>,
}

fn parse_options(args: Vec<String>) -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("--config" | "--location" | "--events") => {
                let Some(value) = args.get(i + 1) else {
                    return Err(format!("{flag} requires a value").into());
                };
                match flag {
                    "--config" => options.config = Some(PathBuf::from(value)),
                    "--location" => options.location = Some(value.clone()),
                    _ => options.events = Some(PathBuf::from(value)),
                }
                i += 2;
            }
            "--dialog" => {
                options.dialog = true;
                i += 1;
            }
            "--json" => {
                options.json = true;
                i += 1;
            }
            other if other.starts_with("--") => {
                return Err(format!("unsupported argument: {other}").into());
            }
            other => {
                options.positional.push(other.to_string());
                i += 1;
            }
        }
    }
    Ok(options)
}

fn reject_positional(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    match options.positional.first() {
        Some(extra) => Err(format!("unexpected argument: {extra}").into()),
        None => Ok(()),
    }
}

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os("ELECDASH_CONFIG").map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|dir| dir.join("elecdash").join("config.toml")))
}

fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match (explicit, config_path(explicit)) {
        (Some(path), _) => Config::load(path)?,
        (None, Some(path)) => Config::load_or_default(&path)?,
        (None, None) => Config::default(),
    };
    config.apply_env_overrides();
    config.base_url()?;
    Ok(config)
}

fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter))
}

fn init_stderr_logging(logging: &LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(logging))
        .with_writer(io::stderr)
        .try_init();
}

/// The shell owns the terminal, so its log goes to a file.
fn init_file_logging(logging: &LoggingConfig) -> io::Result<PathBuf> {
    let path = logging
        .file
        .clone()
        .unwrap_or_else(|| env::temp_dir().join("elecdash.log"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(logging))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(path)
}

fn resolve(options: &Options) {
    let phrase = options.positional.join(" ");
    if options.dialog {
        match resolve_dialog(&phrase) {
            Some(dialog) => println!("{dialog}\t{}", dialog.title()),
            None => println!("unresolved: {phrase}"),
        }
        return;
    }
    match resolve_view(&phrase) {
        Some(view) => {
            let parent = if view == ROOT_VIEW {
                "-".to_string()
            } else {
                parent_of(view).to_string()
            };
            println!("{view}\tdepth={}\tparent={parent}", depth_of(view).label());
            if let Some(aliases) = alias_line(view) {
                println!("{aliases}");
            }
        }
        None => println!("unresolved: {phrase}"),
    }
}

fn replay(options: &Options, events: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(options.config.as_deref())?;
    init_stderr_logging(&config.logging);

    let file = fs::File::open(events)?;
    let location = options
        .location
        .clone()
        .unwrap_or_else(|| config.navigation.base_url.clone());
    let mut out = io::stdout().lock();
    let coordinator = replay_events(&config, &location, BufReader::new(file), &mut out)?;
    if options.json {
        write_activity_json(coordinator.state(), &mut out)?;
    }
    Ok(())
}

fn alias_line(view: ViewId) -> Option<String> {
    let aliases: Vec<&str> = aliases_for(view).collect();
    if aliases.is_empty() {
        None
    } else {
        Some(format!("aliases: {}", aliases.join(", ")))
    }
}

/// Feeds every event line through a fresh coordinator. Lines that are not
/// UTF-8 or not a known event are skipped; only read errors end the replay.
fn replay_events<R: BufRead, W: Write>(
    config: &Config,
    location: &str,
    reader: R,
    out: &mut W,
) -> Result<Coordinator, Box<dyn std::error::Error>> {
    let bus = CommandBus::new();
    let refresh = RecordingRefreshSink::new();
    let mut coordinator = Coordinator::from_config(config, refresh.clone())?;
    coordinator.activate(&bus);

    coordinator.load(location);
    coordinator.settle();
    writeln!(out, "{:>4}  {:<28} {}", 0, "load", status_line(coordinator.state()))?;

    let mut seen_refreshes = 0;
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line = match std::str::from_utf8(&raw) {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(line = idx + 1, %err, "skipping malformed event");
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = match BusEvent::parse_line(trimmed) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(line = idx + 1, %err, "skipping malformed event");
                continue;
            }
        };
        let label = describe_event(&event);
        bus.emit(event);
        coordinator.pump();
        coordinator.settle();
        writeln!(
            out,
            "{:>4}  {:<28} {}",
            idx + 1,
            label,
            status_line(coordinator.state())
        )?;

        let refreshes = refresh.snapshot();
        for invalidation in refreshes.iter().skip(seen_refreshes) {
            writeln!(
                out,
                "      refresh {}: {}",
                invalidation.view,
                invalidation.keys.join(", ")
            )?;
        }
        seen_refreshes = refreshes.len();
    }

    coordinator.teardown();
    Ok(coordinator)
}

/// One JSON object per recorded transition, oldest first.
fn write_activity_json<W: Write>(
    state: &DashboardState,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in state.activity.iter() {
        writeln!(out, "{}", serde_json::to_string(entry)?)?;
    }
    Ok(())
}

fn shell(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(options.config.as_deref())?;
    let log_path = init_file_logging(&config.logging)?;
    tracing::info!(log = %log_path.display(), "shell starting");

    let bus = CommandBus::new();
    let mut coordinator = Coordinator::from_config(&config, RecordingRefreshSink::new())?;
    coordinator.activate(&bus);
    let location = options
        .location
        .clone()
        .unwrap_or_else(|| config.navigation.base_url.clone());
    coordinator.load(&location);

    ui::run(coordinator, bus)?;
    println!("logs: {}", log_path.display());
    Ok(())
}

fn describe_event(event: &BusEvent) -> String {
    match event {
        BusEvent::Navigation(NavigationCommand::Navigate { section }) => format!("navigate {section:?}"),
        BusEvent::Navigation(NavigationCommand::Back) => "back".to_string(),
        BusEvent::Navigation(NavigationCommand::Home) => "home".to_string(),
        BusEvent::Navigation(NavigationCommand::Refresh) => "refresh".to_string(),
        BusEvent::Dialog(CommandEvent::Open { dialog_name }) => format!("open {dialog_name:?}"),
        BusEvent::Dialog(CommandEvent::CloseAll) => "closeAll".to_string(),
    }
}

fn status_line(state: &DashboardState) -> String {
    let dialogs: Vec<String> = state
        .open_dialogs()
        .iter()
        .map(ToString::to_string)
        .collect();
    format!(
        "view={:<12} {:<8} slot={:<7} dialogs=[{}] {}",
        state.current_view().as_str(),
        state.nav.last_direction().label(),
        state.view_slot.label(),
        dialogs.join(","),
        state.location()
    )
}

fn print_help() {
    println!("elecdash {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  elecdash resolve [--dialog] PHRASE...");
    println!("  elecdash replay --events PATH [--json] [--location URL] [--config PATH]");
    println!("  elecdash shell [--location URL] [--config PATH]");
    println!("  elecdash --help");
    println!("  elecdash --version");
}
