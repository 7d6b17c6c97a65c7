//! folioterm - a portfolio terminal
//!
//! Runs the portfolio shell inline in the current terminal.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use tracing::{debug, error, info, warn};

use folioterm::host::Host;
use folioterm::platform::Platform;
use folioterm::{SessionBuilder, ThemeSurface};

/// Command line options
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
    /// Palette to start with
    theme: Option<String>,
    /// RNG seed for `art` and `matrix`
    seed: Option<u64>,
    /// Positional arguments, reported once logging is up
    ignored: Vec<String>,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> anyhow::Result<Self> {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse arguments that follow the program name
    fn parse_from(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let args: Vec<String> = args.into_iter().collect();
        let mut app_args = AppArgs::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let path = args.get(i + 1).context("Missing config file path")?;
                    app_args.config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--theme" | "-t" => {
                    let theme = args.get(i + 1).context("Missing theme name")?;
                    app_args.theme = Some(theme.to_lowercase());
                    i += 1;
                }
                "--seed" => {
                    let seed = args.get(i + 1).context("Missing seed")?;
                    app_args.seed = Some(
                        seed.parse()
                            .with_context(|| format!("Invalid seed: {}", seed))?,
                    );
                    i += 1;
                }
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("{} v{}", folioterm::NAME, folioterm::VERSION);
                    process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    anyhow::bail!("Unknown option: {}", arg);
                }
                other => {
                    app_args.ignored.push(other.to_string());
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("folioterm - {}", folioterm::DESCRIPTION);
    println!();
    println!("USAGE:");
    println!("    folioterm [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -d, --debug            Enable debug logging");
    println!("    -t, --theme <THEME>    Initial palette (matrix, cyberpunk, ocean, fire, amber, default)");
    println!("        --seed <N>         Seed for 'art' and 'matrix'");
    println!("    -h, --help             Print this help message");
    println!("    -V, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    folioterm looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $FOLIOTERM_CONFIG");
    println!("    3. $XDG_CONFIG_HOME/folioterm/config.{{toml,json}}");
    println!("    4. ~/.folioterm/config.{{toml,json}}");
    println!("    5. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    FOLIOTERM_CONFIG      Path to configuration file");
    println!("    FOLIOTERM_DEBUG       Enable debug logging (1 or true)");
    println!("    RUST_LOG              Set logging level (error, warn, info, debug, trace)");
    println!();
    println!("Logs go to stderr; redirect it (2>folioterm.log) to keep the screen clean.");
}

fn init_logging(debug: bool) {
    let debug = debug
        || env::var("FOLIOTERM_DEBUG").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let level = if debug { "debug" } else { "warn" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("Failed to parse arguments: {}", e);
        print_help();
        process::exit(1);
    });

    init_logging(args.debug);
    info!("Starting {} v{}", folioterm::NAME, folioterm::VERSION);
    debug!("Arguments: {:?}", args);
    for arg in &args.ignored {
        warn!("Ignoring positional argument: {}", arg);
    }

    let mut runtime = match &args.config_path {
        Some(path) => folioterm::init_with_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => folioterm::init().context("Failed to load configuration")?,
    };

    if let Some(theme) = &args.theme {
        if let Err(e) = runtime.themes_mut().apply_palette(theme) {
            warn!("Ignoring --theme: {}", e);
        }
    }

    let (config, content, themes) = runtime.into_parts();
    let (mut host, parts) = Host::new(themes);

    let mut builder = SessionBuilder::new()
        .config(config)
        .content(content)
        .themes(parts.themes)
        .surface(parts.surface)
        .animation(parts.animation)
        .boxed_opener(Platform::opener());
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let mut session = builder.build().context("Failed to build session")?;
    session.greet();

    if let Err(e) = host.run(&mut session).await {
        error!("Terminal host failed: {}", e);
        return Err(e).context("Terminal host failed");
    }

    info!("Goodbye");
    Ok(())
}
