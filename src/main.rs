use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use seatlookup::{
    config::Config,
    fetch::HttpTransport,
    locale::Locale,
    prefs::{PrefsStore, Theme},
    present::{HtmlPresenter, Presenter, TerminalPresenter},
    Lookup, Outcome,
};
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Html,
}

#[derive(Parser)]
#[command(name = "seatlookup")]
#[command(about = "Look up a student's results by seat number", long_about = None)]
#[command(version)]
struct Cli {
    /// Seat number to look up. Reads one key per line from stdin when omitted.
    seat: Option<String>,

    /// YAML config file
    #[arg(short, long, env = "SEATLOOKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Published sheet CSV URL
    #[arg(long)]
    source_url: Option<String>,

    /// CORS forwarding prefix; the encoded source URL is appended to it
    #[arg(long, conflicts_with = "no_proxy")]
    proxy_url: Option<String>,

    /// Fetch the source URL directly
    #[arg(long)]
    no_proxy: bool,

    /// Request timeout in seconds (none by default)
    #[arg(long)]
    timeout: Option<u64>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Write results here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// ar | en
    #[arg(long, value_parser = parse_locale)]
    locale: Option<Locale>,

    /// Set and persist the theme (dark | light)
    #[arg(long, value_parser = parse_theme, conflicts_with = "toggle_theme")]
    theme: Option<Theme>,

    /// Flip the persisted theme
    #[arg(long)]
    toggle_theme: bool,
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::from_str(s).ok_or_else(|| format!("unknown locale {:?}", s))
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::from_str(s).ok_or_else(|| format!("unknown theme {:?}", s))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.source_url.clone() {
        config.source_url = url;
    }
    if cli.no_proxy {
        config.proxy_url = None;
    } else if let Some(proxy) = cli.proxy_url.clone() {
        config.proxy_url = Some(proxy);
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = Some(secs);
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    info!(source = %config.source_url, proxy = ?config.proxy_url, "startup");

    // ─── 3) theme preference ─────────────────────────────────────────
    let prefs = PrefsStore::new(&config.prefs_path);
    if let Some(theme) = cli.theme {
        prefs.save(theme)?;
    } else if cli.toggle_theme {
        prefs.toggle()?;
    }
    let theme = prefs.load();
    if cli.seat.is_none() && (cli.theme.is_some() || cli.toggle_theme) {
        println!("{}", theme.as_str());
        return Ok(ExitCode::SUCCESS);
    }

    // ─── 4) wire transport + presenter ───────────────────────────────
    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating output {:?}", path))?,
        ),
        None => Box::new(io::stdout()),
    };
    let presenter: Box<dyn Presenter> = match cli.format {
        Format::Text => Box::new(
            TerminalPresenter::new(out, config.locale.messages(), config.max_subtotal)
                .with_progress(io::stderr().is_terminal()),
        ),
        Format::Html => Box::new(HtmlPresenter::new(
            out,
            config.locale,
            theme,
            config.max_subtotal,
        )),
    };
    let transport = HttpTransport::new(config.timeout())?;
    let mut lookup = Lookup::new(transport, presenter, &config);

    // ─── 5) submissions ──────────────────────────────────────────────
    if let Some(seat) = cli.seat.as_deref() {
        let outcome = lookup.submit(seat).await;
        return Ok(exit_code(&outcome));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = ExitCode::SUCCESS;
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let outcome = lookup.submit(&line).await;
        if !outcome.is_success() {
            warn!(input = %line.trim(), "lookup did not succeed");
        }
        last = exit_code(&outcome);
    }
    Ok(last)
}

fn exit_code(outcome: &Outcome) -> ExitCode {
    match outcome {
        Outcome::Success(_) => ExitCode::SUCCESS,
        Outcome::NotFound(_) | Outcome::ValidationFailed => ExitCode::from(1),
        Outcome::TransportError(_) => ExitCode::from(2),
    }
}
