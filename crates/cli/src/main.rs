//! SqlTools command-line entry point.

mod builtin;
mod term_picker;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use sqltools_formatters::{FormatterPicker, document_picker_enabled, selection_picker_enabled};
use sqltools_launcher::{HttpToolDownloader, PreinstalledTool, ToolDownloader, activate};
use sqltools_types::{
    AuthenticationKind, ConnectionContext, ConnectionProfile, Document, Position, Range,
};
use sqltools_util::{HttpSettings, LogNotifier, LogTelemetry, ShellProcessRunner};
use tracing::warn;

use crate::term_picker::{LogReveal, TerminalQuickPick};

#[derive(Parser)]
#[command(
    name = "sqltools",
    version,
    about = "Formatter picking and SSMS dialog tooling for SQL editors"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pick a formatter and format a whole SQL file in place
    Format { file: PathBuf },
    /// Pick a formatter and format part of a SQL file in place
    FormatSelection {
        file: PathBuf,
        /// Selection start as `line:column` (1-based)
        #[arg(long)]
        start: String,
        /// Selection end as `line:column`; omitted means a collapsed cursor,
        /// which widens to the full start line
        #[arg(long)]
        end: Option<String>,
    },
    /// External SSMS tooling
    Ssms {
        #[command(subcommand)]
        command: SsmsCommand,
    },
}

#[derive(Subcommand)]
enum SsmsCommand {
    /// Open the server-properties dialog for a connection
    Properties {
        #[arg(long)]
        server: String,
        #[arg(long)]
        database: Option<String>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, value_enum, default_value = "sql")]
        auth: AuthArg,
        #[arg(long)]
        urn: Option<String>,
        /// Use an already-installed tool instead of downloading one
        #[arg(long)]
        tool_path: Option<PathBuf>,
        /// Directory tool versions install under
        #[arg(long)]
        install_root: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AuthArg {
    Sql,
    Integrated,
    Aad,
}

impl From<AuthArg> for AuthenticationKind {
    fn from(auth: AuthArg) -> Self {
        match auth {
            AuthArg::Sql => Self::SqlLogin,
            AuthArg::Integrated => Self::Integrated,
            AuthArg::Aad => Self::AzureMfa,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Format { file } => format_document(file).await,
        Command::FormatSelection { file, start, end } => {
            format_selection(file, &start, end.as_deref()).await
        }
        Command::Ssms { command } => run_ssms(command).await,
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn format_document(file: PathBuf) -> Result<()> {
    let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("could not read {}", file.display()))?;
    let mut document = Document::new("sql", &text);
    let registry = Arc::new(builtin::registry());
    if !document_picker_enabled(&registry, &document) {
        bail!("formatter picking needs at least two registered document formatters");
    }

    let picker = FormatterPicker::new(
        registry,
        Arc::new(TerminalQuickPick::new("Format Document With...")),
        Arc::new(LogReveal),
        Arc::new(LogTelemetry),
    );
    match picker.format_document_with(&mut document).await? {
        Some(_) => {
            tokio::fs::write(&file, document.text())
                .await
                .with_context(|| format!("could not write {}", file.display()))?;
            println!("formatted {}", file.display());
        }
        None => println!("cancelled, nothing formatted"),
    }
    Ok(())
}

async fn format_selection(file: PathBuf, start: &str, end: Option<&str>) -> Result<()> {
    let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("could not read {}", file.display()))?;
    let mut document = Document::new("sql", &text);
    let registry = Arc::new(builtin::registry());
    if !selection_picker_enabled(&registry, &document) {
        bail!("formatter picking needs at least two registered range formatters");
    }

    let start = parse_position(start)?;
    let end = match end {
        Some(end) => parse_position(end)?,
        None => start,
    };
    let selection = Range::new(start, end);

    let picker = FormatterPicker::new(
        registry,
        Arc::new(TerminalQuickPick::new("Format Selection With...")),
        Arc::new(LogReveal),
        Arc::new(LogTelemetry),
    );
    match picker.format_selection_with(&mut document, selection).await? {
        Some(_) => {
            tokio::fs::write(&file, document.text())
                .await
                .with_context(|| format!("could not write {}", file.display()))?;
            println!("formatted {}", file.display());
        }
        None => println!("cancelled, nothing formatted"),
    }
    Ok(())
}

async fn run_ssms(command: SsmsCommand) -> Result<()> {
    let SsmsCommand::Properties {
        server,
        database,
        user,
        password,
        auth,
        urn,
        tool_path,
        install_root,
    } = command;

    let settings = HttpSettings::load().unwrap_or_else(|error| {
        warn!(error = %error, "could not load settings; using defaults");
        HttpSettings::default()
    });
    let install_root = install_root
        .or_else(|| dirs_next::data_local_dir().map(|dir| dir.join("sqltools")))
        .unwrap_or_else(|| PathBuf::from(".sqltools"));
    let downloader: Box<dyn ToolDownloader> = match tool_path {
        Some(path) => Box::new(PreinstalledTool::new(path)),
        None => Box::new(HttpToolDownloader),
    };

    let launcher = activate(
        std::env::consts::OS,
        &install_root,
        settings,
        downloader.as_ref(),
        Arc::new(LogTelemetry),
        Arc::new(LogNotifier),
        Arc::new(ShellProcessRunner),
    )
    .await;

    let context = ConnectionContext {
        connection_profile: Some(ConnectionProfile {
            server_name: server,
            database_name: database,
            user_name: user,
            password,
            authentication_type: auth.into(),
        }),
        urn,
    };
    launcher.launch_server_properties(&context).await?;
    println!("server-properties dialog launch requested");
    Ok(())
}

fn parse_position(raw: &str) -> Result<Position> {
    let (line, column) = raw
        .split_once(':')
        .with_context(|| format!("positions are `line:column`, got `{raw}`"))?;
    let line: u32 = line
        .trim()
        .parse()
        .with_context(|| format!("invalid line in `{raw}`"))?;
    let column: u32 = column
        .trim()
        .parse()
        .with_context(|| format!("invalid column in `{raw}`"))?;
    Ok(Position::new(line, column))
}
