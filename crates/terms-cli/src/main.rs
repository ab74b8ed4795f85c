//! `terms` - command line client for the terms and conditions service.
//!
//! # Examples
//!
//! ```bash
//! # Create a new revision of an owned document
//! terms push-term text.txt me/enterprise-plan
//!
//! # Show the latest revision, or only its text
//! terms show-term me/enterprise-plan
//! terms show-term me/enterprise-plan/3 --content
//!
//! # Release revision 3
//! terms release-term me/enterprise-plan/3
//!
//! # Print what a command does
//! terms list-terms --description
//! ```

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use terms_client::transport::{DEFAULT_TIMEOUT, ReqwestTransport};
use terms_client::{ClientBuilder, CookieJar, IdentityClient, config};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod agreements;
mod list_terms;
mod output;
mod push_term;
mod release_term;
mod show_term;

#[cfg(test)]
mod testing;

use output::Format;

/// Terms and conditions service client
#[derive(Parser)]
#[command(name = "terms")]
#[command(version, about, long_about = None)]
#[command(after_help = "Pass --description with a command to print its purpose.")]
struct Cli {
    /// Terms service location
    #[arg(long, global = true, env = config::TERMS_URL_ENV, default_value = config::DEFAULT_TERMS_URL)]
    url: String,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new terms and conditions document (revision)
    PushTerm(push_term::PushTermArgs),

    /// Show the specified term
    ShowTerm(show_term::ShowTermArgs),

    /// Release the given terms document
    ReleaseTerm(release_term::ReleaseTermArgs),

    /// List terms owned by the current user or the user's groups
    #[command(alias = "terms")]
    ListTerms(list_terms::ListTermsArgs),

    /// List the terms the current user has agreed to
    Agreements,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("terms=debug,terms_client=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Purpose of the command named in `args`, or of the tool itself, when
/// `--description` is among them.
fn description(args: &[OsString]) -> Option<String> {
    if !args.iter().skip(1).any(|arg| arg == "--description") {
        return None;
    }
    let command = Cli::command();
    let about = args
        .iter()
        .skip(1)
        .find_map(|arg| command.find_subcommand(arg))
        .and_then(|sub| sub.get_about())
        .or_else(|| command.get_about());
    Some(about.map(ToString::to_string).unwrap_or_default())
}

/// Runs a command with the saved cookies, writing them back afterwards
/// even when the command fails.
async fn run(cli: Cli) -> Result<()> {
    let jar = match config::cookie_file() {
        Some(path) => CookieJar::open(path)?,
        None => CookieJar::in_memory(),
    };

    let result = dispatch(cli, &jar).await;
    if let Err(err) = jar.save() {
        warn!(error = %err, "cookies not saved");
    }
    result
}

async fn dispatch(cli: Cli, jar: &CookieJar) -> Result<()> {
    debug!(url = %cli.url, "terms service");
    let client = ClientBuilder::new()
        .service_url(&cli.url)
        .cookie_jar(jar.clone())
        .build()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::PushTerm(args) => push_term::execute(args, &client, &mut out, cli.format).await,
        Commands::ShowTerm(args) => show_term::execute(args, &client, &mut out, cli.format).await,
        Commands::ReleaseTerm(args) => {
            release_term::execute(args, &client, &mut out, cli.format).await
        }
        Commands::ListTerms(args) => {
            let transport = ReqwestTransport::with_cookies(DEFAULT_TIMEOUT, jar)?;
            let identity = IdentityClient::with_transport(&args.identity_url, transport);
            list_terms::execute(args, &client, &identity, &mut out, cli.format).await
        }
        Commands::Agreements => agreements::execute(&client, &mut out, cli.format).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    if let Some(text) = description(&args) {
        println!("{text}");
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse_from(args);
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_term() {
        let cli = Cli::try_parse_from([
            "terms",
            "show-term",
            "owner/test-term/1",
            "--content",
            "--format",
            "json",
            "--url",
            "http://example.com",
        ])
        .unwrap();
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.url, "http://example.com");
        match cli.command {
            Commands::ShowTerm(args) => {
                assert_eq!(args.term_id, "owner/test-term/1");
                assert!(args.content);
            }
            _ => panic!("expected show-term"),
        }
    }

    #[test]
    fn test_parse_argument_errors() {
        // missing arguments
        assert!(Cli::try_parse_from(["terms", "push-term", "test-term"]).is_err());
        assert!(Cli::try_parse_from(["terms", "release-term"]).is_err());
        // unknown arguments
        assert!(Cli::try_parse_from(["terms", "show-term", "test-term/1", "unknown"]).is_err());
    }

    #[test]
    fn test_parse_list_terms_alias() {
        let cli = Cli::try_parse_from(["terms", "terms", "--groups", "a,b"]).unwrap();
        match cli.command {
            Commands::ListTerms(args) => assert_eq!(args.groups, "a,b"),
            _ => panic!("expected list-terms"),
        }
    }

    #[test]
    fn test_description() {
        assert_eq!(
            description(&args(&["terms", "show-term", "--description"])).as_deref(),
            Some("Show the specified term")
        );
        // remaining arguments are not validated
        assert_eq!(
            description(&args(&["terms", "--description", "push-term"])).as_deref(),
            Some("Create a new terms and conditions document (revision)")
        );
        assert_eq!(
            description(&args(&["terms", "terms", "--description"])).as_deref(),
            Some("List terms owned by the current user or the user's groups")
        );
        assert_eq!(
            description(&args(&["terms", "--description"])),
            Cli::command().get_about().map(ToString::to_string)
        );
        assert_eq!(description(&args(&["terms", "show-term", "test-term"])), None);
        assert_eq!(description(&args(&["--description"])), None);
    }
}
