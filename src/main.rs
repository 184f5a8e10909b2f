use std::{num::NonZeroUsize, path::PathBuf, sync::Arc, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use festiby::{
    cli,
    config::{self, Config},
    error,
    management::LocalStore,
    session::Session,
    spotify::SpotifyClient,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with Spotify through the browser
    Login(LoginOptions),

    /// Finish a login with the URL Spotify redirected to
    Callback(CallbackOptions),

    /// Show whether you are logged in
    Status,

    /// Rank artists by how well they match your listening history
    Rank(RankOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    /// Seconds to wait for the browser to come back
    #[clap(long, default_value_t = 120)]
    pub timeout: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct CallbackOptions {
    /// Redirect URL (or just its query string) containing the authorization code
    pub url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RankOptions {
    /// Artist names; read from stdin when neither names nor --file are given
    pub names: Vec<String>,

    /// File with one artist name per line
    #[clap(long, short)]
    pub file: Option<PathBuf>,

    /// Print results as JSON
    #[clap(long)]
    pub json: bool,

    /// Show only the best N artists
    #[clap(long, short)]
    pub limit: Option<NonZeroUsize>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let session = Arc::new(Session::new(
        config.clone(),
        LocalStore::default_location(),
        SpotifyClient::new(config),
    ));

    match cli.command {
        Command::Login(opt) => cli::login(session, Duration::from_secs(opt.timeout)).await,
        Command::Callback(opt) => cli::callback(&session, &opt.url).await,
        Command::Status => cli::status(&session).await,
        Command::Rank(opt) => {
            cli::rank(
                &session,
                cli::RankOptions {
                    names: opt.names,
                    file: opt.file,
                    json: opt.json,
                    limit: opt.limit.map(NonZeroUsize::get),
                },
            )
            .await
        }
        Command::Completions(_) => {}
    }
}
