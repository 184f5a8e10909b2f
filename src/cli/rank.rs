use std::{io::IsTerminal, path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;
use tokio::io::AsyncReadExt;

use crate::{error, info, session::Session, spotify::SpotifyApi, utils, warning};

pub struct RankOptions {
    pub names: Vec<String>,
    pub file: Option<PathBuf>,
    pub json: bool,
    pub limit: Option<usize>,
}

/// Ranks artist names by affinity and prints the result.
///
/// Names come from the command line, from `--file` (one per line) or, when
/// neither is given, from stdin.
pub async fn rank<A: SpotifyApi>(session: &Session<A>, opts: RankOptions) {
    let names = match read_names(opts.names, opts.file).await {
        Ok(n) => n,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = session.restore().await {
        error!("Cannot read login state: {}", e);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Scoring {} artists...", names.len()));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = session.rank_artists(names.as_slice()).await;
    pb.finish_and_clear();

    let ranked = match result {
        Ok(r) => r,
        Err(e) => error!("{}", e),
    };

    if ranked.is_empty() && !opts.json {
        warning!("None of the artists were found on Spotify.");
        return;
    }

    let shown = opts.limit.unwrap_or(ranked.len()).min(ranked.len());
    let ranked = &ranked[..shown];

    if opts.json {
        match serde_json::to_string_pretty(ranked) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Cannot serialize results: {}", e),
        }
        return;
    }

    let table = Table::new(utils::to_table_rows(ranked));
    println!("{}", table);
}

async fn read_names(mut names: Vec<String>, file: Option<PathBuf>) -> Result<Vec<String>, String> {
    if let Some(path) = file {
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        names.extend(utils::parse_artist_names(&content));
    } else if names.is_empty() {
        if std::io::stdin().is_terminal() {
            info!("Paste artist names, one per line. Finish with Ctrl-D.");
        }
        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .map_err(|e| format!("Cannot read stdin: {}", e))?;
        names.extend(utils::parse_artist_names(&input));
    }

    Ok(names)
}
