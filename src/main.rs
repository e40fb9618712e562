use anyhow::Result;
use clap::Parser;
use relver::source::RepoId;
use relver::update::{UpdateOptions, update};
use std::path::PathBuf;

/// relver - release channel version publisher
///
/// Reads the release list of an OTA repository, picks the newest tag for
/// each channel (alpha/beta/stable, inferred from tag shape), and writes
/// one version document per channel as JSON.
///
/// If the GH_TOKEN or GITHUB_TOKEN environment variable is set, it is
/// used as a bearer token. Unauthenticated requests work but are subject
/// to much stricter rate limits.
#[derive(Parser, Debug)]
#[command(author, version = env!("RELVER_VERSION"), about)]
struct Cli {
    /// The primary project repository in the format "owner/repo"
    #[arg(long = "repo", value_name = "OWNER/REPO")]
    pub primary_repo: RepoId,

    /// The OTA repository in the format "owner/repo"
    #[arg(long = "ota-repo", value_name = "OWNER/REPO")]
    pub ota_repo: RepoId,

    /// GitHub API URL
    #[arg(
        long = "api-url",
        value_name = "URL",
        default_value = "https://api.github.com"
    )]
    pub api_url: String,

    /// Directory to write the channel documents to (also via RELVER_OUTPUT_DIR)
    #[arg(
        long = "output-dir",
        short = 'o',
        env = "RELVER_OUTPUT_DIR",
        value_name = "PATH",
        default_value = "api/version"
    )]
    pub output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    update(UpdateOptions {
        primary_repo: cli.primary_repo,
        ota_repo: cli.ota_repo,
        api_url: cli.api_url,
        output_dir: cli.output_dir,
    })
    .await
}
