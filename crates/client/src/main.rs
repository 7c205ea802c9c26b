use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pixmorph_client::config::ClientConfig;
use pixmorph_client::dispatcher::ProxyClient;
use pixmorph_client::download::download_image;
use pixmorph_client::history::{HistoryClient, HistoryView};
use pixmorph_client::session::{Session, SessionStore};
use pixmorph_client::studio::{Studio, StudioMode};
use pixmorph_core::preset::PRESETS;
use pixmorph_core::selection::CandidateFile;
use pixmorph_core::types::RecordId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pixmorph", version, about = "Transform images with AI")]
struct Cli {
    /// Base URL of the Pixmorph API server.
    #[arg(long, env = "PIXMORPH_API_URL")]
    api_url: Option<String>,

    /// Access token of the signed-in user. Enables history.
    #[arg(long, env = "PIXMORPH_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Combine up to four images with a prompt.
    Generate {
        #[arg(short, long)]
        prompt: String,
        /// Directory to save the result into.
        #[arg(short, long)]
        download: Option<PathBuf>,
        #[arg(required = true, num_args = 1..)]
        images: Vec<PathBuf>,
    },
    /// Apply a color-grading preset to one image.
    Grade {
        /// Preset id, see `pixmorph presets`.
        #[arg(long, conflicts_with = "prompt", required_unless_present = "prompt")]
        preset: Option<String>,
        /// Custom grading instruction.
        #[arg(long)]
        prompt: Option<String>,
        #[arg(short, long)]
        download: Option<PathBuf>,
        image: PathBuf,
    },
    /// List the color-grading presets.
    Presets,
    /// Manage saved generations.
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List saved generations, newest first.
    List,
    /// Delete one saved generation.
    Delete { id: RecordId },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixmorph_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(token) = cli.token {
        config.access_token = Some(token);
    }

    let http = config.http_client().context("Failed to build HTTP client")?;
    let sessions = SessionStore::new();
    if let Some(token) = config.access_token.clone() {
        sessions.sign_in(Session::from_access_token(token)?);
    }

    let proxy = ProxyClient::new(http.clone(), &config.api_url);
    let history = HistoryClient::new(http.clone(), &config.api_url);

    match cli.command {
        Command::Presets => {
            for preset in PRESETS {
                println!("{:<12} {:<14} {}", preset.id, preset.name, preset.description);
            }
        }

        Command::Generate {
            prompt,
            download,
            images,
        } => {
            let mut studio = Studio::new(StudioMode::Compose, proxy, history, sessions);
            let added = studio.add_files(images.iter().map(CandidateFile::from_path));
            if added < images.len() {
                tracing::warn!(offered = images.len(), added, "Some files were skipped");
            }
            let cancel = studio.teardown_handle();
            let url = run_until_interrupted(cancel, studio.submit(&prompt)).await?;
            finish(&http, &url, download).await?;
        }

        Command::Grade {
            preset,
            prompt,
            download,
            image,
        } => {
            let mut studio = Studio::new(StudioMode::ColorGrade, proxy, history, sessions);
            if studio.add_files([CandidateFile::from_path(&image)]) == 0 {
                bail!("{} is not a supported image", image.display());
            }
            let cancel = studio.teardown_handle();
            let url = match (preset, prompt) {
                (Some(id), _) => run_until_interrupted(cancel, studio.apply_preset(&id)).await?,
                (None, Some(p)) => run_until_interrupted(cancel, studio.submit(&p)).await?,
                (None, None) => bail!("either --preset or --prompt is required"),
            };
            finish(&http, &url, download).await?;
        }

        Command::History { command } => {
            let session = sessions
                .current()
                .context("History requires --token or PIXMORPH_ACCESS_TOKEN")?;
            let mut view = HistoryView::new(history);
            match command {
                HistoryCommand::List => {
                    for entry in view.refresh(&session).await? {
                        println!(
                            "{}  {}  {}\n    {}",
                            entry.id,
                            entry.created_at.format("%Y-%m-%d %H:%M"),
                            entry.generated_image_url,
                            entry.prompt
                        );
                    }
                }
                HistoryCommand::Delete { id } => {
                    view.delete(&session, id).await?;
                    println!("Deleted {id}");
                }
            }
        }
    }

    Ok(())
}

/// Drive `fut`, cancelling `cancel` on Ctrl-C so the request result is
/// discarded.
async fn run_until_interrupted<T>(
    cancel: tokio_util::sync::CancellationToken,
    fut: impl std::future::Future<Output = Result<T, pixmorph_client::ClientError>>,
) -> anyhow::Result<T> {
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, cancelling request");
                cancel.cancel();
            }
        })
    };
    let outcome = fut.await;
    watcher.abort();
    Ok(outcome?)
}

async fn finish(
    http: &reqwest::Client,
    url: &str,
    download: Option<PathBuf>,
) -> anyhow::Result<()> {
    match download {
        Some(dir) => {
            let path = download_image(http, url, &dir).await?;
            println!("{}", path.display());
        }
        None => println!("{url}"),
    }
    Ok(())
}
