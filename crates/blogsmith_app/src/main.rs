//! blogsmith CLI: generate one blog post and publish the site repository.

mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::Parser;

use blogsmith_engine::{
    CoverSettings, GitCliPublisher, OpenAiClient, OpenAiConfig, Pipeline, PublishedPost,
    SiteConfig,
};

const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Parser, Debug)]
#[command(name = "blogsmith", about = "Generate one blog post and publish the site")]
struct Cli {
    /// Topic for the post; "init" publishes the fixed editorial intro.
    topic: String,

    /// Root of the site repository working tree.
    #[arg(long, default_value = ".")]
    site_root: PathBuf,

    /// Name of the content subdirectory inside the site root.
    #[arg(long, default_value = "content")]
    content_dir: String,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, default_value = "https://api.openai.com/v1")]
    api_base: String,

    /// Also write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    logging::initialize(cli.log_file.as_deref());

    match run(cli) {
        Ok(post) => {
            log::info!(
                "published post {} ({}): {}",
                post.id,
                post.page_path.display(),
                post.title
            );
        }
        Err(err) => {
            log::error!("publish failed: {err}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<PublishedPost, Box<dyn std::error::Error>> {
    let api_key = std::env::var(API_KEY_VAR).map_err(|_| format!("{API_KEY_VAR} is not set"))?;

    let mut site = SiteConfig::new(cli.site_root.clone());
    site.content_dir_name = cli.content_dir;

    let client = Arc::new(OpenAiClient::new(OpenAiConfig::new(cli.api_base, api_key))?);
    let publisher = Arc::new(GitCliPublisher::new(cli.site_root));
    let pipeline = Pipeline::new(
        site,
        CoverSettings::default(),
        client.clone(),
        client,
        publisher,
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let post = runtime.block_on(pipeline.run(&cli.topic))?;
    Ok(post)
}
