use anyhow::Result;
use clap::Parser;
use client_core::{project, run_once, RenderPayload, SearchClient};

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Search endpoint base URL; overrides search.toml and environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Query text, submitted as-is (no trimming).
    query: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let client = SearchClient::new(&settings.server_url)?;
    let state = run_once(&client, &args.query).await;

    match project(&state) {
        RenderPayload::Entries(entries) => {
            for entry in entries {
                println!("{}", entry.formatted());
            }
        }
        RenderPayload::Notice(notice) | RenderPayload::ValidationNotice(notice) => {
            println!("{notice}");
        }
        // A one-shot flow always settles past the placeholder.
        RenderPayload::Placeholder { .. } => {}
    }

    Ok(())
}
