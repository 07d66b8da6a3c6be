//! List subcommand handlers: resolve, manual, clear.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use irondome_config::Config;
use irondome_loader::{HttpMirrorFetcher, ListLoader, ManualListEditor};
use irondome_protocols::{ListStore, LoadOutcome};
use irondome_store::FileListStore;

use crate::cli::{ManualAction, OutputFormat};

/// Open the persistent store named in the config.
pub(crate) fn open_store(config: &Config) -> anyhow::Result<Arc<FileListStore>> {
    let path = config.storage.resolved_path();
    let store = FileListStore::new(&path)
        .with_context(|| format!("Failed to open store at {}", path.display()))?;
    Ok(Arc::new(store))
}

/// Resolve the membership list through the standard provider chain.
pub(crate) async fn resolve_outcome(
    config: &Config,
    store: Arc<dyn ListStore>,
) -> LoadOutcome {
    let fetcher = Arc::new(HttpMirrorFetcher::new(config.loader.min_body_len));
    let loader = ListLoader::from_config(&config.loader, store, fetcher);
    loader.resolve().await
}

pub(crate) async fn handle_resolve(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let outcome = resolve_outcome(config, store).await;
    print_outcome(&outcome, format)
}

pub(crate) async fn handle_manual(config: &Config, action: ManualAction) -> anyhow::Result<()> {
    let store = open_store(config)?;
    match action {
        ManualAction::Set { json } => {
            let editor = ManualListEditor::new(store);
            let count = editor.save_pasted(&json).await?;
            println!("Manual list saved: {} factions", count);
        }
        ManualAction::Show => match store.read_manual_override() {
            Some(list) if !list.is_empty() => {
                println!("{}", serde_json::to_string_pretty(&list)?);
            }
            _ => println!("No manual override set"),
        },
    }
    Ok(())
}

pub(crate) fn handle_clear(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    ManualListEditor::new(store.clone()).clear()?;
    info!("Cleared {}", store.storage_path().display());
    println!("Cache and manual override cleared");
    Ok(())
}

fn print_outcome(outcome: &LoadOutcome, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => {
            println!("Source: {}", outcome.source);
            println!("Count:  {}", outcome.count);
            if let Some(error) = &outcome.error {
                println!("Error:  {}", error);
            }
            for name in outcome.set.iter() {
                println!("  - {}", name);
            }
        }
    }
    Ok(())
}
