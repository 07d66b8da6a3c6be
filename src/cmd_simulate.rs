//! `simulate`: drive the evaluation loop against an in-memory profile page.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use irondome_config::Config;
use irondome_loader::ManualListEditor;
use irondome_page::{Document, LivePage, MarkerSpec, PageLayout, ProfileFixture};
use irondome_runloop::{EvaluationPipeline, EvaluationReport, MarkerRuntime, SchedulerHandle};

use crate::cli::OutputFormat;
use crate::cmd_list::{open_store, resolve_outcome};

const PROFILE_URL: &str = "https://www.torn.com/profiles.php?XID=1";
const SECOND_PROFILE_URL: &str = "https://www.torn.com/profiles.php?XID=2";

pub(crate) struct SimulateArgs {
    pub identity: Option<String>,
    pub no_container: bool,
    pub delay_ms: u64,
    pub navigate_to: Option<String>,
    pub paste: Option<String>,
    pub force: bool,
    pub format: OutputFormat,
}

fn fixture(identity: Option<&str>, no_container: bool) -> ProfileFixture {
    let mut fixture = ProfileFixture::new();
    if let Some(name) = identity {
        fixture = fixture.faction(name);
    }
    if no_container {
        fixture = fixture.without_container();
    }
    fixture
}

pub(crate) async fn handle_simulate(mut config: Config, args: SimulateArgs) -> anyhow::Result<()> {
    if args.force {
        config.page.force_show = true;
    }

    let store = open_store(&config)?;
    let outcome = Arc::new(resolve_outcome(&config, store.clone()).await);
    info!("Membership list: {} ({} entries)", outcome.source, outcome.count);

    let profile = fixture(args.identity.as_deref(), args.no_container);
    let initial_doc = if args.delay_ms > 0 {
        Document::new()
    } else {
        profile.build()
    };
    let page = Arc::new(LivePage::new(PROFILE_URL, initial_doc));

    if args.delay_ms > 0 {
        let page = page.clone();
        let delay = Duration::from_millis(args.delay_ms);
        tokio::spawn(async move {
            sleep(delay).await;
            page.mutate(|doc| *doc = profile.build());
        });
    }

    let pipeline = Arc::new(EvaluationPipeline::new(
        page.clone(),
        Arc::new(PageLayout::torn_profile()),
        MarkerSpec::from(&config.marker),
        outcome,
        &config.page,
    ));

    let runtime = MarkerRuntime::start(pipeline, page.clone(), &config.page).await;
    print_report(runtime.initial_report(), args.format)?;

    // Long enough for one debounce window plus a full readiness wait.
    let settle = config.page.debounce() + config.page.max_wait() + Duration::from_secs(1);

    if let Some(faction) = &args.navigate_to {
        let next = fixture(Some(faction), args.no_container);
        page.mutate(|doc| *doc = next.build());
        page.navigate(SECOND_PROFILE_URL);
        if let Some(report) = next_report(runtime.handle(), settle).await {
            print_report(&report, args.format)?;
        }
    }

    if let Some(json) = &args.paste {
        let editor = ManualListEditor::new(store).with_notifier(runtime.handle().sender());
        let count = editor
            .save_pasted(json)
            .await
            .context("Pasted list rejected")?;
        println!("Manual list saved: {} factions (applies from next start)", count);
        if let Some(report) = next_report(runtime.handle(), settle).await {
            print_report(&report, args.format)?;
        }
    }

    let stats = runtime.handle().stats();
    info!(
        triggers = stats.triggers,
        started = stats.started,
        deferred = stats.deferred,
        "Simulation finished"
    );
    runtime.shutdown().await;
    Ok(())
}

/// Wait for the scheduler to publish a report newer than the current one.
async fn next_report(handle: &SchedulerHandle, limit: Duration) -> Option<EvaluationReport> {
    let mut reports = handle.reports();
    reports.mark_unchanged();

    match timeout(limit, reports.changed()).await {
        Ok(Ok(())) => reports.borrow().clone(),
        Ok(Err(_)) => None,
        Err(_) => {
            warn!("No evaluation within {:?}", limit);
            None
        }
    }
}

fn print_report(report: &EvaluationReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => println!("{}", report),
    }
    Ok(())
}
