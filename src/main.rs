// SPDX-License-Identifier: MPL-2.0
//! Headless demo session.
//!
//! Creates a staggered batch of widgets, has the first one report an action,
//! shows a notification and lets the countdowns run out before clearing
//! everything. The preview of the last creation, the statistics and the
//! activity log are printed on stdout.

use std::error::Error;
use std::path::PathBuf;

use live_mount::binding::Value;
use live_mount::config::{self, Config};
use live_mount::domain::component::ComponentKind;
use live_mount::lifecycle::{CreateRequest, Orchestrator};
use live_mount::mount::MemoryMount;
use live_mount::shape::{events, NotificationSpec, WidgetSpec};
use tokio::time::{interval, Instant};
use tracing_subscriber::EnvFilter;

const DEFAULT_WIDGETS: u64 = 3;

struct Args {
    config: Option<PathBuf>,
    widgets: u64,
    duration_ms: Option<u64>,
    save_config: bool,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    Ok(Args {
        save_config: args.contains("--save-config"),
        config: args.opt_value_from_str("--config")?,
        widgets: args
            .opt_value_from_str("--widgets")?
            .unwrap_or(DEFAULT_WIDGETS),
        duration_ms: args.opt_value_from_str("--duration-ms")?,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("live_mount=info")),
        )
        .init();

    let args = parse_args()?;
    let mut config = match &args.config {
        Some(path) if path.exists() => config::load_from_path(path)?,
        Some(_) => Config::default(),
        None => config::load()?,
    };
    if let Some(ms) = args.duration_ms {
        config.notification_duration_ms = Some(ms);
    }
    if args.save_config {
        match &args.config {
            Some(path) => config::save_to_path(&config, path)?,
            None => config::save(&config)?,
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run(config, args.widgets))
}

async fn run(config: Config, widgets: u64) -> Result<(), Box<dyn Error>> {
    let mount = MemoryMount::new();
    let orchestrator = Orchestrator::new(mount.clone(), &config);

    let flags = config.behavior_flags();
    let requests = (1..=widgets)
        .map(|n| {
            CreateRequest::widget(
                WidgetSpec::numbered(format!("{} {n}", config.widget_title()), n),
                flags,
            )
        })
        .collect();
    let created = orchestrator
        .create_batch(requests, config.stagger_delay())
        .await?;
    if let Some(preview) = orchestrator.last_preview() {
        println!("{preview}");
    }

    // Clicked from the widget itself, so it goes through its output binding.
    if let Some(first) = created.first() {
        mount.emit(
            first.id(),
            events::ACTION_PERFORMED,
            Value::record([("action", "like")]),
        );
    }

    let number = orchestrator.statistics().notifications_shown + 1;
    orchestrator.create_instance(
        ComponentKind::Notification,
        NotificationSpec::numbered(config.notification_title(), number, config.notification_duration())
            .into(),
        &[],
    )?;

    let mut ticker = interval(config.tick_interval().as_duration());
    let mut last = Instant::now();
    while !orchestrator
        .list_active(ComponentKind::Notification)
        .is_empty()
    {
        ticker.tick().await;
        let now = Instant::now();
        orchestrator.advance(now - last)?;
        last = now;
    }

    if let Some(closing) = created.last() {
        mount.emit(closing.id(), events::CLOSED, Value::Unit);
    }
    orchestrator.clear_all();

    println!("{}", serde_json::to_string_pretty(&orchestrator.statistics())?);
    println!("{}", serde_json::to_string_pretty(&orchestrator.activity())?);
    Ok(())
}
