//! Entry point for the innercircle waitlist app.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

use innercircle_app::STYLES_CSS;
use innercircle_app::cli::Args;
use innercircle_app::components::App;
use innercircle_app::referral::parse_inbound;
use innercircle_app::settings::AppSettings;
use innercircle_app::state::{AppContext, demo_waitlist};
use innercircle_client::RestWaitlist;
use innercircle_core::WaitlistClient;
use innercircle_logging::SubscriberBuilder;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = AppSettings::load(&args).context("failed to load settings")?;

    let _log_guard = SubscriberBuilder::new()
        .with_config(settings.logging.clone())
        .init();

    let client: Arc<dyn WaitlistClient> = if args.demo {
        tracing::info!("Demo mode: using in-memory waitlist");
        demo_waitlist()
    } else {
        let backend = settings
            .backend_config()
            .context("backend is not configured (use --config, INNERCIRCLE_* variables, or --demo)")?;
        tracing::info!(url = %backend.url, table = %backend.table, "Using REST backend");
        Arc::new(RestWaitlist::new(backend).context("invalid backend configuration")?)
    };

    let inbound_referral = args.referral.as_deref().and_then(parse_inbound);
    match (&args.referral, &inbound_referral) {
        (Some(raw), None) => tracing::warn!(input = %raw, "Ignoring --ref without a referral code"),
        (_, Some(code)) => tracing::info!(%code, "Opened with referral code"),
        _ => {}
    }

    let context = AppContext::new(
        client,
        settings.policy(),
        settings.share_formatter(),
        inbound_referral,
    );

    tracing::info!(
        policy = ?settings.duplicate_email,
        share_site = %settings.share_site,
        "Starting innercircle"
    );

    let window = WindowBuilder::new()
        .with_title("innercircle")
        .with_inner_size(LogicalSize::new(440.0, 760.0))
        .with_maximized(false);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(window)
                .with_custom_head(format!("<style>{}</style>", STYLES_CSS)),
        )
        .with_context(context)
        .launch(App);

    Ok(())
}
