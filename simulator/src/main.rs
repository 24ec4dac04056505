use anyhow::Context;
use bridge::server::{default_bind_address, serve, BridgeContext};
use clap::Parser;
use pennycore::MachineCatalog;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::{ConsoleSink, Runner};

mod bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "PennyMe proximity replay driver and HTTP bridge")]
struct Args {
    /// Replay the configured track once and print every notification
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// GeoJSON machine catalog (overrides the workflow file)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Search radius in kilometers (overrides the workflow file)
    #[arg(long)]
    radius: Option<f64>,
    /// Append a JSON summary of the offline run to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Keep an HTTP bridge alive for incoming location fixes
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = default_bind_address())]
    bind: SocketAddr,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow.as_ref() {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };
    if let Some(catalog) = args.catalog {
        workflow_config.catalog = Some(catalog);
    }
    if let Some(radius) = args.radius {
        workflow_config.search_radius_km = radius;
    }

    if args.offline {
        let mut runner = Runner::from_config(&workflow_config)?;
        let track = workflow_config.resolve_track()?;
        let result = runner.execute(&mut track.into_iter(), &ConsoleSink);

        println!(
            "Offline run -> fixes {}, evaluations {}, candidates {}, notifications {}",
            result.steps.len(),
            result.metrics.evaluations,
            result.metrics.candidates,
            result.notification_count()
        );

        if let Some(report_path) = args.report.as_ref() {
            if let Some(parent) = report_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(report_path)
                .with_context(|| format!("opening report {}", report_path.display()))?;
            let line = serde_json::to_string(&result).context("serializing offline report")?;
            writeln!(file, "{}", line)?;
        }
    }

    if args.serve {
        let path = workflow_config
            .catalog
            .clone()
            .context("no catalog configured (use --catalog or `catalog:` in the workflow)")?;
        let catalog = MachineCatalog::load_geojson(&path)
            .with_context(|| format!("loading catalog {}", path.display()))?;
        let settings = Arc::new(workflow_config.to_settings());

        let runtime = TokioBuilder::new_multi_thread()
            .enable_all()
            .build()
            .context("creating runtime for the HTTP bridge")?;
        runtime.block_on(async {
            let context = BridgeContext::start(catalog, settings);
            println!("[BRIDGE] listening on {} (Ctrl+C to stop)...", args.bind);
            tokio::select! {
                _ = serve(context, args.bind) => {}
                result = signal::ctrl_c() => {
                    result.context("awaiting Ctrl+C to exit")?;
                }
            }
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
