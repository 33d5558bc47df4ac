use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use livemirror::config::Config;
use livemirror::watcher::sync_registry;
use livemirror::{HttpSource, Registry, Session, SnapshotSource, Watcher};

#[derive(Parser)]
#[command(version)]
struct Args {
    /// Set config file path
    #[arg(short, long)]
    config: Option<String>,
    /// Session id to watch, can be repeated. Without any, every session is mirrored
    #[arg(short, long)]
    session: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut cfg = Config::parse(args.config)?;
    cfg.watch.sessions.extend(args.session);

    livemirror::log::set(&cfg.log.level)?;
    warn!("set log level : {}", cfg.log.level);
    debug!(
        "server : {}, sessions : {:?}",
        cfg.server.url, cfg.watch.sessions
    );

    let source: Arc<dyn SnapshotSource> =
        Arc::new(HttpSource::from_config(&cfg.server).map_err(|e| anyhow!("{}", e))?);
    let tick = Duration::from_millis(cfg.watch.tick_time.0);
    let (stop_tx, stop_rx) = watch::channel(false);

    let mut handles = Vec::new();
    if cfg.watch.sessions.is_empty() {
        handles.push(tokio::spawn(registry_sync(
            source,
            tick,
            stopped(stop_rx),
        )));
    } else {
        let (change_tx, change_rx) = mpsc::channel::<Session>(16);
        tokio::spawn(report_changes(change_rx));
        for session_id in cfg.watch.sessions {
            let watcher = Watcher::new(session_id, source.clone());
            let signal = stopped(stop_rx.clone());
            let changes = Some(change_tx.clone());
            handles.push(tokio::spawn(async move {
                watcher.watch(tick, changes, signal).await;
            }));
        }
    }

    let signal = shutdown_signal().await;
    debug!("Received signal: {}", signal);
    stop_tx.send_replace(true);
    for handle in handles {
        if let Err(e) = handle.await {
            error!("watch task error: {:?}", e);
        }
    }
    info!("Mirror shutdown");
    Ok(())
}

async fn registry_sync<F>(source: Arc<dyn SnapshotSource>, tick: Duration, signal: F)
where
    F: std::future::Future<Output = ()>,
{
    tokio::pin!(signal);
    let mut registry = Registry::new();
    loop {
        match sync_registry(&mut registry, source.as_ref()).await {
            Ok(true) => info!(sessions = registry.len(), "sessions changed"),
            Ok(false) => {}
            Err(e) => error!("sessions fetch error: {}", e),
        }
        tokio::select! {
            _ = &mut signal => break,
            _ = tokio::time::sleep(tick) => {}
        }
    }
}

async fn report_changes(mut changes: mpsc::Receiver<Session>) {
    while let Some(session) = changes.recv().await {
        for connection in session.connections() {
            info!(
                session = %session.session_id,
                connection = %connection.connection_id,
                status = ?connection.status,
                publishers = connection.publisher_count(),
                subscribers = connection.subscribers().count(),
                "connection state"
            );
        }
    }
}

async fn stopped(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let (Ok(mut terminate), Ok(mut interrupt)) = (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) else {
        return ctrl_c().await;
    };
    tokio::select! {
        _ = terminate.recv() => "SIGTERM",
        _ = interrupt.recv() => "SIGINT",
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "CTRL_C",
        Err(_) => "CTRL_C_UNAVAILABLE",
    }
}
