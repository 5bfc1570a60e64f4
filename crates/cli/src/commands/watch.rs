// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tether watch`: probe the remote until Ctrl-C, draining on reconnect.

use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::drain::describe;
use super::{runtime, Context};
use crate::config::RemoteConfig;
use crate::error::Result;
use crate::sync::{spawn_probe_loop, NetworkMonitor, Transport};

pub fn run(ctx: &Context) -> Result<()> {
    let remote = ctx.config.remote()?.clone();
    runtime()?.block_on(async {
        let monitor = ctx.monitor().await?;
        let stop = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            }
        };
        watch_until(monitor, &remote, stop, &mut std::io::stdout()).await
    })
}

/// Run the probe loop until `stop` resolves.
///
/// When the monitor starts online, the queue is drained once before probing
/// begins.
pub(crate) async fn watch_until<T: Transport + 'static>(
    monitor: Arc<NetworkMonitor<T>>,
    remote: &RemoteConfig,
    stop: impl Future<Output = ()>,
    out: &mut impl Write,
) -> Result<()> {
    let target = remote.probe_target()?;
    writeln!(
        out,
        "watching {} ({}), Ctrl-C to stop",
        remote.base_url,
        monitor.state()
    )?;
    out.flush()?;

    if monitor.is_online() {
        if let Some(result) = monitor.trigger_drain().wait().await {
            writeln!(out, "{}", describe(&result?))?;
        }
    }

    let cancel = CancellationToken::new();
    let probe_loop = spawn_probe_loop(
        Arc::clone(&monitor),
        target,
        remote.probe_interval(),
        remote.probe_timeout(),
        cancel.clone(),
    );

    stop.await;
    tracing::info!("stopping watch");
    cancel.cancel();
    monitor.shutdown();
    if let Err(e) = probe_loop.await {
        tracing::warn!(error = %e, "probe loop ended abnormally");
    }
    Ok(())
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
