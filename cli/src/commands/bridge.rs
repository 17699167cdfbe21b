use super::utils::resolve_frame;
use anyhow::{bail, Context, Result};
use planner_config::Config;
use planner_core::PathBuilder;
use planner_io::load_pois;
use planner_mqtt::{Bridge, RunOptions};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

pub async fn handle_bridge(config: &Config, once: bool, timeout_s: f64) -> Result<()> {
    let timeout = run_timeout(timeout_s)?;

    let map = load_pois(&config.planner.map_file).with_context(|| {
        format!("loading POI map {}", config.planner.map_file.display())
    })?;
    let frame = resolve_frame(None, map.frame.as_deref(), &config.planner.frame);
    info!(
        "loaded {} POIs from {} (frame {})",
        map.pois.len(),
        config.planner.map_file.display(),
        frame
    );

    let builder = PathBuilder::new(&map.pois, frame);
    let bridge = Bridge::new(&config.mqtt, builder).context("configuring MQTT client")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("interrupt received, shutting down");
        let _ = shutdown_tx.send(true);
    });

    let summary = bridge
        .run(shutdown_rx, RunOptions { once, timeout })
        .await
        .with_context(|| {
            format!(
                "running bridge against {}:{}",
                config.mqtt.broker, config.mqtt.port
            )
        })?;
    if once && summary.published == 0 {
        warn!("stopped before any path was published");
    }
    Ok(())
}

/// `0` disables the timeout.
fn run_timeout(seconds: f64) -> Result<Option<Duration>> {
    if !seconds.is_finite() || seconds < 0.0 {
        bail!("--timeout-s must be a non-negative number, got {}", seconds);
    }
    if seconds == 0.0 {
        return Ok(None);
    }
    Ok(Some(Duration::from_secs_f64(seconds)))
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_timeout() {
        assert_eq!(run_timeout(0.0).unwrap(), None);
        assert_eq!(
            run_timeout(1.5).unwrap(),
            Some(Duration::from_millis(1500))
        );
        assert!(run_timeout(-1.0).is_err());
        assert!(run_timeout(f64::NAN).is_err());
    }

    #[tokio::test]
    async fn test_missing_map_fails_before_connecting() {
        let mut config = Config::default();
        config.planner.map_file = "/nonexistent/poi.json".into();
        let err = handle_bridge(&config, true, 0.1).await.unwrap_err();
        assert!(err.to_string().contains("poi.json"));
    }
}
