//! Polling provider
//!
//! Samples a [`SnapshotSource`] on a dedicated thread at the configured
//! interval, runs each snapshot through a [`ControllerState`] and forwards the
//! resulting events to subscribed listeners on the tokio runtime.
//!
//! The source is constructed inside the polling thread because device
//! handles (gilrs in particular) are not `Send`.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};

use super::controller::{ControllerEvent, ControllerState};
use super::snapshot::RawSnapshot;
use crate::config::AppConfig;

/// Producer of raw device snapshots.
pub trait SnapshotSource {
    /// Sample the device. `None` means nothing is available this tick and the
    /// tick is skipped.
    fn poll(&mut self) -> Option<RawSnapshot>;
}

/// Callback type for controller events
pub type EventCallback = Arc<dyn Fn(ControllerEvent) + Send + Sync>;

/// Controller provider with listener fan-out
pub struct GamepadProvider {
    event_listeners: Arc<RwLock<Vec<EventCallback>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl GamepadProvider {
    /// Create and start a new provider
    ///
    /// # Arguments
    /// * `config` - Validated application configuration
    /// * `listeners` - Callbacks registered before the first tick
    /// * `make_source` - Builds the snapshot source on the polling thread
    ///
    /// # Returns
    /// Running provider instance, or the source's construction error. When
    /// polling is disabled no thread is started and listeners never fire.
    pub async fn start<S, F>(
        config: &AppConfig,
        listeners: Vec<EventCallback>,
        make_source: F,
    ) -> Result<Self>
    where
        S: SnapshotSource + 'static,
        F: FnOnce() -> Result<S> + Send + 'static,
    {
        config.validate()?;

        let event_listeners = Arc::new(RwLock::new(listeners));

        if !config.polling.enabled {
            info!("Polling disabled, controller provider idle");
            return Ok(Self {
                event_listeners,
                shutdown_tx: None,
            });
        }

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();

        // Create a channel for sending events from blocking thread to async world
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ControllerEvent>();

        let interval = Duration::from_millis(config.polling.interval_ms);
        let state = ControllerState::new(&config.sticks);

        // Spawn blocking poll loop in a dedicated thread
        std::thread::Builder::new()
            .name("xcontroller-poll".to_string())
            .spawn(move || {
                let source = match make_source() {
                    Ok(s) => s,
                    Err(e) => {
                        let _ = init_tx.send(Err(e));
                        return;
                    },
                };
                if init_tx.send(Ok(())).is_err() {
                    return;
                }
                Self::poll_loop_blocking(source, state, interval, event_tx, shutdown_rx);
            })?;

        init_rx
            .await
            .context("Polling thread exited during initialization")?
            .context("Failed to initialize snapshot source")?;

        // Spawn async task to forward events to listeners
        let listeners_clone = event_listeners.clone();
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                debug!("Controller event: {:?}", event);
                let listeners = listeners_clone.read().await;
                for callback in listeners.iter() {
                    callback(event.clone());
                }
            }
            debug!("Controller event forwarder stopped");
        });

        info!("Controller provider started ({} ms interval)", config.polling.interval_ms);

        Ok(Self {
            event_listeners,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Subscribe to controller events
    pub async fn subscribe(&self, callback: EventCallback) {
        let mut listeners = self.event_listeners.write().await;
        listeners.push(callback);
    }

    /// Main poll loop (runs in dedicated blocking thread)
    fn poll_loop_blocking<S: SnapshotSource>(
        mut source: S,
        mut state: ControllerState,
        interval: Duration,
        event_tx: mpsc::UnboundedSender<ControllerEvent>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut last_loop = Instant::now();

        loop {
            // Check for shutdown signal (non-blocking)
            match shutdown_rx.try_recv() {
                Ok(_) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    debug!("Controller provider shutting down");
                    break;
                },
                Err(mpsc::error::TryRecvError::Empty) => {},
            }

            match source.poll() {
                Some(raw) => {
                    for event in state.update(&raw) {
                        if event_tx.send(event).is_err() {
                            warn!("Event receiver dropped, stopping poll loop");
                            return;
                        }
                    }
                },
                None => trace!("No snapshot this tick"),
            }

            let elapsed = last_loop.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
            last_loop = Instant::now();
        }
    }

    /// Shutdown the provider
    pub async fn shutdown(&mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
            debug!("Controller provider shutdown requested");
        }
        Ok(())
    }
}

impl Drop for GamepadProvider {
    fn drop(&mut self) {
        // Attempt to send shutdown signal if not already sent
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
        }
    }
}
