//! Periodic host resource sampling.
//!
//! A single background task measures host-wide CPU utilization and used
//! physical memory on a fixed cadence and overwrites the corresponding
//! gauges. CPU utilization is observed over a one-second window (two
//! refreshes bracketing a sleep), so a full loop iteration takes roughly
//! the sampling interval plus one second.

use std::sync::Arc;
use std::time::Duration;

use sysinfo::System;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::metrics::Metrics;

const SAMPLE_INTERVAL: Duration = Duration::from_secs(5);
const CPU_WINDOW: Duration = Duration::from_secs(1);

pub struct ResourceSampler {
    metrics: Arc<Metrics>,
    system: System,
    interval: Duration,
    cpu_window: Duration,
}

impl ResourceSampler {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self::with_intervals(metrics, SAMPLE_INTERVAL, CPU_WINDOW)
    }

    /// Sampler with a custom cadence. Tests use this to run fast cycles.
    pub fn with_intervals(metrics: Arc<Metrics>, interval: Duration, cpu_window: Duration) -> Self {
        Self {
            metrics,
            system: System::new(),
            interval,
            cpu_window,
        }
    }

    /// Spawn the sampling loop on the runtime and return a stop handle.
    ///
    /// The loop must run on its own task: the CPU observation window blocks
    /// the sampler for up to a second per tick and must never stall request
    /// handling.
    pub fn spawn(self) -> SamplerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        SamplerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            self.sample_once().await;
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                // Stop requests (or a dropped handle) end the loop at the
                // tick boundary.
                _ = shutdown.changed() => {
                    tracing::debug!("Resource sampler stopping");
                    break;
                }
            }
        }
    }

    /// Take one CPU and memory measurement and publish it to the gauges.
    ///
    /// sysinfo reads are infallible; on platforms where host introspection
    /// is restricted they report zeros, which are published as-is.
    async fn sample_once(&mut self) {
        self.system.refresh_cpu_usage();
        tokio::time::sleep(self.cpu_window).await;
        self.system.refresh_cpu_usage();
        let cpu_percent = f64::from(self.system.global_cpu_info().cpu_usage());

        self.system.refresh_memory();
        let memory_mb = self.system.used_memory() as f64 / (1024.0 * 1024.0);

        self.metrics.set_cpu_usage(cpu_percent);
        self.metrics.set_memory_usage_mb(memory_mb);

        tracing::debug!(cpu_percent, memory_mb, "Sampled host resources");
    }
}

/// Handle to a running sampler task.
pub struct SamplerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SamplerHandle {
    /// Signal the loop to stop and wait for it to finish its current tick.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_sample_once_updates_gauges() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let mut sampler = ResourceSampler::with_intervals(
            metrics.clone(),
            Duration::from_millis(10),
            Duration::from_millis(10),
        );

        sampler.sample_once().await;

        let cpu = metrics.cpu_usage();
        let memory = metrics.memory_usage_mb();
        assert!(cpu.is_finite() && cpu >= 0.0);
        assert!(memory.is_finite() && memory >= 0.0);
    }

    #[tokio::test]
    async fn test_loop_overwrites_with_latest_sample() {
        let metrics = Arc::new(Metrics::new().unwrap());
        metrics.set_cpu_usage(-1.0);
        metrics.set_memory_usage_mb(-1.0);

        let sampler = ResourceSampler::with_intervals(
            metrics.clone(),
            Duration::from_millis(5),
            Duration::from_millis(1),
        );
        let handle = sampler.spawn();
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stop().await;

        // The sentinel values must have been overwritten by real samples.
        assert!(metrics.cpu_usage() >= 0.0);
        assert!(metrics.memory_usage_mb() >= 0.0);
    }

    #[tokio::test]
    async fn test_stop_terminates_loop_at_tick_boundary() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let sampler = ResourceSampler::with_intervals(
            metrics,
            Duration::from_millis(10),
            Duration::from_millis(1),
        );

        let handle = sampler.spawn();
        timeout(Duration::from_secs(5), handle.stop())
            .await
            .expect("sampler did not stop at the tick boundary");
    }
}
