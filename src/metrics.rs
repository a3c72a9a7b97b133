//! Metrics registry.
//!
//! Holds the process-wide instruments exposed to the scrape endpoint:
//! a request counter for `/get_info` and the two host resource gauges
//! written by the background sampler. The registry lives in `AppState`
//! rather than in a global so tests can build isolated instances.

use prometheus::{Encoder, Gauge, IntCounter, Registry, TextEncoder};

/// Registry plus instruments. All update operations are atomic and safe to
/// call concurrently from request handlers and the sampler task.
pub struct Metrics {
    registry: Registry,
    get_info_requests: IntCounter,
    cpu_usage: Gauge,
    memory_usage_mb: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let get_info_requests = IntCounter::new(
            "get_info_requests_total",
            "Total number of requests served by /get_info",
        )?;
        let cpu_usage = Gauge::new(
            "cpu_usage_percent",
            "Host-wide CPU utilization percent over the last sampling window",
        )?;
        let memory_usage_mb = Gauge::new(
            "memory_usage_mb",
            "Used physical memory on the host in megabytes",
        )?;

        registry.register(Box::new(get_info_requests.clone()))?;
        registry.register(Box::new(cpu_usage.clone()))?;
        registry.register(Box::new(memory_usage_mb.clone()))?;

        Ok(Self {
            registry,
            get_info_requests,
            cpu_usage,
            memory_usage_mb,
        })
    }

    /// Count one handled `/get_info` request.
    pub fn inc_get_info_requests(&self) {
        self.get_info_requests.inc();
    }

    /// Overwrite the CPU gauge with the latest sample.
    pub fn set_cpu_usage(&self, percent: f64) {
        self.cpu_usage.set(percent);
    }

    /// Overwrite the memory gauge with the latest sample.
    pub fn set_memory_usage_mb(&self, megabytes: f64) {
        self.memory_usage_mb.set(megabytes);
    }

    pub fn get_info_requests(&self) -> u64 {
        self.get_info_requests.get()
    }

    pub fn cpu_usage(&self) -> f64 {
        self.cpu_usage.get()
    }

    pub fn memory_usage_mb(&self) -> f64 {
        self.memory_usage_mb.get()
    }

    /// Encode all registered instruments to Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counter_increments_by_one() {
        let metrics = Metrics::new().unwrap();
        assert_eq!(metrics.get_info_requests(), 0);

        metrics.inc_get_info_requests();
        assert_eq!(metrics.get_info_requests(), 1);

        metrics.inc_get_info_requests();
        assert_eq!(metrics.get_info_requests(), 2);
    }

    #[test]
    fn test_gauges_overwrite_not_accumulate() {
        let metrics = Metrics::new().unwrap();

        metrics.set_cpu_usage(42.5);
        metrics.set_cpu_usage(7.25);
        assert_eq!(metrics.cpu_usage(), 7.25);

        metrics.set_memory_usage_mb(1024.0);
        metrics.set_memory_usage_mb(512.0);
        assert_eq!(metrics.memory_usage_mb(), 512.0);
    }

    #[test]
    fn test_concurrent_increments_lose_no_updates() {
        let metrics = Arc::new(Metrics::new().unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = metrics.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        metrics.inc_get_info_requests();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.get_info_requests(), 8000);
    }

    #[test]
    fn test_render_exposes_all_instruments() {
        let metrics = Metrics::new().unwrap();
        metrics.inc_get_info_requests();
        metrics.set_cpu_usage(12.0);
        metrics.set_memory_usage_mb(256.0);

        let body = metrics.render().unwrap();
        assert!(body.contains("get_info_requests_total 1"));
        assert!(body.contains("cpu_usage_percent 12"));
        assert!(body.contains("memory_usage_mb 256"));
        assert!(body.contains("# TYPE get_info_requests_total counter"));
        assert!(body.contains("# TYPE cpu_usage_percent gauge"));
    }
}
