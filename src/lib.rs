pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod sampler;
pub mod state;

pub use config::{PodIdentity, Settings};
pub use error::Error;
pub use metrics::Metrics;
pub use sampler::{ResourceSampler, SamplerHandle};
pub use state::AppState;
