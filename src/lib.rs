pub mod config;
pub mod error;
mod helpers;
pub mod media;
pub mod pipeline;
pub mod transport;

pub use config::{HubConfig, DEFAULT_OUTPUT_PREFIX};
pub use error::DlHubError;
pub use media::{CookieSnapshot, MediaDescriptor, MediaKind, PipelineResult, SessionCookie};
pub use pipeline::{DlHub, PostKind, DEFAULT_MAX_ATTEMPTS};
