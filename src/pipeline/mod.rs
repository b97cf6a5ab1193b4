mod extract;
mod naming;
mod save;
mod scopes;

pub use extract::PostKind;

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, trace, warn};

use crate::{
    config::HubConfig,
    error::Result,
    media::PipelineResult,
    transport::{HttpTransport, PageTransport},
};
use naming::FileNamer;
use scopes::ScopeContext;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Drives one resolution run against a single post URL, retrying hard
/// failures up to the attempt cap and optionally downloading every resolved
/// asset afterwards.
pub struct DlHub {
    config: HubConfig,
    transport: Box<dyn PageTransport>,
    namer: FileNamer,
}

impl DlHub {
    pub fn new(config: HubConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.header_map()?)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    pub(crate) fn with_transport(config: HubConfig, transport: Box<dyn PageTransport>) -> Self {
        let namer = FileNamer::new(
            config.output_prefix.clone(),
            config.output_filename.clone(),
        );

        Self {
            config,
            transport,
            namer,
        }
    }

    #[tracing::instrument(skip(self), fields(url = %self.config.url))]
    pub async fn run(mut self, download: bool, max_attempts: u32) -> PipelineResult {
        let mut result = PipelineResult::default();

        while result.attempts < max_attempts {
            result.attempts += 1;
            debug!(attempt = result.attempts, "Starting attempt");

            match self.attempt(&mut result).await {
                Ok(()) => {
                    if !result.media.is_empty() {
                        info!(media = result.media.len(), "Media resolved");
                        result.succeeded = Some(true);
                        break;
                    }
                    trace!(attempt = result.attempts, "Attempt resolved no media");
                }
                Err(e) => {
                    warn!(?e, attempt = result.attempts, "Attempt failed");
                    result.log_error(&e);

                    if result.attempts == max_attempts {
                        result.succeeded = Some(false);
                        break;
                    }
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
            }
        }

        if download {
            self.download_all(&mut result).await;
        }

        result
    }

    async fn attempt(&mut self, result: &mut PipelineResult) -> Result<()> {
        let page = self.transport.fetch(&self.config.url).await?;
        if result.final_url.is_none() {
            result.final_url = Some(page.effective_url.clone());
        }
        if !page.status.is_success() {
            debug!(status = %page.status, "Page fetch returned non-success status");
        }

        let (post_kind, owner_id) = extract::extract_post_id(&self.config.url)?;
        debug!(?post_kind, id = %owner_id, "Extracted post id");

        let body = String::from_utf8_lossy(&page.body);
        let Some(island) = extract::locate_data_island(&body) else {
            debug!("No data island found on page");
            return Ok(());
        };

        let root: Value = serde_json::from_str(&island)?;
        let cookies = self.transport.cookies();
        let mut ctx = ScopeContext {
            owner_id: &owner_id,
            cookies: &cookies,
            namer: &mut self.namer,
        };
        scopes::resolve_scopes(&root, &mut ctx, result);

        Ok(())
    }

    async fn download_all(&self, result: &mut PipelineResult) {
        for media in &mut result.media {
            let path = save::download_descriptor(
                self.transport.as_ref(),
                self.config.output_dir.as_deref(),
                media,
            )
            .await;

            if let Some(path) = path {
                info!(path = ?path, "Asset downloaded");
                media.path = Some(path);
            }
        }
    }
}
