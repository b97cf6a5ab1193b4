use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{trace, warn};

use crate::{media::MediaDescriptor, transport::PageTransport};

/// Fetch one descriptor's bytes and persist them. Every failure is soft: the
/// descriptor is left without a local path and the batch moves on.
pub(crate) async fn download_descriptor(
    transport: &dyn PageTransport,
    output_dir: Option<&Path>,
    media: &MediaDescriptor,
) -> Option<PathBuf> {
    let page = match transport.fetch(&media.source_url).await {
        Ok(page) => page,
        Err(e) => {
            warn!(?e, url = %media.source_url, "Asset request failed");
            return None;
        }
    };

    if page.status != reqwest::StatusCode::OK {
        warn!(status = %page.status, url = %media.source_url, "Asset returned non-OK status");
        return None;
    }

    match persist(output_dir, &media.filename, &page.body).await {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(?e, filename = %media.filename, "Failed to write asset to disk");
            None
        }
    }
}

async fn persist(
    output_dir: Option<&Path>,
    filename: &str,
    body: &[u8],
) -> std::io::Result<PathBuf> {
    let file_path = match output_dir {
        Some(dir) => {
            ensure_output_dir(dir).await?;
            dir.join(filename)
        }
        None => PathBuf::from(filename),
    };

    trace!(path = ?file_path, bytes = body.len(), "Writing asset to disk");
    fs::write(&file_path, body).await?;

    Ok(file_path)
}

async fn ensure_output_dir(dir: &Path) -> std::io::Result<()> {
    if matches!(fs::try_exists(dir).await, Ok(true)) {
        return Ok(());
    }

    fs::create_dir_all(dir).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, std::fs::Permissions::from_mode(0o777)).await?;
    }

    Ok(())
}
