use anyhow::Context;
use async_trait::async_trait;
use lz4_flex::frame::FrameDecoder;
use std::io::Read;
use strawcond_config::MidasConfig;
use strawcond_core::ConfigSource;
use tracing::{debug, info};

use crate::command::{capture_stdout, remote_cat};

/// Decodes a single LZ4 frame.
pub fn decompress_frame(compressed: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(compressed.len() * 4);
    FrameDecoder::new(compressed)
        .read_to_end(&mut payload)
        .context("LZ4 frame decompression failed")?;
    Ok(payload)
}

/// Run configuration archives on the DAQ host, fetched over ssh.
pub struct MidasArchive {
    config: MidasConfig,
}

impl MidasArchive {
    #[must_use]
    pub fn new(config: &MidasConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl ConfigSource for MidasArchive {
    async fn fetch_payload(&self, run: u32) -> anyhow::Result<Vec<u8>> {
        let path = self.config.remote_path(run)?;
        info!("Fetching run {} configuration from {}:{}", run, self.config.host, path);

        let compressed = capture_stdout(&remote_cat(&self.config.host, &path))
            .await
            .with_context(|| format!("Cannot retrieve {}:{path}", self.config.host))?;
        let payload = decompress_frame(&compressed)
            .with_context(|| format!("Corrupt archive {}:{path}", self.config.host))?;

        debug!(
            "Decompressed {} bytes into {} byte payload",
            compressed.len(),
            payload.len()
        );
        Ok(payload)
    }
}
