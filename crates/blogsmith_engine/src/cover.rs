//! Cover image download and banner resizing.

use std::io::Cursor;
use std::time::Duration;

use futures_util::StreamExt;
use image::imageops::FilterType;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct CoverSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Fixed banner dimensions applied on save.
    pub banner_size: (u32, u32),
}

impl Default for CoverSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 10 * 1024 * 1024,
            banner_size: (300, 300),
        }
    }
}

#[derive(Debug, Error)]
pub enum CoverError {
    #[error("image download returned http status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("image larger than {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },
    #[error("could not decode image: {0}")]
    Decode(String),
    #[error("could not encode image: {0}")]
    Encode(String),
}

/// Download the cover image bytes via a streaming GET.
///
/// Any non-200 status aborts the run; the pipeline must never continue
/// with a missing cover image.
pub async fn fetch_cover(url: &str, settings: &CoverSettings) -> Result<Vec<u8>, CoverError> {
    let client = reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| CoverError::Network(err.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| CoverError::Network(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CoverError::HttpStatus(status.as_u16()));
    }

    if let Some(content_len) = response.content_length() {
        if content_len > settings.max_bytes {
            return Err(CoverError::TooLarge {
                max_bytes: settings.max_bytes,
            });
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| CoverError::Network(err.to_string()))?;
        if bytes.len() as u64 + chunk.len() as u64 > settings.max_bytes {
            return Err(CoverError::TooLarge {
                max_bytes: settings.max_bytes,
            });
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

/// Decode `bytes`, stretch to exactly `size` and re-encode as PNG.
///
/// The stretch is non-aspect-preserving: the banner slot is a fixed
/// rectangle and the source is whatever the image endpoint produced.
pub fn resize_banner(bytes: &[u8], size: (u32, u32)) -> Result<Vec<u8>, CoverError> {
    let img = image::load_from_memory(bytes).map_err(|err| CoverError::Decode(err.to_string()))?;
    let (width, height) = size;
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);

    let mut buf = Cursor::new(Vec::new());
    resized
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|err| CoverError::Encode(err.to_string()))?;
    Ok(buf.into_inner())
}
