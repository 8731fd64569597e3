//! WAV container writer for raw linear PCM.
//!
//! The generation API returns headerless PCM. To make it playable we wrap it
//! in a canonical 44-byte RIFF/WAVE header. The payload is copied verbatim:
//! no resampling and no re-encoding. Misaligned buffers are logged, not rejected.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use super::base::{TTSError, TTSResult};

/// Size of the canonical PCM header.
pub const HEADER_SIZE: usize = 44;

/// Sample rate the generation API is assumed to produce.
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Channel count the generation API is assumed to produce.
pub const DEFAULT_CHANNELS: u16 = 1;

/// Bytes per sample the generation API is assumed to produce (16-bit).
pub const DEFAULT_SAMPLE_WIDTH: u16 = 2;

/// Linear PCM layout of a sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PcmFormat {
    pub channels: u16,
    pub sample_rate: u32,
    /// Bytes per sample, 1 through 4
    pub sample_width: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNELS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            sample_width: DEFAULT_SAMPLE_WIDTH,
        }
    }
}

impl PcmFormat {
    /// Create a validated format.
    pub fn new(channels: u16, sample_rate: u32, sample_width: u16) -> TTSResult<Self> {
        if channels == 0 {
            return Err(TTSError::ConfigurationError(
                "Channel count must be at least 1".to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(TTSError::ConfigurationError(
                "Sample rate must be greater than 0".to_string(),
            ));
        }
        if !(1..=4).contains(&sample_width) {
            return Err(TTSError::ConfigurationError(format!(
                "Sample width must be between 1 and 4 bytes, got {sample_width}"
            )));
        }

        // Header fields block_align (u16) and byte_rate (u32) must be representable
        let block_align = channels.checked_mul(sample_width);
        let byte_rate = block_align.and_then(|align| sample_rate.checked_mul(u32::from(align)));
        if byte_rate.is_none() {
            return Err(TTSError::ConfigurationError(format!(
                "{channels} channels of {sample_width}-byte samples at {sample_rate} Hz \
                 exceed the WAV header limits"
            )));
        }

        Ok(Self {
            channels,
            sample_rate,
            sample_width,
        })
    }

    #[inline]
    pub const fn bits_per_sample(&self) -> u16 {
        self.sample_width.saturating_mul(8)
    }

    /// Bytes per frame. Saturates for formats not built through [`PcmFormat::new`].
    #[inline]
    pub const fn block_align(&self) -> u16 {
        self.channels.saturating_mul(self.sample_width)
    }

    /// Bytes per second. Saturates for formats not built through [`PcmFormat::new`].
    #[inline]
    pub const fn byte_rate(&self) -> u32 {
        self.sample_rate.saturating_mul(self.block_align() as u32)
    }

    /// Playback length of `pcm_len` bytes in this format.
    pub fn duration_secs(&self, pcm_len: usize) -> f64 {
        pcm_len as f64 / self.byte_rate() as f64
    }

    /// Parse a linear PCM media type such as `audio/L16;codec=pcm;rate=24000`.
    ///
    /// Returns `None` when the descriptor is not linear PCM. Parameters that are
    /// absent fall back to the defaults (mono, 24 kHz).
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        let mut params = mime_type.split(';').map(str::trim);
        let essence = params.next()?.to_ascii_lowercase();

        let sample_width = match essence.as_str() {
            "audio/l8" => 1,
            "audio/l16" | "audio/pcm" => 2,
            "audio/l24" => 3,
            "audio/l32" => 4,
            _ => return None,
        };

        let mut format = Self {
            sample_width,
            ..Self::default()
        };

        for param in params {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            match key.trim().to_ascii_lowercase().as_str() {
                "rate" => format.sample_rate = value.trim().parse().ok()?,
                "channels" => format.channels = value.trim().parse().ok()?,
                _ => {}
            }
        }

        Self::new(format.channels, format.sample_rate, format.sample_width).ok()
    }
}

/// RIFF chunk size and data chunk size for a payload of `pcm_len` bytes.
fn chunk_sizes(pcm_len: usize) -> TTSResult<(u32, u32)> {
    let too_large = || {
        TTSError::ContainerWriteFailure(format!(
            "PCM payload of {pcm_len} bytes does not fit in a WAV file"
        ))
    };

    let data_size = u32::try_from(pcm_len).map_err(|_| too_large())?;
    let chunk_size = data_size
        .checked_add((HEADER_SIZE - 8) as u32)
        .ok_or_else(too_large)?;
    Ok((chunk_size, data_size))
}

/// Wrap raw PCM in a RIFF/WAVE container.
///
/// The header sizes always reflect `pcm.len()`, even when the buffer does not
/// end on a frame boundary. Payloads too large for 32-bit RIFF sizes are
/// rejected with `ContainerWriteFailure`.
pub fn write_wav(pcm: &[u8], format: PcmFormat) -> TTSResult<Vec<u8>> {
    let (chunk_size, data_size) = chunk_sizes(pcm.len())?;

    let mut wav = Vec::with_capacity(HEADER_SIZE + pcm.len());

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&chunk_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt subchunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // Subchunk1Size (16 for PCM)
    wav.extend_from_slice(&1u16.to_le_bytes()); // AudioFormat (1 = PCM)
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&format.byte_rate().to_le_bytes());
    wav.extend_from_slice(&format.block_align().to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample().to_le_bytes());

    // data subchunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);

    let frame = format.block_align() as usize;
    if frame > 0 && pcm.len() % frame != 0 {
        warn!(
            "PCM buffer of {} bytes is not aligned to {}-byte frames",
            pcm.len(),
            format.block_align()
        );
    }

    Ok(wav)
}

/// Write a finished WAV file, replacing any previous file at `path`.
pub async fn write_wav_file(path: &Path, wav: &[u8]) -> TTSResult<()> {
    tokio::fs::write(path, wav)
        .await
        .map_err(|e| TTSError::ContainerWriteFailure(format!("{}: {e}", path.display())))?;

    debug!("Wrote {} bytes to {}", wav.len(), path.display());
    Ok(())
}
