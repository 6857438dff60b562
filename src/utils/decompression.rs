use bytes::Bytes;

use crate::errors::{SourceError, SourceResult};

/// Compression formats recognised by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Uncompressed,
}

/// Magic byte detection and decompression for playlist payloads
pub struct DecompressionService;

impl DecompressionService {
    /// Detect compression format using magic bytes
    pub fn detect_compression_format(data: &[u8]) -> CompressionFormat {
        match infer::get(data).map(|kind| kind.mime_type()) {
            Some("application/gzip") => CompressionFormat::Gzip,
            _ => CompressionFormat::Uncompressed,
        }
    }

    /// Decompress data if it is compressed, otherwise return it unchanged
    ///
    /// The result never exceeds `max_bytes`; compressed input is expanded
    /// through a bounded reader so an oversized payload fails before it is
    /// fully inflated.
    pub fn decompress(data: Bytes, max_bytes: usize) -> SourceResult<Bytes> {
        match Self::detect_compression_format(&data) {
            CompressionFormat::Gzip => Self::decompress_gzip(data, max_bytes),
            CompressionFormat::Uncompressed if data.len() > max_bytes => {
                Err(SourceError::TooLarge { limit: max_bytes })
            }
            CompressionFormat::Uncompressed => Ok(data),
        }
    }

    #[cfg(feature = "compression-gzip")]
    fn decompress_gzip(data: Bytes, max_bytes: usize) -> SourceResult<Bytes> {
        use flate2::read::GzDecoder;
        use std::io::Read;

        let mut decoder = GzDecoder::new(data.as_ref()).take(max_bytes as u64 + 1);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| SourceError::Decompression {
                message: format!("gzip: {e}"),
            })?;

        if decompressed.len() > max_bytes {
            return Err(SourceError::TooLarge { limit: max_bytes });
        }
        Ok(Bytes::from(decompressed))
    }

    #[cfg(not(feature = "compression-gzip"))]
    fn decompress_gzip(_data: Bytes, _max_bytes: usize) -> SourceResult<Bytes> {
        Err(SourceError::Decompression {
            message: "gzip support not compiled in (enable the compression-gzip feature)"
                .to_string(),
        })
    }
}
