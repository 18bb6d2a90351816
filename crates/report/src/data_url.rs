//! Self-contained `data:` URIs for embedding images

use crate::form::SelectedFile;
use crate::{ExportError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A decoded `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encode bytes as `data:<mime>;base64,<payload>`
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decode a base64 `data:` URI
pub fn decode(url: &str) -> Result<DataUrl> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ExportError::DataUrl("missing data: scheme".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ExportError::DataUrl("missing payload separator".to_string()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| ExportError::DataUrl("only base64 payloads are supported".to_string()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| ExportError::DataUrl(e.to_string()))?;

    Ok(DataUrl {
        mime: mime.to_string(),
        bytes,
    })
}

/// Read a selected file in full and wrap it as a `data:` URI
///
/// A file without a declared type is encoded as `application/octet-stream`.
pub async fn file_to_data_url<F: SelectedFile>(file: &F) -> Result<String> {
    let bytes = file.read_bytes().await?;
    let mime = file.mime_type();

    log::debug!("read {} ({} bytes, {mime:?})", file.name(), bytes.len());
    Ok(encode(&mime, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryFile;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_decode() {
        let url = encode("image/png", b"hello");
        assert_eq!(url, "data:image/png;base64,aGVsbG8=");

        let decoded = decode(&url).unwrap();
        assert_eq!(decoded.mime, "image/png");
        assert_eq!(decoded.bytes, b"hello");
    }

    #[test]
    fn test_encode_without_mime() {
        assert_eq!(encode("", &[]), "data:application/octet-stream;base64,");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode("https://example.com/a.png").is_err());
        assert!(decode("data:image/png;base64").is_err());
        assert!(decode("data:text/plain,hello").is_err());
        assert!(decode("data:image/png;base64,@@@").is_err());
    }

    #[tokio::test]
    async fn test_file_to_data_url_without_type() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let file = MemoryFile::new("photo", "", jpeg);

        let url = file_to_data_url(&file).await.unwrap();
        assert_eq!(url, "data:application/octet-stream;base64,/9j/4A==");
    }

    #[tokio::test]
    async fn test_file_to_data_url_keeps_declared_type() {
        let file = MemoryFile::new("scan.webp", "image/webp", vec![1, 2, 3]);
        let url = file_to_data_url(&file).await.unwrap();
        assert_eq!(url, "data:image/webp;base64,AQID");
    }
}
