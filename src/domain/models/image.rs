#[cfg(test)]
#[path = "image_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::fs;

/// An inline image in the shape both the transcript (data URI) and the
/// Gemini API (mime type plus base64 payload) expect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    mime_type: String,
    data: String,
}

impl ImageData {
    pub fn parse(uri: &str) -> Result<ImageData> {
        let rest = match uri.strip_prefix("data:") {
            Some(rest) => rest,
            None => bail!("Image is not a data URI"),
        };

        let (header, data) = match rest.split_once(',') {
            Some(parts) => parts,
            None => bail!("Image data URI has no payload"),
        };

        let mime_type = match header.strip_suffix(";base64") {
            Some(mime_type) => mime_type,
            None => bail!("Image data URI is not base64 encoded"),
        };

        if !mime_type.starts_with("image/") {
            bail!(format!("Unsupported media type {mime_type}"));
        }

        STANDARD.decode(data)?;

        return Ok(ImageData {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        });
    }

    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> ImageData {
        return ImageData {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        };
    }

    pub async fn from_path(file_path: &path::Path) -> Result<ImageData> {
        let ext = file_path
            .extension()
            .map(|e| return e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let mime_type = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "heic" => "image/heic",
            _ => bail!(format!(
                "Unsupported image extension '{ext}' for {}",
                file_path.display()
            )),
        };

        let bytes = fs::read(file_path).await?;
        return Ok(ImageData::from_bytes(mime_type, &bytes));
    }

    pub fn mime_type(&self) -> &str {
        return &self.mime_type;
    }

    pub fn data(&self) -> &str {
        return &self.data;
    }

    pub fn byte_len(&self) -> usize {
        return STANDARD
            .decode(&self.data)
            .map(|bytes| return bytes.len())
            .unwrap_or_default();
    }

    pub fn to_data_uri(&self) -> String {
        return format!("data:{};base64,{}", self.mime_type, self.data);
    }
}
