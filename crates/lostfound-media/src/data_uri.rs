use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use thiserror::Error;

/// MIME type used when neither the upload nor its file name says otherwise.
const FALLBACK_MIME: &str = "image/png";

/// One uploaded file as received from the report form.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// A file input left blank still posts a part, with no name and no body.
    pub fn is_blank(&self) -> bool {
        self.bytes.is_empty() && self.file_name.as_deref().is_none_or(|n| n.trim().is_empty())
    }

    fn mime_type(&self) -> &str {
        if let Some(declared) = self
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| ct.starts_with("image/"))
        {
            return declared;
        }

        let ext = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => FALLBACK_MIME,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("uploaded file {0:?} is empty")]
    Empty(String),
}

/// Encodes an upload as a `data:<mime>;base64,<payload>` URI.
///
/// Returns `Ok(None)` when no file was uploaded. No size or content checks
/// are made here; callers decide how to treat an error.
pub fn encode(upload: Option<&ImageUpload>) -> Result<Option<String>, EncodeError> {
    let Some(upload) = upload.filter(|u| !u.is_blank()) else {
        return Ok(None);
    };

    if upload.bytes.is_empty() {
        return Err(EncodeError::Empty(
            upload.file_name.clone().unwrap_or_default(),
        ));
    }

    Ok(Some(format!(
        "data:{};base64,{}",
        upload.mime_type(),
        B64.encode(&upload.bytes)
    )))
}
