pub mod dser;
pub mod format;
pub mod headers;
pub mod paging;

use axum::extract::Multipart;
use base64::prelude::Engine;

use crate::Response;
/// base64 url safe encode
pub fn base64_encode(input: impl AsRef<[u8]>) -> String {
    base64::prelude::BASE64_URL_SAFE_NO_PAD.encode(input)
}

/// base64 url safe decode
pub fn base64_decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, base64::DecodeError> {
    base64::prelude::BASE64_URL_SAFE_NO_PAD.decode(input)
}
/// Ternary expression
#[macro_export]
macro_rules! do_if {
    ($pat:expr => $suc:expr, $e:expr) => {
        if $pat {
            $suc
        } else {
            $e
        }
    };
}

/// A random url-safe identifier of `len` bytes of entropy
pub fn gen_id(len: usize) -> String {
    use rand::RngCore;
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64_encode(bytes)
}

pub struct FilePart {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}
impl FilePart {
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or("measurement")
    }
}
/// Collects the `file`/`files` parts of a form; other fields are skipped.
pub async fn parse_multipart(mut part: Multipart) -> Result<Vec<FilePart>, Response> {
    let mut files = Vec::new();
    while let Some(field) = part.next_field().await? {
        if let Some("file") | Some("files") = field.name() {
            let filename = field.file_name().map(|s| s.to_owned());
            let content_type = field.content_type().map(|s| s.to_owned());
            let bytes = field.bytes().await?.to_vec();
            files.push(FilePart {
                bytes,
                filename,
                content_type,
            });
        }
    }
    Ok(files)
}
