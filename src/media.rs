//! Media loading: local files into base64 payloads for inline parts.
//!
//! Frame sampling happens elsewhere; frames arrive here as JPEG files
//! that only need encoding.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::strategy::MediaAsset;

/// MIME type from a file extension. Unknown extensions are sent as
/// `application/octet-stream`.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mpeg" | "mpg" => "video/mpeg",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

fn read(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

/// Read a file into a `MediaAsset`.
pub fn load_asset(path: &Path) -> Result<MediaAsset, String> {
    let bytes = read(path)?;
    let mime_type = guess_mime(path).to_string();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    log::info!(
        "[MEDIA] Loaded {} ({}, {} bytes)",
        path.display(),
        mime_type,
        bytes.len()
    );
    Ok(MediaAsset {
        data: encode(&bytes),
        mime_type,
        name,
    })
}

/// Read an already-encoded JPEG keyframe into its base64 payload.
pub fn load_keyframe(path: &Path) -> Result<String, String> {
    if guess_mime(path) != "image/jpeg" {
        log::warn!("[MEDIA] Keyframe {} is not a .jpg, sending as JPEG anyway", path.display());
    }
    let bytes = read(path)?;
    Ok(encode(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nebula-media-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn mime_from_extension_is_case_insensitive() {
        assert_eq!(guess_mime(Path::new("shot.PNG")), "image/png");
        assert_eq!(guess_mime(Path::new("clip.mov")), "video/quicktime");
        assert_eq!(guess_mime(Path::new("frame.jpeg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn asset_is_base64_with_name() {
        let path = temp_file("hello.png", b"hello");
        let asset = load_asset(&path).unwrap();
        assert_eq!(asset.data, "aGVsbG8=");
        assert_eq!(asset.mime_type, "image/png");
        assert_eq!(asset.name, "hello.png");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn keyframe_is_plain_base64() {
        let path = temp_file("frame-001.jpg", &[0xFF, 0xD8, 0xFF]);
        assert_eq!(load_keyframe(&path).unwrap(), "/9j/");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_asset(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(err.contains("/definitely/not/here.png"));
    }
}
