#![forbid(unsafe_code)]

//! Output artifact naming and writing.
//!
//! Concurrent generations share one output directory, so names must not
//! collide even when two requests finish within the same millisecond. A
//! timestamp alone has a real collision window; the UUID discriminator
//! closes it.

use std::path::{Path, PathBuf};

/// `<prefix>_<UTC yyyymmddHHMMSSmmm>_<uuid>.<ext>` — sortable by creation
/// time, unique per request.
pub fn artifact_file_name(prefix: &str, ext: &str) -> String {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%3f");
    let tag = uuid::Uuid::new_v4().simple();
    format!("{prefix}_{stamp}_{tag}.{ext}")
}

/// Writes `bytes` into `dir` under a fresh artifact name, creating the
/// directory if needed, and returns the written path.
///
/// The caller hands in fully-encoded bytes, so the file is complete as soon
/// as it exists.
pub fn write_artifact(dir: &Path, prefix: &str, ext: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(artifact_file_name(prefix, ext));
    std::fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_do_not_collide_in_a_tight_loop() {
        let mut names: Vec<String> = (0..100)
            .map(|_| artifact_file_name("mindmap", "png"))
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 100);
    }

    #[test]
    fn name_shape_is_prefix_stamp_tag_ext() {
        let name = artifact_file_name("mindmap", "png");
        assert!(name.starts_with("mindmap_"));
        assert!(name.ends_with(".png"));
        let stem = name.strip_suffix(".png").unwrap();
        let parts: Vec<&str> = stem.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 17);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 32);
    }

    #[test]
    fn write_artifact_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("outputs");
        let path = write_artifact(&nested, "mindmap", "svg", b"<svg/>").unwrap();
        assert!(path.starts_with(&nested));
        assert_eq!(std::fs::read(&path).unwrap(), b"<svg/>");
    }
}
