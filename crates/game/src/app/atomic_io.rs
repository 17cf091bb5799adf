use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes to a sibling temp file, then renames over `path`, so readers only
/// ever see the old or the new contents.
pub(crate) fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    if let Err(error) = fs::write(&tmp_path, text) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("save");
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn replaces_existing_file_and_leaves_no_temp() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("high_scores.json");
        fs::write(&path, "old").expect("seed");

        write_text_atomic(&path, "new").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "new");
        assert!(!temp.path().join("high_scores.json.tmp").exists());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("nested").join("scores.json");
        write_text_atomic(&path, "[]").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[]");
    }

    #[test]
    fn directory_target_fails_without_leaving_temp() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("occupied");
        fs::create_dir_all(path.join("child")).expect("mkdir");

        assert!(write_text_atomic(&path, "[]").is_err());
        assert!(!temp.path().join("occupied.tmp").exists());
    }
}
