//! Copy harness input files into a test directory

use log::debug;
use relay_core::{RelayError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Copy each of `files` from `src_base` into `dest_base`, by base name.
///
/// Only the file name of each entry is used, so `preproc/notice.pgc` is read
/// from `src_base/notice.pgc`. Permissions and modification times are kept.
pub fn stage_files<P: AsRef<Path>>(
    src_base: &Path,
    dest_base: &Path,
    files: &[P],
) -> Result<Vec<PathBuf>> {
    if files.is_empty() {
        return Err(RelayError::InvalidArgument(
            "at least one file must be staged".to_string(),
        ));
    }

    fs::create_dir_all(dest_base).map_err(|source| RelayError::Stage {
        path: dest_base.to_path_buf(),
        source,
    })?;

    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let file = file.as_ref();
        let name = file.file_name().ok_or_else(|| {
            RelayError::InvalidArgument(format!("no file name in {}", file.display()))
        })?;
        let src = src_base.join(name);
        let dest = dest_base.join(name);

        copy_with_mtime(&src, &dest)?;
        debug!("Staged {} -> {}", src.display(), dest.display());
        staged.push(dest);
    }

    Ok(staged)
}

fn stage_err(path: &Path) -> impl FnOnce(io::Error) -> RelayError {
    let path = path.to_path_buf();
    move |source| RelayError::Stage { path, source }
}

fn copy_with_mtime(src: &Path, dest: &Path) -> Result<()> {
    fs::copy(src, dest).map_err(stage_err(src))?;
    let modified = fs::metadata(src)
        .and_then(|m| m.modified())
        .map_err(stage_err(src))?;
    File::options()
        .write(true)
        .open(dest)
        .and_then(|f| f.set_modified(modified))
        .map_err(stage_err(dest))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    #[test]
    fn stages_by_base_name() {
        let src = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(src.path().join("notice.pgc"), "EXEC SQL BEGIN;").unwrap();
        fs::write(src.path().join("notice_informix.pgc"), "EXEC SQL END;").unwrap();

        let target = dest.path().join("preproc");
        let staged = stage_files(
            src.path(),
            &target,
            &["preproc/notice.pgc", "other/notice_informix.pgc"],
        )
        .unwrap();

        assert_eq!(staged.len(), 2);
        assert_eq!(
            fs::read_to_string(target.join("notice.pgc")).unwrap(),
            "EXEC SQL BEGIN;"
        );
        assert_eq!(
            fs::read_to_string(target.join("notice_informix.pgc")).unwrap(),
            "EXEC SQL END;"
        );
    }

    #[test]
    fn keeps_mode_and_mtime() {
        let src = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let file = src.path().join("run.sh");
        fs::write(&file, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o750)).unwrap();
        let old = SystemTime::now() - Duration::from_secs(3600);
        File::options()
            .write(true)
            .open(&file)
            .unwrap()
            .set_modified(old)
            .unwrap();

        stage_files(src.path(), dest.path(), &["run.sh"]).unwrap();

        let meta = fs::metadata(dest.path().join("run.sh")).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o750);
        assert_eq!(meta.modified().unwrap(), fs::metadata(&file).unwrap().modified().unwrap());
    }

    #[test]
    fn missing_source_names_path() {
        let src = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let err = stage_files(src.path(), dest.path(), &["absent.pgc"]).unwrap_err();
        match err {
            RelayError::Stage { path, .. } => assert!(path.ends_with("absent.pgc")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn requires_at_least_one_file() {
        let dir = tempdir().unwrap();
        let none: [&str; 0] = [];
        assert!(stage_files(dir.path(), dir.path(), &none).is_err());
    }
}
