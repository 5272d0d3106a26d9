//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// Copy a directory tree recursively, overwriting same-named destination paths.
///
/// This is a full verbatim copy: contents are never inspected or transformed,
/// and there are no incremental-update semantics.
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let dst_path = dst_ref.join(entry.file_name());

        if entry_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&entry_path, &dst_path)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Count regular files under a directory tree
pub fn count_files(root: &Path) -> u64 {
    WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_recursive_copies_nested_tree() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("sub/deeper")).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();
        fs::write(src.join("sub/b.txt"), "b").unwrap();
        fs::write(src.join("sub/deeper/c.txt"), "c").unwrap();

        copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dst.join("sub/b.txt")).unwrap(), "b");
        assert_eq!(
            fs::read_to_string(dst.join("sub/deeper/c.txt")).unwrap(),
            "c"
        );
    }

    #[test]
    fn test_copy_dir_recursive_overwrites_existing_files() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("main.py"), "new").unwrap();
        fs::write(dst.join("main.py"), "old").unwrap();

        copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("main.py")).unwrap(), "new");
    }

    #[test]
    fn test_count_files() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        fs::create_dir_all(temp.path().join("a/b")).unwrap();
        fs::write(temp.path().join("one"), "").unwrap();
        fs::write(temp.path().join("a/two"), "").unwrap();
        fs::write(temp.path().join("a/b/three"), "").unwrap();

        assert_eq!(count_files(temp.path()), 3);
    }
}
