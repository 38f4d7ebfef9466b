//! Scanning and deletion of known project-tree leftovers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Root-level directories duplicating the ones under `ecommerce/`.
const DUPLICATE_ROOT_DIRS: [&str; 4] = ["shop", "static", "templates", "media"];

/// Random suffixes product images grew when the same file was uploaded
/// twice.
pub const DUPLICATE_IMAGE_SUFFIXES: [&str; 12] = [
    "_7kDsZhL", "_B1Zj1fn", "_dA68wkw", "_DrN1be2", "_dAA5MKH", "_jiSRMAR", "_tTw4pTe", "_Z8IZUpR",
    "_8LWvAji", "_g7oi9vY", "_rbETIXm", "_SgqHqx8",
];

/// Everything one scan decided to delete, grouped the way the report
/// prints it. Building a plan touches nothing on disk.
#[derive(Debug, Default)]
pub struct CleanupPlan {
    pub duplicate_dirs: Vec<PathBuf>,
    /// Root `db.sqlite3`, planned only when `ecommerce/db.sqlite3` also
    /// exists.
    pub duplicate_database: Option<PathBuf>,
    /// The database file the plan decided to keep, for the report.
    pub kept_database: Option<PathBuf>,
    pub python_caches: Vec<PathBuf>,
    /// `ecommerce/.hintrc`, planned only when a root `.hintrc` exists.
    pub duplicate_hintrc: Option<PathBuf>,
    pub duplicate_images: Vec<PathBuf>,
    pub empty_dirs: Vec<PathBuf>,
    /// Estimated bytes freed, measured at scan time.
    pub bytes: u64,
}

impl CleanupPlan {
    /// Scans `base` for the known leftovers.
    pub fn build(base: &Path) -> io::Result<Self> {
        let mut plan = Self::default();

        for name in DUPLICATE_ROOT_DIRS {
            let path = base.join(name);
            if path.exists() {
                plan.duplicate_dirs.push(path);
            }
        }

        let root_db = base.join("db.sqlite3");
        let nested_db = base.join("ecommerce").join("db.sqlite3");
        if root_db.exists() && nested_db.exists() {
            plan.duplicate_database = Some(root_db);
            plan.kept_database = Some(nested_db);
        } else if root_db.exists() {
            plan.kept_database = Some(root_db);
        }

        for entry in WalkDir::new(base).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_dir() && entry.file_name() == "__pycache__" {
                plan.python_caches.push(entry.into_path());
            }
        }

        if base.join(".hintrc").exists() {
            let nested_hintrc = base.join("ecommerce").join(".hintrc");
            if nested_hintrc.exists() {
                plan.duplicate_hintrc = Some(nested_hintrc);
            }
        }

        let images = base.join("ecommerce").join("media").join("product_images");
        if images.is_dir() {
            for entry in fs::read_dir(&images)? {
                let entry = entry?;
                let name = entry.file_name();
                let Some(name) = name.to_str() else { continue };
                if name.ends_with(".jpg")
                    && DUPLICATE_IMAGE_SUFFIXES.iter().any(|s| name.contains(s))
                {
                    plan.duplicate_images.push(entry.path());
                }
            }
            plan.duplicate_images.sort();
        }

        let docs = base.join("docs");
        if docs.is_dir() && fs::read_dir(&docs)?.next().is_none() {
            plan.empty_dirs.push(docs);
        }

        plan.bytes = plan.targets().map(|p| tree_size(p)).sum();
        Ok(plan)
    }

    /// All paths slated for deletion, in report order.
    pub fn targets(&self) -> impl Iterator<Item = &PathBuf> {
        self.duplicate_dirs
            .iter()
            .chain(self.duplicate_database.iter())
            .chain(self.python_caches.iter())
            .chain(self.duplicate_hintrc.iter())
            .chain(self.duplicate_images.iter())
            .chain(self.empty_dirs.iter())
    }

    pub fn len(&self) -> usize {
        self.targets().count()
    }

    pub fn is_empty(&self) -> bool {
        self.targets().next().is_none()
    }

    /// Deletes every planned path, counting successes and failures
    /// without stopping. Paths that vanished since the scan (nested
    /// caches inside an already-deleted directory, say) are skipped
    /// silently.
    pub fn execute(&self) -> CleanupReport {
        let mut report = CleanupReport {
            bytes: self.bytes,
            ..CleanupReport::default()
        };

        for path in self.targets() {
            if !path.exists() {
                continue;
            }
            let result = if path.is_dir() {
                fs::remove_dir_all(path)
            } else {
                fs::remove_file(path)
            };
            match result {
                Ok(()) => {
                    report.deleted += 1;
                    println!("   deleted: {}", path.display());
                }
                Err(e) => {
                    report.errors += 1;
                    eprintln!("   error deleting {}: {e}", path.display());
                }
            }
        }

        report
    }
}

/// Outcome of one deletion pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: usize,
    pub errors: usize,
    /// Bytes freed, carried over from the scan-time estimate.
    pub bytes: u64,
}

fn tree_size(path: &Path) -> u64 {
    if path.is_file() {
        return path.metadata().map(|m| m.len()).unwrap_or(0);
    }
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, contents: &[u8]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn finds_duplicate_root_dirs_and_database() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        touch(&base.join("shop").join("models.py"), b"models");
        touch(&base.join("templates").join("index.html"), b"<html>");
        touch(&base.join("db.sqlite3"), b"root db");
        touch(&base.join("ecommerce").join("db.sqlite3"), b"nested db");

        let plan = CleanupPlan::build(base).unwrap();
        assert_eq!(plan.duplicate_dirs.len(), 2);
        assert_eq!(plan.duplicate_database, Some(base.join("db.sqlite3")));
        assert_eq!(
            plan.kept_database,
            Some(base.join("ecommerce").join("db.sqlite3"))
        );
    }

    #[test]
    fn sole_database_is_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        touch(&base.join("db.sqlite3"), b"root db");

        let plan = CleanupPlan::build(base).unwrap();
        assert!(plan.duplicate_database.is_none());
        assert_eq!(plan.kept_database, Some(base.join("db.sqlite3")));
    }

    #[test]
    fn finds_nested_python_caches() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        touch(&base.join("shop").join("__pycache__").join("m.pyc"), b"a");
        touch(
            &base
                .join("ecommerce")
                .join("shop")
                .join("__pycache__")
                .join("n.pyc"),
            b"b",
        );

        let plan = CleanupPlan::build(base).unwrap();
        assert_eq!(plan.python_caches.len(), 2);
    }

    #[test]
    fn hintrc_deleted_only_when_root_copy_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        touch(&base.join("ecommerce").join(".hintrc"), b"{}");

        let plan = CleanupPlan::build(base).unwrap();
        assert!(plan.duplicate_hintrc.is_none());

        touch(&base.join(".hintrc"), b"{}");
        let plan = CleanupPlan::build(base).unwrap();
        assert_eq!(
            plan.duplicate_hintrc,
            Some(base.join("ecommerce").join(".hintrc"))
        );
    }

    #[test]
    fn matches_known_image_suffixes() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        let images = base.join("ecommerce").join("media").join("product_images");
        touch(&images.join("lamp_7kDsZhL.jpg"), b"dup");
        touch(&images.join("sofa_B1Zj1fn.jpg"), b"dup");
        touch(&images.join("lamp.jpg"), b"original");
        touch(&images.join("notes_7kDsZhL.txt"), b"not an image");

        let plan = CleanupPlan::build(base).unwrap();
        assert_eq!(plan.duplicate_images.len(), 2);
        assert!(
            plan.duplicate_images
                .iter()
                .all(|p| p.extension().is_some_and(|e| e == "jpg"))
        );
    }

    #[test]
    fn empty_docs_dir_is_planned() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        fs::create_dir(base.join("docs")).unwrap();

        let plan = CleanupPlan::build(base).unwrap();
        assert_eq!(plan.empty_dirs, vec![base.join("docs")]);

        touch(&base.join("docs").join("README.md"), b"kept");
        let plan = CleanupPlan::build(base).unwrap();
        assert!(plan.empty_dirs.is_empty());
    }

    #[test]
    fn estimates_bytes_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        touch(&base.join("media").join("a.bin"), &[0u8; 100]);
        touch(&base.join("media").join("sub").join("b.bin"), &[0u8; 50]);

        let plan = CleanupPlan::build(base).unwrap();
        assert_eq!(plan.bytes, 150);
    }

    #[test]
    fn execute_deletes_everything_planned() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        touch(&base.join("static").join("style.css"), b"body {}");
        touch(&base.join("db.sqlite3"), b"root db");
        touch(&base.join("ecommerce").join("db.sqlite3"), b"nested db");
        touch(&base.join("app").join("__pycache__").join("m.pyc"), b"pyc");
        fs::create_dir(base.join("docs")).unwrap();

        let plan = CleanupPlan::build(base).unwrap();
        let planned = plan.len();
        assert_eq!(planned, 4);

        let report = plan.execute();
        assert_eq!(report.deleted, planned);
        assert_eq!(report.errors, 0);
        assert!(report.bytes > 0);

        assert!(!base.join("static").exists());
        assert!(!base.join("db.sqlite3").exists());
        assert!(base.join("ecommerce").join("db.sqlite3").exists());
        assert!(!base.join("app").join("__pycache__").exists());
        assert!(!base.join("docs").exists());
    }

    #[test]
    fn execute_skips_targets_deleted_since_scan() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        touch(&base.join("db.sqlite3"), b"root db");
        touch(&base.join("ecommerce").join("db.sqlite3"), b"nested db");
        touch(&base.join("app").join("__pycache__").join("m.pyc"), b"pyc");

        let plan = CleanupPlan::build(base).unwrap();
        assert_eq!(plan.len(), 2);

        // Something else got there first; the pass keeps going.
        fs::remove_file(base.join("db.sqlite3")).unwrap();

        let report = plan.execute();
        assert_eq!(report.deleted, 1);
        assert_eq!(report.errors, 0);
        assert!(!base.join("app").join("__pycache__").exists());
    }

    #[test]
    fn empty_tree_plans_nothing() {
        let tmp = tempfile::tempdir().unwrap();

        let plan = CleanupPlan::build(tmp.path()).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
        assert_eq!(plan.bytes, 0);
    }
}
