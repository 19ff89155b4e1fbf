use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use glob::{Paths, Pattern};
use textnorm::Error;

/// Extensions a mask may select. Explicitly named files skip this check.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "php", "js", "jsx", "vue", "css", "scss", "less", "html", "htm", "shtml", "phtml", "txt", "md",
    "conf", "ini", "htaccess", "htpasswd", "gitignore", "sql", "pl", "cgi", "asp", "py", "sh",
    "bat", "ps1", "xml", "csv", "json", "svg", "pem", "ppk", "yml",
];

/// Whether `source` should be expanded as a mask instead of read as a file.
pub fn is_mask(source: &str) -> bool {
    source.contains('*')
}

/// Extension of the file name: everything after its last dot, so dot-files
/// such as `.htaccess` have one too.
pub fn file_extension(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()?.rsplit_once('.').map(|(_, ext)| ext)
}

/// Case-sensitive allow-list check.
pub fn has_allowed_extension(path: &Path) -> bool {
    file_extension(path).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext))
}

/// Iterator over the files a mask selects.
///
/// Directories matched by the mask are skipped, or, with `recurse`, searched
/// with the mask's file-name part. Pending directories live on a queue, so
/// depth is not limited by the stack. Entries that cannot be read are skipped.
pub struct MaskWalker {
    base: String,
    recurse: bool,
    pending: VecDeque<String>,
    current: Option<Paths>,
    visited: HashSet<PathBuf>,
}

impl MaskWalker {
    pub fn new(mask: &str, recurse: bool) -> Result<Self, Error> {
        Pattern::new(mask).map_err(|e| Error::invalid_mask(mask, e.to_string()))?;

        let base = Path::new(mask)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(mask)
            .to_string();

        let mut visited = HashSet::new();
        if recurse {
            let root = match Path::new(mask).parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            if let Ok(root) = root.canonicalize() {
                visited.insert(root);
            }
        }

        Ok(Self {
            base,
            recurse,
            pending: VecDeque::from([mask.to_string()]),
            current: None,
            visited,
        })
    }

    fn descend(&mut self, dir: &Path) {
        // symlinked directories may point back up the tree
        let key = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        if !self.visited.insert(key) {
            return;
        }
        let escaped = Pattern::escape(&dir.to_string_lossy());
        let pattern = Path::new(&escaped).join(&self.base);
        self.pending.push_back(pattern.to_string_lossy().into_owned());
    }
}

impl Iterator for MaskWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(paths) = self.current.as_mut() {
                match paths.next() {
                    Some(Ok(path)) => {
                        if path.is_dir() {
                            if self.recurse {
                                self.descend(&path);
                            }
                            continue;
                        }
                        if has_allowed_extension(&path) {
                            return Some(path);
                        }
                        continue;
                    }
                    Some(Err(_e)) => continue,
                    None => self.current = None,
                }
            }

            let pattern = self.pending.pop_front()?;
            self.current = glob::glob(&pattern).ok();
        }
    }
}

/// Expands a mask into the files to normalize, in directory listing order.
pub fn expand(mask: &str, recurse: bool) -> Result<Vec<PathBuf>, Error> {
    Ok(MaskWalker::new(mask, recurse)?.collect())
}
