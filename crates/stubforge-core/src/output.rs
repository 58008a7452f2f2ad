//! Write-suppression, persistence and the render-then-write step shared by generators.

// Internal imports (std, crate)
use std::fs;
use std::path::{Path, PathBuf};

use crate::templates::Renderer;
use crate::Result;

// External imports (alphabetized)
use regex::Regex;
use serde::Serialize;

/// File name of the ignore file looked up by default
pub const IGNORE_FILE_NAME: &str = ".stubforge-ignore";

/// Decides whether an artifact path must be left untouched.
pub trait IgnorePolicy {
    /// `true` when nothing may be written to `path`
    fn is_ignored(&self, path: &Path) -> bool;
}

/// Persists generated text.
pub trait Writer {
    /// Write `content` to `path`, creating parent directories as needed
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Writes artifacts to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl Writer for FsWriter {
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

/// Gitignore-like rules protecting hand-edited artifacts.
///
/// Patterns are matched against paths relative to `root`:
/// `*` and `?` stay within one segment, `**` spans segments, a trailing `/`
/// matches everything below a directory and a pattern without `/` matches a
/// file name at any depth.
///
/// Directories registered with [`IgnoreRules::protect_existing`] also keep every
/// file that already exists below them.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    root: PathBuf,
    patterns: Vec<Regex>,
    protected_dirs: Vec<PathBuf>,
}

impl IgnoreRules {
    /// Rules with no patterns, relative to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Also treat every file that already exists below `dir` as ignored
    pub fn protect_existing(mut self, dir: impl Into<PathBuf>) -> Self {
        self.protected_dirs.push(dir.into());
        self
    }

    /// Add a single pattern
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns.push(pattern_to_regex(pattern)?);
        Ok(self)
    }

    /// Parse ignore file content: one pattern per line, `#` starts a comment line
    pub fn parse(root: impl Into<PathBuf>, content: &str) -> Result<Self> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .try_fold(Self::new(root), |rules, line| rules.with_pattern(line))
    }

    /// Load an ignore file; patterns are relative to the file's directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let rules = Self::parse(root, &content)?;
        log::debug!(
            "Loaded {} ignore pattern(s) from {}",
            rules.patterns.len(),
            path.display()
        );
        Ok(rules)
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl IgnorePolicy for IgnoreRules {
    fn is_ignored(&self, path: &Path) -> bool {
        if path.exists() && self.protected_dirs.iter().any(|dir| path.starts_with(dir)) {
            return true;
        }
        let relative = self.relative(path);
        self.patterns.iter().any(|re| re.is_match(&relative))
    }
}

fn pattern_to_regex(pattern: &str) -> Result<Regex> {
    let pattern = pattern.trim();
    let (body, directory) = match pattern.strip_suffix('/') {
        Some(body) => (body, true),
        None => (pattern, false),
    };
    let anchored = body.contains('/');
    let body = body.strip_prefix('/').unwrap_or(body);

    let mut re = String::from("^");
    if !anchored {
        re.push_str("(?:.*/)?");
    }
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    re.push_str("(?:.*/)?");
                } else {
                    re.push_str(".*");
                }
            }
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    if directory {
        re.push_str("/.*");
    }
    re.push('$');

    Ok(Regex::new(&re)?)
}

/// Render-then-write step guarded by the ignore policy.
#[derive(Clone, Copy)]
pub struct Emitter<'a> {
    renderer: &'a dyn Renderer,
    ignore: &'a dyn IgnorePolicy,
    writer: &'a dyn Writer,
    extension: &'a str,
}

impl<'a> Emitter<'a> {
    /// Combine the collaborators; `extension` is appended to every artifact file name
    pub fn new(
        renderer: &'a dyn Renderer,
        ignore: &'a dyn IgnorePolicy,
        writer: &'a dyn Writer,
        extension: &'a str,
    ) -> Self {
        Self {
            renderer,
            ignore,
            writer,
            extension,
        }
    }

    /// `<dir>/<stem>.<extension>`
    pub fn artifact_path(&self, dir: &Path, stem: &str) -> PathBuf {
        dir.join(format!("{}.{}", stem, self.extension))
    }

    /// Ask the ignore policy about `path`
    pub fn is_ignored(&self, path: &Path) -> bool {
        let ignored = self.ignore.is_ignored(path);
        if ignored {
            log::debug!("Skipping ignored artifact {}", path.display());
        }
        ignored
    }

    /// Render `key` with `payload` and write it to `path` without consulting the ignore policy
    pub fn write<T: Serialize>(&self, key: &str, payload: &T, path: &Path) -> Result<()> {
        let payload = serde_json::to_value(payload)?;
        let content = self.renderer.render(key, &payload)?;
        self.writer.write(path, &content)
    }

    /// Render and write unless `path` is ignored; returns whether the artifact was written
    pub fn emit<T: Serialize>(&self, key: &str, payload: &T, path: &Path) -> Result<bool> {
        if self.is_ignored(path) {
            return Ok(false);
        }
        self.write(key, payload, path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryWriter, RecordingRenderer};
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_fs_writer_creates_directories() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("a/b/out.rs");
        FsWriter.write(&path, "content")?;
        assert_eq!(fs::read_to_string(&path)?, "content");
        Ok(())
    }

    #[test]
    fn test_ignore_patterns() -> Result<()> {
        let rules = IgnoreRules::parse(
            "out",
            "# keep hand-written handlers\nHandler/PetsHandler.rs\n\nHydrator/\n*.bak\nconfig/**/*.php\n",
        )?;

        assert!(rules.is_ignored(Path::new("out/Handler/PetsHandler.rs")));
        assert!(!rules.is_ignored(Path::new("out/Handler/PetsIdHandler.rs")));
        assert!(rules.is_ignored(Path::new("out/Hydrator/PetHydrator.rs")));
        assert!(rules.is_ignored(Path::new("out/deep/nested/file.bak")));
        assert!(rules.is_ignored(Path::new("out/config/swagger.routes.php")));
        assert!(rules.is_ignored(Path::new("out/config/app/swagger.routes.php")));
        assert!(!rules.is_ignored(Path::new("out/config/swagger.routes.rs")));
        Ok(())
    }

    #[test]
    fn test_single_segment_wildcards() -> Result<()> {
        let rules = IgnoreRules::new("").with_pattern("Handler/Pets?Handler.*")?;
        assert!(rules.is_ignored(Path::new("Handler/PetsXHandler.rs")));
        assert!(!rules.is_ignored(Path::new("Handler/PetsHandler.rs")));
        assert!(!rules.is_ignored(Path::new("Handler/sub/PetsXHandler.rs")));
        Ok(())
    }

    #[test]
    fn test_protect_existing() -> Result<()> {
        let dir = tempdir()?;
        let handlers = dir.path().join("Handler");
        fs::create_dir_all(&handlers)?;
        let existing = handlers.join("exists.rs");
        fs::write(&existing, "")?;
        let outside = dir.path().join("swagger.routes.rs");
        fs::write(&outside, "")?;

        let rules = IgnoreRules::new(dir.path()).protect_existing(&handlers);
        assert!(rules.is_ignored(&existing));
        assert!(!rules.is_ignored(&handlers.join("missing.rs")));
        assert!(!rules.is_ignored(&outside));

        let rules = IgnoreRules::new(dir.path());
        assert!(!rules.is_ignored(&existing));
        Ok(())
    }

    #[test]
    fn test_from_file_uses_file_directory() -> Result<()> {
        let dir = tempdir()?;
        let ignore_file = dir.path().join(IGNORE_FILE_NAME);
        fs::write(&ignore_file, "Handler/*\n")?;

        let rules = IgnoreRules::from_file(&ignore_file)?;
        assert!(rules.is_ignored(&dir.path().join("Handler/PetsHandler.rs")));
        assert!(!rules.is_ignored(&dir.path().join("Hydrator/PetHydrator.rs")));
        Ok(())
    }

    #[test]
    fn test_emit_skips_render_when_ignored() -> Result<()> {
        let renderer = RecordingRenderer::default();
        let writer = MemoryWriter::default();
        let rules = IgnoreRules::new("out").with_pattern("skip.rs")?;
        let emitter = Emitter::new(&renderer, &rules, &writer, "rs");

        let skipped = emitter.artifact_path(Path::new("out"), "skip");
        assert!(!emitter.emit("handler", &json!({}), &skipped)?);
        assert_eq!(renderer.calls(), 0);
        assert!(writer.is_empty());

        let written = emitter.artifact_path(Path::new("out"), "keep");
        assert!(emitter.emit("handler", &json!({"a": 1}), &written)?);
        assert_eq!(renderer.calls(), 1);
        assert!(writer.get(&written).is_some());
        Ok(())
    }
}
