//! Unified handling of template directory resolution

use std::io;
use std::path::{Path, PathBuf};

use super::TemplateKind;

/// Environment variable overriding the template root
pub const TEMPLATE_DIR_ENV: &str = "STUBFORGE_TEMPLATE_DIR";

/// Represents a template directory with resolved paths and validation
#[derive(Debug, Clone)]
pub struct TemplateDir {
    /// Root directory containing one sub-directory per template kind
    root_dir: PathBuf,
    /// Path to the specific template directory (root_dir/kind)
    template_path: PathBuf,
    /// The template kind
    kind: TemplateKind,
}

impl TemplateDir {
    /// Create a new TemplateDir with explicit paths
    pub fn new(root_dir: PathBuf, template_path: PathBuf, kind: TemplateKind) -> Self {
        Self {
            root_dir,
            template_path,
            kind,
        }
    }

    /// Resolve a user supplied directory, which may be either the template root
    /// or the kind directory itself
    pub fn from_user_dir(dir: &Path, kind: TemplateKind) -> io::Result<Self> {
        let points_at_kind = dir
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name == kind.as_str())
            .unwrap_or(false);

        if points_at_kind && dir.is_dir() {
            let root = dir.parent().map(Path::to_path_buf).unwrap_or_default();
            return Ok(Self::new(root, dir.to_path_buf(), kind));
        }

        Self::discover(kind, Some(dir))
    }

    /// Returns a displayable version of the template path
    pub fn display(&self) -> std::path::Display<'_> {
        self.template_path.display()
    }

    /// Discover the template directory based on the template kind and optional override
    pub fn discover(kind: TemplateKind, custom_dir: Option<&Path>) -> io::Result<Self> {
        let root_dir = if let Some(dir) = custom_dir {
            if !dir.exists() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Template directory not found: {}", dir.display()),
                ));
            }
            dir.to_path_buf()
        } else {
            Self::find_template_base_dir().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "Could not find template directory in any standard location",
                )
            })?
        };

        let template_path = root_dir.join(kind.as_str());

        if !template_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Template directory not found: {}", template_path.display()),
            ));
        }

        Ok(Self::new(root_dir, template_path, kind))
    }

    /// Find the base template directory by checking standard locations
    fn find_template_base_dir() -> Option<PathBuf> {
        // 1. Environment variable
        if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV) {
            let path = PathBuf::from(dir);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Current directory
        let templates_dir = PathBuf::from("templates");
        if templates_dir.exists() {
            return Some(templates_dir);
        }

        // 3. Parent directory
        let templates_dir = PathBuf::from("..").join("templates");
        if templates_dir.exists() {
            return Some(templates_dir);
        }

        // 4. Workspace root (for development)
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let manifest_path = PathBuf::from(manifest_dir);
            if let Some(workspace_root) = manifest_path.parent().and_then(Path::parent) {
                let templates_dir = workspace_root.join("templates");
                if templates_dir.exists() {
                    return Some(templates_dir);
                }
            }
        }

        // 5. User's home directory
        if let Some(home_dir) = dirs::home_dir() {
            let templates_dir = home_dir.join(".stubforge").join("templates");
            if templates_dir.exists() {
                return Some(templates_dir);
            }
        }

        None
    }

    /// Get the root directory containing the templates
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the template kind
    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Get the path to the specific template directory
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Check if the template directory exists
    pub fn exists(&self) -> bool {
        self.template_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_template_dir_validation() {
        let temp_dir = tempdir().unwrap();
        let template_dir = temp_dir.path().join("templates/rust");
        fs::create_dir_all(&template_dir).unwrap();

        let template = TemplateDir::discover(
            TemplateKind::Rust,
            Some(temp_dir.path().join("templates").as_path()),
        );
        assert!(template.is_ok());
        assert_eq!(template.unwrap().template_path(), template_dir.as_path());

        let result = TemplateDir::discover(TemplateKind::Rust, Some(Path::new("/nonexistent")));
        assert!(result.is_err());

        let result = TemplateDir::discover(
            TemplateKind::Php,
            Some(temp_dir.path().join("templates").as_path()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_user_dir_accepts_kind_dir() {
        let temp_dir = tempdir().unwrap();
        let template_dir = temp_dir.path().join("templates/php");
        fs::create_dir_all(&template_dir).unwrap();

        let direct = TemplateDir::from_user_dir(&template_dir, TemplateKind::Php).unwrap();
        assert_eq!(direct.template_path(), template_dir.as_path());
        assert_eq!(direct.root_dir(), temp_dir.path().join("templates").as_path());

        let parent =
            TemplateDir::from_user_dir(&temp_dir.path().join("templates"), TemplateKind::Php)
                .unwrap();
        assert_eq!(parent.template_path(), template_dir.as_path());
    }
}
