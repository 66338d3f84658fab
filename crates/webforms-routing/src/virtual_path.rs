//! Application-relative (`~/`) virtual path resolution.

/// Helpers for legacy virtual paths.
///
/// `~` stands for the application root, so with an application path of
/// `/shop` the virtual path `~/cart` resolves to `/shop/cart`.
pub struct VirtualPath;

impl VirtualPath {
    /// Normalize an application path to `/` or `/segment...` without a
    /// trailing slash.
    pub fn normalize_app_path(app_path: &str) -> String {
        let trimmed = app_path.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", trimmed)
        }
    }

    /// Resolve a virtual path to an absolute path.
    ///
    /// - `~` and `~/x` resolve against the application root
    /// - absolute paths are returned unchanged
    /// - other relative paths are joined onto the application root
    pub fn resolve(app_path: &str, path: &str) -> String {
        if path.starts_with('/') {
            return path.to_string();
        }

        let relative = path
            .strip_prefix("~/")
            .or_else(|| path.strip_prefix('~'))
            .unwrap_or(path);
        Self::join(app_path, relative)
    }

    /// Whether the path is application-relative (`~` or `~/...`).
    pub fn is_app_relative(path: &str) -> bool {
        path == "~" || path.starts_with("~/")
    }

    /// Join a relative URL onto the application root.
    pub fn join(app_path: &str, relative: &str) -> String {
        let root = Self::normalize_app_path(app_path);
        let relative = relative.trim_start_matches('/');
        if root == "/" {
            format!("/{}", relative)
        } else if relative.is_empty() {
            format!("{}/", root)
        } else {
            format!("{}/{}", root, relative)
        }
    }
}
