//! Static asset references.
//!
//! Leaves name external files by stable relative paths. The engine only normalizes and resolves
//! those strings; reading the bytes is the external renderer's job.

use std::collections::BTreeSet;

use crate::foundation::error::{CadenceError, CadenceResult};

/// Normalize a static file reference: `/`-separated, relative, no `..`, no empty or `.` segments.
pub fn static_file(path: &str) -> CadenceResult<String> {
    let s = path.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(CadenceError::validation("static file path must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(CadenceError::validation(format!(
            "static file path must be relative (got \"{path}\")"
        )));
    }
    let mut parts = Vec::new();
    for part in s.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                return Err(CadenceError::validation(format!(
                    "static file path must not contain '..' (got \"{path}\")"
                )));
            }
            p => parts.push(p),
        }
    }
    if parts.is_empty() {
        return Err(CadenceError::validation(format!(
            "static file path has no file component (got \"{path}\")"
        )));
    }
    Ok(parts.join("/"))
}

/// External resolver from a static file reference to a renderer-facing location.
pub trait AssetResolver: Send + Sync {
    /// Resolved location, or `None` when the asset is unknown.
    fn resolve(&self, reference: &str) -> Option<String>;
}

/// Resolve `reference` or fail with [`CadenceError::MissingAssetReference`].
pub fn resolve_asset(resolver: &dyn AssetResolver, reference: &str) -> CadenceResult<String> {
    resolver
        .resolve(reference)
        .ok_or_else(|| CadenceError::missing_asset(reference))
}

/// Accepts every well-formed path and returns it normalized.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughAssets;

impl AssetResolver for PassthroughAssets {
    fn resolve(&self, reference: &str) -> Option<String> {
        static_file(reference).ok()
    }
}

/// A known, fixed set of files served under a base URL or directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticAssets {
    base: String,
    files: BTreeSet<String>,
}

impl StaticAssets {
    /// Empty set under `base` (may be empty, a directory or a URL prefix).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_owned(),
            files: BTreeSet::new(),
        }
    }

    /// Register one file.
    pub fn insert(&mut self, path: &str) -> CadenceResult<()> {
        self.files.insert(static_file(path)?);
        Ok(())
    }

    /// Builder form of [`StaticAssets::insert`].
    pub fn with_file(mut self, path: &str) -> CadenceResult<Self> {
        self.insert(path)?;
        Ok(self)
    }

    /// Build from a base and a file list.
    pub fn from_files<'a>(
        base: impl Into<String>,
        files: impl IntoIterator<Item = &'a str>,
    ) -> CadenceResult<Self> {
        let mut out = Self::new(base);
        for f in files {
            out.insert(f)?;
        }
        Ok(out)
    }

    /// Registered files, normalized and sorted.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}

impl AssetResolver for StaticAssets {
    fn resolve(&self, reference: &str) -> Option<String> {
        let path = static_file(reference).ok()?;
        if !self.files.contains(&path) {
            return None;
        }
        if self.base.is_empty() {
            Some(path)
        } else {
            Some(format!("{}/{path}", self.base))
        }
    }
}

/// JSON form of a [`StaticAssets`] set.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Base URL or directory.
    pub base: String,
    /// Known relative file paths.
    pub files: Vec<String>,
}

impl AssetsConfig {
    /// Validate paths and build the resolver.
    pub fn to_resolver(&self) -> CadenceResult<StaticAssets> {
        StaticAssets::from_files(self.base.clone(), self.files.iter().map(String::as_str))
    }
}

#[cfg(test)]
#[path = "../tests/unit/assets/assets.rs"]
mod tests;
