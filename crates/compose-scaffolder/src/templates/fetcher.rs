//! Template bundle fetching from a remote URL or a local directory
//!
//! Both sources end up as the same in-memory bundle:
//! - Remote: downloads the pre-built `templates.zip` and extracts it
//! - Local: walks the template directory and reads every file
//!
//! Rendering only ever reads from the loaded bundle.

use super::manifest::{BundleManifest, MANIFEST_FILE};
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// File name of the packed bundle, both remotely and in a local template directory
pub const BUNDLE_ZIP: &str = "templates.zip";

/// Template source - either remote URL or local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a remote template source from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.template_url_env())
            .unwrap_or_else(|_| config.default_template_url().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid template URL: {}", url_str))?;
        Ok(Self::Remote(url))
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Every file of a template bundle, keyed by `/`-separated path relative to the bundle root
#[derive(Debug, Clone)]
pub struct TemplateBundle {
    manifest: BundleManifest,
    files: BTreeMap<String, Vec<u8>>,
}

impl TemplateBundle {
    /// Build a bundle from already loaded files; `template.yaml` must be among them
    pub fn from_files(files: BTreeMap<String, Vec<u8>>) -> Result<Self> {
        let raw = files
            .get(MANIFEST_FILE)
            .ok_or_else(|| anyhow::anyhow!("Template bundle is missing {}", MANIFEST_FILE))?;
        let manifest: BundleManifest = serde_yaml::from_str(&String::from_utf8_lossy(raw))
            .context("Failed to parse template bundle manifest")?;
        Ok(Self { manifest, files })
    }

    pub fn manifest(&self) -> &BundleManifest {
        &self.manifest
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Files making up a resource: the file itself, or every file below it when the
    /// resource names a directory. Paths are relative to the resource (empty for a file).
    pub fn resource(&self, template_id: &str) -> Vec<(&str, &[u8])> {
        let id = template_id.trim_end_matches('/');
        if let Some(content) = self.files.get(id) {
            return vec![("", content.as_slice())];
        }

        let prefix = format!("{}/", id);
        self.files
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .map(|(path, content)| (&path[prefix.len()..], content.as_slice()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Template fetcher - loads the bundle once and keeps it
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
    bundle: Option<TemplateBundle>,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            bundle: None,
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let source = TemplateSource::from_config(config)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateSource::local(path), user_agent)
    }

    /// Build a URL by appending a path segment, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    /// Load (or return the cached) template bundle
    pub async fn fetch_bundle(&mut self) -> Result<&TemplateBundle> {
        if self.bundle.is_none() {
            let bundle = match &self.source {
                TemplateSource::Remote(base_url) => {
                    let url = Self::build_url(base_url, BUNDLE_ZIP)?;
                    tracing::info!(%url, "downloading template bundle");
                    let response = self
                        .client
                        .get(url.clone())
                        .send()
                        .await
                        .with_context(|| format!("Failed to fetch template bundle from {}", url))?;

                    if !response.status().is_success() {
                        anyhow::bail!(
                            "Failed to fetch template bundle from {}: HTTP {}",
                            url,
                            response.status()
                        );
                    }

                    let bytes = response.bytes().await?;
                    Self::extract_zip(&bytes)?
                }
                TemplateSource::Local(path) => {
                    tracing::info!(path = %path.display(), "reading local template bundle");
                    Self::read_local(path)?
                }
            };
            tracing::debug!(files = bundle.len(), "template bundle loaded");
            self.bundle = Some(bundle);
        }

        self.bundle
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Template bundle not loaded"))
    }

    /// Read every file below a local template directory (except a packed bundle zip)
    fn read_local(template_dir: &Path) -> Result<TemplateBundle> {
        if !template_dir.is_dir() {
            anyhow::bail!("Template directory not found: {}", template_dir.display());
        }
        let mut files = BTreeMap::new();
        for (relative, full_path) in Self::local_files(template_dir)? {
            let content = std::fs::read(&full_path)
                .with_context(|| format!("Failed to read {}", full_path.display()))?;
            files.insert(relative, content);
        }
        TemplateBundle::from_files(files)
    }

    /// Bundle-relative paths of every file in a local template directory, sorted
    fn local_files(template_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
        let mut found = Vec::new();
        for entry in WalkDir::new(template_dir).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to walk {}", template_dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(template_dir)
                .with_context(|| format!("Unexpected path {}", entry.path().display()))?;
            let key = Self::bundle_key(relative);
            if key == BUNDLE_ZIP {
                continue;
            }
            found.push((key, entry.path().to_path_buf()));
        }
        Ok(found)
    }

    /// `/`-separated bundle key for a relative path
    fn bundle_key(relative: &Path) -> String {
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Pack a local template directory into a bundle zip (manifest first)
    pub fn build_local_zip(template_dir: &Path) -> Result<Vec<u8>> {
        let manifest_path = template_dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            anyhow::bail!("{} not found in {}", MANIFEST_FILE, template_dir.display());
        }

        let files = Self::local_files(template_dir)?;

        let mut zip_buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

            let manifest = std::fs::read(&manifest_path)
                .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
            zip.start_file(MANIFEST_FILE, options)?;
            zip.write_all(&manifest)?;

            for (relative, full_path) in &files {
                if relative == MANIFEST_FILE {
                    continue;
                }
                let content = std::fs::read(full_path)
                    .with_context(|| format!("Failed to read {}", full_path.display()))?;
                zip.start_file(relative.as_str(), options)?;
                zip.write_all(&content)?;
            }

            zip.finish()?;
        }

        Ok(zip_buffer)
    }

    /// Extract a bundle zip into memory
    fn extract_zip(zip_bytes: &[u8]) -> Result<TemplateBundle> {
        let mut archive = ZipArchive::new(Cursor::new(zip_bytes))
            .context("Failed to read template bundle zip")?;

        let mut files = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let Some(enclosed) = file.enclosed_name() else {
                anyhow::bail!(
                    "Template bundle entry escapes the bundle root: {}",
                    file.name()
                );
            };
            let path = Self::bundle_key(&enclosed);
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(path, contents);
        }

        TemplateBundle::from_files(files)
    }

    /// Get the template source
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }
}
