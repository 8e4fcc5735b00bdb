//! Record source persistence abstract Trait

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};

/// Suffix of record source files.
pub const SOURCE_EXTENSION: &str = ".txt";

/// Record source warehouse Trait
///
/// One source per subdomain. Implementations:
/// - `FsSourceRepository`: `{records_dir}/{subdomain}.txt`
/// - tests: `InMemorySourceRepository`
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// List subdomains in processing order.
    ///
    /// An error here is fatal for the run.
    async fn list_subdomains(&self) -> CoreResult<Vec<String>>;

    /// Read the raw text of one source
    ///
    /// # Arguments
    /// * `subdomain` - value returned by `list_subdomains`
    async fn read(&self, subdomain: &str) -> CoreResult<String>;
}

/// Reads `*.txt` files from a single directory (non-recursive).
#[derive(Debug, Clone)]
pub struct FsSourceRepository {
    root: PathBuf,
}

impl FsSourceRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, subdomain: &str) -> PathBuf {
        self.root.join(format!("{subdomain}{SOURCE_EXTENSION}"))
    }

    fn enumeration_error(&self, source: std::io::Error) -> CoreError {
        CoreError::SourceEnumeration {
            path: self.root.clone(),
            source,
        }
    }
}

#[async_trait]
impl SourceRepository for FsSourceRepository {
    async fn list_subdomains(&self) -> CoreResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| self.enumeration_error(e))?;

        let mut subdomains = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| self.enumeration_error(e))?
        {
            let path = entry.path();
            let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                log::warn!("Skipping non UTF-8 file name: {}", path.display());
                continue;
            };
            let Some(subdomain) = file_name.strip_suffix(SOURCE_EXTENSION) else {
                continue;
            };

            // 跟随符号链接，只接受普通文件
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => subdomains.push(subdomain.to_string()),
                Ok(_) => log::debug!("Skipping non-file entry: {}", path.display()),
                Err(e) => log::warn!("Skipping unreadable entry {}: {e}", path.display()),
            }
        }

        subdomains.sort();
        log::debug!(
            "Found {} record source(s) in {}",
            subdomains.len(),
            self.root.display()
        );
        Ok(subdomains)
    }

    async fn read(&self, subdomain: &str) -> CoreResult<String> {
        let err = match tokio::fs::read_to_string(self.path_for(subdomain)).await {
            Ok(text) => return Ok(text),
            Err(e) => e,
        };

        // 目录在运行中消失：后续文件同样无法读取
        let root_gone = err.kind() == std::io::ErrorKind::NotFound
            && !tokio::fs::try_exists(&self.root).await.unwrap_or(false);
        if root_gone {
            return Err(self.enumeration_error(err));
        }
        Err(CoreError::SourceRead {
            subdomain: subdomain.to_string(),
            detail: err.to_string(),
        })
    }
}
