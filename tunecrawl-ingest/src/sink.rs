//! Hand-off of comment texts to the text-analysis collaborator
//!
//! The pipeline only guarantees the snippet sequence; tokenisation, frequency
//! analysis and rendering belong to whatever sits behind [`SnippetSink`].

use crate::error::IngestResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Receiver of `(collection id, text snippets)`
#[async_trait]
pub trait SnippetSink: Send + Sync {
    async fn publish(&self, collection_id: &str, snippets: &[String]) -> IngestResult<()>;
}

/// Writes snippets one per line to `<dir>/wordCloud-<collection id>.txt`
///
/// Newlines inside a snippet are flattened to spaces so that line count equals
/// snippet count.
pub struct SnippetFileSink {
    dir: PathBuf,
}

impl SnippetFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic artifact path for a collection
    pub fn artifact_path(&self, collection_id: &str) -> PathBuf {
        let safe_id: String = collection_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("wordCloud-{safe_id}.txt"))
    }
}

#[async_trait]
impl SnippetSink for SnippetFileSink {
    async fn publish(&self, collection_id: &str, snippets: &[String]) -> IngestResult<()> {
        let path = self.artifact_path(collection_id);

        let mut body = String::new();
        for snippet in snippets {
            body.push_str(&snippet.replace(['\r', '\n'], " "));
            body.push('\n');
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, body).await?;

        info!(
            collection_id = %collection_id,
            path = %path.display(),
            snippets = snippets.len(),
            "Snippets handed off"
        );
        Ok(())
    }
}
