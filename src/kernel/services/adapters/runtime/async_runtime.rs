use super::message::AppMessage;
use crate::models::{parse_document, BlockNode};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn load_document(&self, path: PathBuf) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    let _ = tx.send(AppMessage::DocumentLoadError {
                        path,
                        error: e.to_string(),
                    });
                    return;
                }
            };

            let result = tokio::task::spawn_blocking(move || parse_document_text(&content)).await;
            let message = match result {
                Ok(Ok(blocks)) => AppMessage::DocumentLoaded { path, blocks },
                Ok(Err(error)) => AppMessage::DocumentLoadError { path, error },
                Err(e) => AppMessage::DocumentLoadError {
                    path,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }

    pub fn save_document(&self, path: PathBuf, content: String) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let path_for_write = path.clone();
            let result =
                tokio::task::spawn_blocking(move || write_document_to_path(&path_for_write, &content))
                    .await;

            let error = match result {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(e) => Some(e.to_string()),
            };
            let success = error.is_none();
            if let Some(error) = error {
                let _ = tx.send(AppMessage::FsOpError {
                    op: "save_document",
                    path: path.clone(),
                    error,
                });
            }
            let _ = tx.send(AppMessage::DocumentSaved { path, success });
        });
    }
}

fn parse_document_text(content: &str) -> Result<Vec<BlockNode>, String> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_document(content).map_err(|e| e.to_string())
}

/// Writes through a sibling temp file and renames it over `path`.
fn write_document_to_path(path: &Path, content: &str) -> io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document.json".to_string());
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let file = std::fs::File::create(&tmp)?;
        let mut writer = io::BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
    }
    std::fs::rename(&tmp, path).inspect_err(|_| {
        let _ = std::fs::remove_file(&tmp);
    })
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
