use crate::models::BlockNode;
use std::path::PathBuf;

pub enum AppMessage {
    DocumentLoaded {
        path: PathBuf,
        blocks: Vec<BlockNode>,
    },
    DocumentLoadError {
        path: PathBuf,
        error: String,
    },
    DocumentSaved {
        path: PathBuf,
        success: bool,
    },
    FsOpError {
        op: &'static str,
        path: PathBuf,
        error: String,
    },
}
