use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadDocument(PathBuf),
    SaveDocument { path: PathBuf, content: String },
}
