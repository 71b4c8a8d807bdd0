use std::path::{Path, PathBuf};

/// 書きかけの出力ファイルを削除するガード
///
/// `commit` されずに破棄されると（エラー・中断時）ファイルを消す。
#[derive(Debug)]
pub struct OutputGuard {
    path: PathBuf,
    committed: bool,
}

impl OutputGuard {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if self.committed || !self.path.exists() {
            return;
        }
        log::debug!("Deleting {}", self.path.display());
        if let Err(e) = std::fs::remove_file(&self.path) {
            log::warn!("Failed to delete {}: {}", self.path.display(), e);
        }
    }
}
