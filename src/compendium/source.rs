use crate::error::{CompendiumError, Result};
use std::path::{Path, PathBuf};

/// 入力コンペンディウムの形式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompendiumSource {
    /// 単体のXML
    Xml(PathBuf),
    /// `compendium.xml` とアセットを含むZIP（.zip / .compendium）
    Archive(PathBuf),
}

impl CompendiumSource {
    /// 拡張子を確認してから存在を確認する
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let source = match extension.as_str() {
            "xml" => CompendiumSource::Xml(path.to_path_buf()),
            "zip" | "compendium" => CompendiumSource::Archive(path.to_path_buf()),
            _ => {
                let shown = if extension.is_empty() {
                    String::new()
                } else {
                    format!(".{}", extension)
                };
                return Err(CompendiumError::InvalidExtension(shown));
            }
        };

        if !path.is_file() {
            return Err(CompendiumError::CompendiumNotFound(path.display().to_string()));
        }

        Ok(source)
    }

    pub fn path(&self) -> &Path {
        match self {
            CompendiumSource::Xml(path) | CompendiumSource::Archive(path) => path,
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, CompendiumSource::Archive(_))
    }
}
