use crate::error::{CompendiumError, Result};
use compendium_images_common::ImageRef;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// 複数フォルダを順に走査して画像参照を集める
pub fn index(folders: &[PathBuf]) -> Result<Vec<ImageRef>> {
    let mut images = Vec::new();
    for folder in folders {
        images.extend(scan_folder(folder)?);
    }
    Ok(images)
}

/// フォルダを再帰的に走査する
///
/// 同じディレクトリ内はファイル名順。読めないサブディレクトリは無視する。
pub fn scan_folder(folder: &Path) -> Result<Vec<ImageRef>> {
    if !folder.is_dir() {
        return Err(CompendiumError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(image) = image_ref(entry.path(), folder) {
            log::trace!("Image found: {}", entry.path().display());
            images.push(image);
        }
    }

    Ok(images)
}

fn image_ref(path: &Path, root: &Path) -> Option<ImageRef> {
    let ext = path.extension()?.to_string_lossy();
    if !is_image_extension(&ext) {
        return None;
    }
    let base_name = path.file_stem()?.to_string_lossy().to_string();
    let dir = path.parent().unwrap_or(root);
    // 名前は照合・表示用。ファイルは走査で得たパスから開く
    Some(ImageRef::new(dir, base_name, format!(".{}", ext), root).with_source(path))
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}
