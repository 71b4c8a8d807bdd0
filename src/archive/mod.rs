//! 出力アーカイブの書き込み
//!
//! - 元アーカイブのアセットをそのままコピー
//! - 一致した画像を `monsters/` / `items/` に追加（名前の重複は接尾辞で回避）
//! - 最後に `compendium.xml` を書き出す

mod guard;

pub use guard::OutputGuard;

use crate::compendium::COMPENDIUM_XML;
use crate::error::{CompendiumError, Result};
use compendium_images_common::{EntryKind, ImageRef};
use rand::Rng;
use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// 接尾辞を付けて再試行する最大回数
pub const MAX_SUFFIX_ATTEMPTS: usize = 32;

const SUFFIX_LEN: usize = 6;

/// 重複回避用の接尾辞を生成する
pub trait SuffixSource {
    fn next_suffix(&mut self) -> String;
}

/// 英小文字6文字のランダム接尾辞
#[derive(Debug, Default)]
pub struct RandomSuffix;

impl SuffixSource for RandomSuffix {
    fn next_suffix(&mut self) -> String {
        let mut rng = rand::thread_rng();
        (0..SUFFIX_LEN).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
    }
}

/// アーカイブから `compendium.xml` を読み出す
pub fn read_compendium_xml<R: Read + Seek>(archive: &mut ZipArchive<R>, source: &Path) -> Result<Vec<u8>> {
    let mut file = match archive.by_name(COMPENDIUM_XML) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            return Err(CompendiumError::MissingCompendiumXml(source.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut xml = Vec::new();
    file.read_to_end(&mut xml)?;
    Ok(xml)
}

/// 出力アーカイブ
///
/// 書き込んだエントリ名を保持し、同名の書き込みを防ぐ。
pub struct ArchiveMerger<W: Write + Seek> {
    writer: ZipWriter<W>,
    written: HashSet<String>,
    suffixes: Box<dyn SuffixSource>,
}

impl<W: Write + Seek> ArchiveMerger<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: ZipWriter::new(inner),
            written: HashSet::new(),
            suffixes: Box::new(RandomSuffix),
        }
    }

    pub fn with_suffix_source(mut self, suffixes: impl SuffixSource + 'static) -> Self {
        self.suffixes = Box::new(suffixes);
        self
    }

    /// 書き込み済みのエントリ名
    pub fn contains(&self, name: &str) -> bool {
        self.written.contains(name)
    }

    /// `compendium.xml` 以外の全エントリを無加工でコピーする
    pub fn copy_assets<R: Read + Seek>(&mut self, source: &mut ZipArchive<R>) -> Result<usize> {
        let mut copied = 0;
        for index in 0..source.len() {
            let file = source.by_index_raw(index)?;
            let name = file.name().to_string();
            if name == COMPENDIUM_XML {
                continue;
            }
            if !self.written.insert(name.clone()) {
                log::warn!("Duplicate archive entry skipped: {}", name);
                continue;
            }
            self.writer.raw_copy_file(file)?;
            log::trace!("Asset copied: {}", name);
            copied += 1;
        }
        Ok(copied)
    }

    /// 画像を追加し、XMLに書くファイル名を返す
    pub fn add_image(&mut self, kind: EntryKind, image: &ImageRef) -> Result<String> {
        let file_name = self.unique_file_name(kind, image)?;
        let destination = format!("{}/{}", kind.subdirectory(), file_name);

        let mut source = File::open(image.path())?;
        self.writer.start_file(destination.as_str(), SimpleFileOptions::default())?;
        std::io::copy(&mut source, &mut self.writer)?;
        self.written.insert(destination.clone());

        log::trace!("File written to: `{}`", destination);
        Ok(file_name)
    }

    pub fn write_compendium(&mut self, xml: &[u8]) -> Result<()> {
        self.writer.start_file(COMPENDIUM_XML, SimpleFileOptions::default())?;
        self.writer.write_all(xml)?;
        self.written.insert(COMPENDIUM_XML.to_string());
        Ok(())
    }

    pub fn finish(self) -> Result<W> {
        Ok(self.writer.finish()?)
    }

    fn unique_file_name(&mut self, kind: EntryKind, image: &ImageRef) -> Result<String> {
        let subdirectory = kind.subdirectory();
        let mut file_name = image.file_name();

        let mut attempts = 0;
        while self.written.contains(&format!("{}/{}", subdirectory, file_name)) {
            if attempts == MAX_SUFFIX_ATTEMPTS {
                return Err(CompendiumError::NameCollision(
                    attempts,
                    format!("{}/{}", subdirectory, image.file_name()),
                ));
            }
            attempts += 1;
            file_name = format!("{}_{}{}", image.base_name, self.suffixes.next_suffix(), image.extension);
        }

        Ok(file_name)
    }
}
