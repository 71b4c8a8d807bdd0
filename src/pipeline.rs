//! 一括処理：画像検索 → 照合 → アーカイブ出力

use crate::archive::{read_compendium_xml, ArchiveMerger, OutputGuard};
use crate::compendium::{CompendiumSource, Document, Entry};
use crate::error::{CompendiumError, Result};
use crate::matcher;
use crate::prompt::Prompter;
use crate::scanner;
use compendium_images_common::{Decision, ImageRef, TagKind, Thresholds, Tier};
use std::fs::File;
use std::io::{BufReader, Seek, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// 1回の実行に必要な設定
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub compendium_path: PathBuf,
    pub image_dirs: Vec<PathBuf>,
    pub token_dirs: Vec<PathBuf>,
    pub output_path: PathBuf,
    pub thresholds: Thresholds,
}

/// 実行結果の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 処理したエントリ数
    pub entries: usize,
    pub images_added: usize,
    pub tokens_added: usize,
    /// 既にタグを持っていたためスキップした数
    pub already_tagged: usize,
    /// 却下（低一致率・ユーザー拒否）の数
    pub rejected: usize,
    /// 確認プロンプトに答えた数
    pub prompted: usize,
    /// 元アーカイブからコピーしたアセット数
    pub assets_copied: usize,
}

/// 画像プールとトークンプール
struct Pools<'a> {
    images: &'a [ImageRef],
    tokens: &'a [ImageRef],
}

impl<'a> Pools<'a> {
    fn for_tag(&self, tag: TagKind) -> &'a [ImageRef] {
        match tag {
            TagKind::Image => self.images,
            TagKind::Token => self.tokens,
        }
    }
}

/// 実行する
///
/// エラー・中断時は書きかけの出力ファイルを削除する。
pub fn run(options: &RunOptions, prompter: &mut dyn Prompter) -> Result<RunSummary> {
    log::trace!("Options={:?}", options);

    let source = CompendiumSource::from_path(&options.compendium_path)?;
    if options.image_dirs.is_empty() && options.token_dirs.is_empty() {
        return Err(CompendiumError::NoSources);
    }
    ensure_distinct_output(source.path(), &options.output_path)?;

    // 1. 画像検索
    log::info!("[1/4] 画像を検索中...");
    let images = scanner::index(&options.image_dirs)?;
    let tokens = scanner::index(&options.token_dirs)?;
    if images.is_empty() && tokens.is_empty() {
        return Err(CompendiumError::NoImagesFound);
    }
    log::info!("✔ 画像 {}枚 / トークン {}枚を検出", images.len(), tokens.len());

    let file = File::create(&options.output_path)?;
    let guard = OutputGuard::new(&options.output_path);
    let mut merger = ArchiveMerger::new(file);
    let mut summary = RunSummary::default();

    // 2. コンペンディウム読み込み
    log::info!("[2/4] コンペンディウムを読み込み中...");
    let xml = match &source {
        CompendiumSource::Xml(path) => std::fs::read(path)?,
        CompendiumSource::Archive(path) => {
            let mut archive = ZipArchive::new(BufReader::new(File::open(path)?))?;
            let xml = read_compendium_xml(&mut archive, path)?;
            summary.assets_copied = merger.copy_assets(&mut archive)?;
            log::debug!("{}件のアセットをコピー", summary.assets_copied);
            xml
        }
    };
    let mut document = Document::parse(&xml)?;

    // 3. 照合
    log::info!("[3/4] モンスター・アイテムを照合中...");
    let pools = Pools {
        images: &images,
        tokens: &tokens,
    };
    for element in document.top_level_mut() {
        let tag_name = element.name.clone();
        let Some(mut entry) = Entry::from_element(element) else {
            log::trace!("Ignoring `{}` Tag", tag_name);
            continue;
        };
        process_entry(&mut entry, &pools, &mut merger, options.thresholds, prompter, &mut summary)?;
    }

    // 4. 出力
    log::info!("[4/4] コンペンディウムを出力中...");
    merger.write_compendium(&document.to_bytes()?)?;
    merger.finish()?;
    guard.commit();

    log::info!(
        "✔ {}件中 画像{}件・トークン{}件を追加 (既存{}件, 却下{}件, 確認{}件)",
        summary.entries,
        summary.images_added,
        summary.tokens_added,
        summary.already_tagged,
        summary.rejected,
        summary.prompted
    );
    log::info!("✔ 出力: {}", options.output_path.display());

    Ok(summary)
}

fn process_entry<W: Write + Seek>(
    entry: &mut Entry<'_>,
    pools: &Pools<'_>,
    merger: &mut ArchiveMerger<W>,
    thresholds: Thresholds,
    prompter: &mut dyn Prompter,
    summary: &mut RunSummary,
) -> Result<()> {
    let Some(name) = entry.name() else {
        log::warn!("`{}` without a name skipped", entry.kind);
        return Ok(());
    };
    log::trace!("Found `{}`: {}", entry.kind, name);
    summary.entries += 1;

    for tag in TagKind::ALL {
        let pool = pools.for_tag(tag);
        if !entry.kind.supports(tag) || pool.is_empty() {
            continue;
        }

        log::trace!("Checking {}", tag);
        if entry.has_tag(tag) {
            log::trace!("Already has a `{}`", tag);
            summary.already_tagged += 1;
            continue;
        }

        let Some(result) = matcher::best_match(pool, &name, tag) else {
            continue;
        };

        if thresholds.classify(result.score) == Tier::Ask {
            summary.prompted += 1;
        }
        match matcher::decide(result, tag, &name, thresholds, prompter)? {
            Decision::Accept(image) => {
                let file_name = merger.add_image(entry.kind, image)?;
                entry.attach(tag, &file_name);
                match tag {
                    TagKind::Image => summary.images_added += 1,
                    TagKind::Token => summary.tokens_added += 1,
                }
            }
            Decision::Reject => summary.rejected += 1,
            Decision::Quit => return Err(CompendiumError::Quit),
        }
    }

    Ok(())
}

/// 入力を上書きしないよう出力先を確認する
fn ensure_distinct_output(source: &Path, output: &Path) -> Result<()> {
    let same = match (source.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        return Err(CompendiumError::Config(format!(
            "出力先が入力と同じです: {}",
            output.display()
        )));
    }
    Ok(())
}
