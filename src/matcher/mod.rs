//! エントリ名と画像ファイル名の照合
//!
//! 1. 候補ごとにファイル名を正規化して一致率を計算
//! 2. 最高一致率の候補を閾値で判定（自動採用 / 確認 / 却下）

mod types;

pub use types::MatchResult;

use crate::error::Result;
use crate::prompt::Prompter;
use compendium_images_common::{clean_file_name, ratio, Decision, ImageRef, TagKind, Thresholds, Tier};

/// 最も一致率の高い候補を返す
///
/// 同率の場合は先に見つかった候補。候補が空なら `None`。
pub fn best_match<'a>(candidates: &'a [ImageRef], name: &str, tag: TagKind) -> Option<MatchResult<'a>> {
    let mut best: Option<MatchResult<'a>> = None;

    for image in candidates {
        let cleaned = clean_file_name(&image.base_name, Some(tag));
        let score = ratio(&cleaned, name);
        log::trace!("{} vs '{}': {}", image.display_path(), name, score);

        if best.map_or(true, |b| score > b.score) {
            best = Some(MatchResult { score, image });
        }
    }

    best
}

/// 一致率に応じて採用可否を決める
///
/// 確認の帯に入った場合のみ `prompter` に問い合わせる。
pub fn decide<'a>(
    result: MatchResult<'a>,
    tag: TagKind,
    name: &str,
    thresholds: Thresholds,
    prompter: &mut dyn Prompter,
) -> Result<Decision<&'a ImageRef>> {
    match thresholds.classify(result.score) {
        Tier::Auto => {
            log::debug!("Found {} for '{}': {}", tag, name, result.image.display_path());
            Ok(Decision::Accept(result.image))
        }
        Tier::Ask => {
            log::info!(
                "Found potential {} ({}) for '{}': {}",
                tag,
                result.score,
                name,
                result.image.display_path()
            );
            let question = format!(
                "{} ({}%): {} を使用しますか? y/n/q (デフォルト: y)",
                name,
                result.score,
                result.image.display_path()
            );
            let answer = prompter.confirm(&question)?;
            log::trace!("Choice: {:?}", answer);
            Ok(Decision::from_answer(answer, result.image))
        }
        Tier::Reject => {
            log::trace!("No match found for '{}' (best: {})", name, result.score);
            Ok(Decision::Reject)
        }
    }
}
