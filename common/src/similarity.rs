//! ファイル名とエントリ名の類似度
//!
//! - ファイル名の正規化（記号除去・タグ名除去）
//! - Ratcliff/Obershelp 方式の一致率（0〜100）

use crate::types::TagKind;
use regex::Regex;
use std::collections::HashMap;

lazy_static::lazy_static! {
    // 英数字以外（アンダースコア・空白を含む）の連続
    static ref NON_ALNUM_RE: Regex = Regex::new(r"[\W_]+").unwrap();
    static ref IMAGE_RE: Regex = Regex::new(r"(?i)image").unwrap();
    static ref TOKEN_RE: Regex = Regex::new(r"(?i)token").unwrap();
}

/// ファイル名（拡張子なし）を比較用に正規化する
///
/// `goblin_token` + `Some(TagKind::Token)` → `goblin`
pub fn clean_file_name(base_name: &str, tag_hint: Option<TagKind>) -> String {
    let cleaned = NON_ALNUM_RE.replace_all(base_name, "");
    let tag_re: &Regex = match tag_hint {
        Some(TagKind::Image) => &IMAGE_RE,
        Some(TagKind::Token) => &TOKEN_RE,
        None => return cleaned.into_owned(),
    };
    tag_re.replace_all(&cleaned, "").into_owned()
}

/// 一致率を 0〜100 の整数で返す
///
/// 大文字小文字は区別しない。どちらかが空なら 0。
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let matches = matching_characters(&a, &b);
    (200.0 * matches as f64 / total as f64).round() as u8
}

/// 一致ブロックに含まれる文字数の合計
///
/// 最長一致ブロックを見つけ、その左右を再帰的に（スタックで）処理する。
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, ch) in b.iter().enumerate() {
        b_index.entry(*ch).or_default().push(j);
    }

    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
        let (i, j, size) = longest_match(a, &b_index, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        total += size;
        if a_lo < i && b_lo < j {
            queue.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            queue.push((i + size, a_hi, j + size, b_hi));
        }
    }
    total
}

/// `a[a_lo..a_hi]` と `b[b_lo..b_hi]` の最長共通ブロック
///
/// 同じ長さのブロックが複数あれば a 側、次に b 側で最も前のものを返す。
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // j で終わる一致の長さ
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_lengths = HashMap::new();
        if let Some(positions) = b_index.get(ch) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let previous = j
                    .checked_sub(1)
                    .and_then(|p| run_lengths.get(&p))
                    .copied()
                    .unwrap_or(0);
                let size = previous + 1;
                next_lengths.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        run_lengths = next_lengths;
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_separators() {
        assert_eq!(clean_file_name("potion_of healing", None), "potionofhealing");
        assert_eq!(clean_file_name("Giant--Spider (2)", None), "GiantSpider2");
        assert_eq!(clean_file_name("___", None), "");
    }

    #[test]
    fn test_clean_strips_tag_hint() {
        assert_eq!(clean_file_name("goblin_token", Some(TagKind::Token)), "goblin");
        assert_eq!(clean_file_name("Goblin_TOKEN", Some(TagKind::Token)), "Goblin");
        assert_eq!(clean_file_name("image-orc", Some(TagKind::Image)), "orc");
        // ヒントが違えば残る
        assert_eq!(clean_file_name("goblin_token", Some(TagKind::Image)), "goblintoken");
    }

    #[test]
    fn test_clean_keeps_unicode_letters() {
        assert_eq!(clean_file_name("Éowyn_rider", None), "Éowynrider");
    }

    #[test]
    fn test_ratio_identical() {
        assert_eq!(ratio("goblin", "goblin"), 100);
        assert_eq!(ratio("goblin", "GOBLIN"), 100);
    }

    #[test]
    fn test_ratio_disjoint() {
        assert_eq!(ratio("abc", "xyz"), 0);
        assert!(ratio("sword", "Potion of Healing") < 50);
    }

    #[test]
    fn test_ratio_empty() {
        assert_eq!(ratio("", "goblin"), 0);
        assert_eq!(ratio("goblin", ""), 0);
    }

    #[test]
    fn test_ratio_known_values() {
        // 一致 15 文字 / 合計 32 文字
        assert_eq!(ratio("potionofhealing", "Potion of Healing"), 94);
        // "abcd" と "bcde": 一致 "bcd"
        assert_eq!(ratio("abcd", "bcde"), 75);
        assert_eq!(ratio("goblin", "goblins"), 92);
    }

    #[test]
    fn test_ratio_is_symmetric_for_simple_cases() {
        assert_eq!(ratio("hobgoblin", "goblin"), ratio("goblin", "hobgoblin"));
    }

    #[test]
    fn test_matching_characters_recurses_both_sides() {
        let a: Vec<char> = "xabyzcd".chars().collect();
        let b: Vec<char> = "abqcd".chars().collect();
        // "ab" と "cd"
        assert_eq!(matching_characters(&a, &b), 4);
    }
}
