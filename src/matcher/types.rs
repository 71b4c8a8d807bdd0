use compendium_images_common::ImageRef;

/// 最も一致率の高い候補
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'a> {
    /// 一致率 (0-100)
    pub score: u8,
    pub image: &'a ImageRef,
}
