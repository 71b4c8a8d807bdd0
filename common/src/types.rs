//! 画像参照・エントリ種別などの共通型

use std::fmt;
use std::path::{Path, PathBuf};

/// ディスク上で見つかった画像ファイルへの参照
///
/// 走査時に一度だけ作られ、以後は読み取り専用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// ファイルのあるディレクトリ
    pub dir: PathBuf,
    /// 拡張子を除いたファイル名
    pub base_name: String,
    /// ドット付きの拡張子（ディスク上の大文字小文字のまま）
    pub extension: String,
    /// 走査を開始したルートディレクトリ
    pub root: PathBuf,
    /// 走査で見つかった実パス（UTF-8でないファイル名もそのまま）
    pub source: PathBuf,
}

impl ImageRef {
    pub fn new(
        dir: impl Into<PathBuf>,
        base_name: impl Into<String>,
        extension: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        let dir = dir.into();
        let base_name = base_name.into();
        let extension = extension.into();
        let source = dir.join(format!("{}{}", base_name, extension));
        Self {
            dir,
            base_name,
            extension,
            root: root.into(),
            source,
        }
    }

    /// 実パスを差し替える
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// `goblin.png` のような拡張子付きファイル名
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, self.extension)
    }

    /// ディスク上のフルパス
    pub fn path(&self) -> &Path {
        &self.source
    }

    /// ルートからの相対パス（ログ表示用）
    pub fn display_path(&self) -> String {
        self.source
            .strip_prefix(&self.root)
            .unwrap_or(&self.source)
            .display()
            .to_string()
    }
}

/// 画像を付けられるコンペンディウムエントリの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Monster,
    Item,
}

impl EntryKind {
    /// XML要素名から判定（対象外の要素は `None`）
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "monster" => Some(EntryKind::Monster),
            "item" => Some(EntryKind::Item),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            EntryKind::Monster => "monster",
            EntryKind::Item => "item",
        }
    }

    /// 出力アーカイブ内の格納先ディレクトリ
    pub fn subdirectory(&self) -> &'static str {
        match self {
            EntryKind::Monster => "monsters",
            EntryKind::Item => "items",
        }
    }

    /// この種別に付けられるタグ（トークンはモンスターのみ）
    pub fn supports(&self, tag: TagKind) -> bool {
        match tag {
            TagKind::Image => true,
            TagKind::Token => matches!(self, EntryKind::Monster),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// エントリに追加する子要素の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Image,
    Token,
}

impl TagKind {
    pub const ALL: [TagKind; 2] = [TagKind::Image, TagKind::Token];

    /// 子要素名。ファイル名から取り除くヒント文字列も兼ねる
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Image => "image",
            TagKind::Token => "token",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
