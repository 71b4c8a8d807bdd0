use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompendiumError {
    #[error(transparent)]
    Common(#[from] compendium_images_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("不正なファイル形式です ({0})。`.xml`、`.compendium`、`.zip` のいずれかを指定してください")]
    InvalidExtension(String),

    #[error("コンペンディウムが見つかりません: {0}")]
    CompendiumNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像またはトークンのフォルダを指定してください")]
    NoSources,

    #[error("画像・トークンが見つかりません")]
    NoImagesFound,

    #[error("アーカイブ ({0}) に `compendium.xml` が含まれていません")]
    MissingCompendiumXml(String),

    #[error("XML解析エラー: {0}")]
    Xml(String),

    #[error("ZIPエラー: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("出力ファイル名が重複しています ({0} 回試行): {1}")]
    NameCollision(usize, String),

    #[error("ユーザーにより中断されました")]
    Quit,
}

impl CompendiumError {
    /// 実行前の設定ミスに起因するエラーか
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CompendiumError::Config(_)
                | CompendiumError::InvalidExtension(_)
                | CompendiumError::CompendiumNotFound(_)
                | CompendiumError::FolderNotFound(_)
                | CompendiumError::NoSources
                | CompendiumError::NoImagesFound
                | CompendiumError::MissingCompendiumXml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CompendiumError>;
