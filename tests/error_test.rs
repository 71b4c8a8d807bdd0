//! エラーケーステスト
//!
//! 設定ミス・入力不備でのエラーハンドリングを検証

use compendium_images::error::CompendiumError;
use compendium_images::pipeline::{run, RunOptions};
use compendium_images::prompt::Prompter;
use compendium_images::scanner;
use compendium_images_common::{Answer, Thresholds};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

struct NoPrompt;

impl Prompter for NoPrompt {
    fn confirm(&mut self, _question: &str) -> compendium_images::error::Result<Answer> {
        panic!("確認プロンプトは想定外");
    }
}

fn options(compendium: PathBuf, images: Vec<PathBuf>, tokens: Vec<PathBuf>, output: PathBuf) -> RunOptions {
    RunOptions {
        compendium_path: compendium,
        image_dirs: images,
        token_dirs: tokens,
        output_path: output,
        thresholds: Thresholds::default(),
    }
}

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    let err = result.unwrap_err();
    assert!(matches!(err, CompendiumError::FolderNotFound(_)));
    assert!(err.is_configuration());
}

/// 画像のないフォルダは空のVec
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("goblin.gif"), "gif").unwrap();

    let result = scanner::scan_folder(dir.path()).unwrap();
    assert!(result.is_empty());
}

/// 拡張子が不正
#[test]
fn test_invalid_extension() {
    let dir = tempdir().unwrap();
    let compendium = dir.path().join("bestiary.json");
    std::fs::write(&compendium, "{}").unwrap();
    let output = dir.path().join("out.compendium");

    let err = run(&options(compendium, vec![dir.path().to_path_buf()], vec![], output.clone()), &mut NoPrompt)
        .unwrap_err();
    assert!(matches!(err, CompendiumError::InvalidExtension(_)));
    assert!(!output.exists());
}

/// コンペンディウムが存在しない
#[test]
fn test_missing_compendium() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.compendium");

    let err = run(
        &options(dir.path().join("missing.xml"), vec![dir.path().to_path_buf()], vec![], output.clone()),
        &mut NoPrompt,
    )
    .unwrap_err();
    assert!(matches!(err, CompendiumError::CompendiumNotFound(_)));
    assert!(!output.exists());
}

/// 画像・トークンのフォルダ指定なし
#[test]
fn test_no_sources() {
    let dir = tempdir().unwrap();
    let compendium = dir.path().join("compendium.xml");
    std::fs::write(&compendium, "<compendium/>").unwrap();
    let output = dir.path().join("out.compendium");

    let err = run(&options(compendium, vec![], vec![], output.clone()), &mut NoPrompt).unwrap_err();
    assert!(matches!(err, CompendiumError::NoSources));
    assert!(!output.exists());
}

/// フォルダに画像が1枚もない
#[test]
fn test_no_images_found() {
    let dir = tempdir().unwrap();
    let compendium = dir.path().join("compendium.xml");
    std::fs::write(&compendium, "<compendium/>").unwrap();
    let pool = dir.path().join("art");
    std::fs::create_dir_all(&pool).unwrap();
    let output = dir.path().join("out.compendium");

    let err = run(&options(compendium, vec![pool.clone()], vec![pool], output.clone()), &mut NoPrompt)
        .unwrap_err();
    assert!(matches!(err, CompendiumError::NoImagesFound));
    assert!(!output.exists());
}

/// 出力先が入力と同じ
#[test]
fn test_output_same_as_input() {
    let dir = tempdir().unwrap();
    let compendium = dir.path().join("bestiary.compendium");
    std::fs::write(&compendium, "original").unwrap();
    std::fs::write(dir.path().join("goblin.png"), "img").unwrap();

    let err = run(
        &options(compendium.clone(), vec![dir.path().to_path_buf()], vec![], compendium.clone()),
        &mut NoPrompt,
    )
    .unwrap_err();
    assert!(matches!(err, CompendiumError::Config(_)));
    assert_eq!(std::fs::read_to_string(&compendium).unwrap(), "original");
}

/// CompendiumErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        CompendiumError::Config("テスト設定エラー".to_string()),
        CompendiumError::InvalidExtension(".json".to_string()),
        CompendiumError::CompendiumNotFound("a.xml".to_string()),
        CompendiumError::FolderNotFound("/path/to/folder".to_string()),
        CompendiumError::NoSources,
        CompendiumError::NoImagesFound,
        CompendiumError::MissingCompendiumXml("a.zip".to_string()),
        CompendiumError::Xml("bad".to_string()),
        CompendiumError::Prompt("closed".to_string()),
        CompendiumError::NameCollision(32, "monsters/goblin.png".to_string()),
        CompendiumError::Quit,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// compendium.xml 欠落のメッセージ
#[test]
fn test_missing_compendium_xml_message() {
    let err = CompendiumError::MissingCompendiumXml("bestiary.zip".to_string());
    let display = format!("{}", err);
    assert!(display.contains("bestiary.zip"));
    assert!(display.contains("compendium.xml"));
}

/// 設定エラーと予期しないエラーの区別
#[test]
fn test_configuration_classification() {
    assert!(CompendiumError::NoSources.is_configuration());
    assert!(CompendiumError::InvalidExtension(".txt".into()).is_configuration());
    assert!(!CompendiumError::Quit.is_configuration());
    assert!(!CompendiumError::Xml("x".into()).is_configuration());
    assert!(!CompendiumError::NameCollision(32, "x".into()).is_configuration());
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: CompendiumError = io_err.into();

    assert!(matches!(err, CompendiumError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: CompendiumError = json_err.into();

    assert!(matches!(err, CompendiumError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = compendium_images_common::Error::InvalidAnswer("maybe".to_string());
    let err: CompendiumError = common_err.into();

    assert!(matches!(err, CompendiumError::Common(_)));
    assert!(format!("{}", err).contains("`maybe`"));
}
