//! Encounter+ コンペンディウム画像追加ツール
//!
//! ファイル名のあいまい一致でモンスター・アイテムに画像とトークンを付け、
//! 新しいアーカイブとして出力する。

pub mod archive;
pub mod cli;
pub mod compendium;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod pipeline;
pub mod prompt;
pub mod scanner;
