//! Compendium Images Common Library
//!
//! 画像参照の型・ファイル名の類似度・採用判定ルール（I/Oなし）

pub mod types;
pub mod similarity;
pub mod policy;
pub mod error;

pub use types::{EntryKind, ImageRef, TagKind};
pub use similarity::{clean_file_name, ratio};
pub use policy::{Answer, Decision, Thresholds, Tier};
pub use error::{Error, Result};
