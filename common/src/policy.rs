//! 一致率から採用・確認・却下を決める判定ルール

use crate::error::{Error, Result};

/// 自動採用の閾値（デフォルト）
pub const DEFAULT_AUTO_THRESHOLD: u8 = 80;
/// 確認を求める閾値（デフォルト）
pub const DEFAULT_ASK_THRESHOLD: u8 = 50;

/// 一致率の閾値ペア
///
/// `ask >= auto` の場合、確認の帯は空になる（検証はしない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub auto: u8,
    pub ask: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            auto: DEFAULT_AUTO_THRESHOLD,
            ask: DEFAULT_ASK_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new(auto: u8, ask: u8) -> Self {
        Self { auto, ask }
    }

    pub fn classify(&self, score: u8) -> Tier {
        if score >= self.auto {
            Tier::Auto
        } else if score >= self.ask {
            Tier::Ask
        } else {
            Tier::Reject
        }
    }

    /// 確認の帯が存在するか
    pub fn has_ask_tier(&self) -> bool {
        self.ask < self.auto
    }
}

/// 一致率の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// 確認なしで採用
    Auto,
    /// オペレーターに確認
    Ask,
    /// 却下
    Reject,
}

/// 確認プロンプトへの回答
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Quit,
}

impl Answer {
    /// 入力文字列を解釈（空入力は Yes）
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "" | "y" | "yes" => Ok(Answer::Yes),
            "n" | "no" => Ok(Answer::No),
            "q" | "quit" => Ok(Answer::Quit),
            other => Err(Error::InvalidAnswer(other.to_string())),
        }
    }
}

/// 1つの候補に対する最終判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<T> {
    Accept(T),
    Reject,
    /// 実行全体を中断
    Quit,
}

impl<T> Decision<T> {
    pub fn from_answer(answer: Answer, candidate: T) -> Self {
        match answer {
            Answer::Yes => Decision::Accept(candidate),
            Answer::No => Decision::Reject,
            Answer::Quit => Decision::Quit,
        }
    }
}
