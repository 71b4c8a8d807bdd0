//! 対話式確認モジュール

use crate::error::{CompendiumError, Result};
use compendium_images_common::Answer;
use dialoguer::Input;

/// y/n/q の確認を行う
pub trait Prompter {
    /// 有効な回答が得られるまでブロックする
    fn confirm(&mut self, question: &str) -> Result<Answer>;
}

/// 端末で確認するプロンプター
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> Result<Answer> {
        // 不正な入力はエラーを表示して再入力
        let input: String = Input::new()
            .with_prompt(question)
            .allow_empty(true)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                Answer::parse(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(|e| CompendiumError::Prompt(e.to_string()))?;

        Ok(Answer::parse(&input)?)
    }
}
