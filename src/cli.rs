use crate::config::Config;
use crate::logging::Verbosity;
use crate::pipeline::RunOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "compendium-images", version)]
#[command(
    about = "Encounter+ コンペンディウムに画像・トークンをあいまい一致で追加",
    long_about = None
)]
pub struct Cli {
    /// コンペンディウムのパス (.xml / .compendium / .zip)
    #[arg(value_name = "COMPENDIUM_PATH", required_unless_present_any = ["show_config", "save_config"])]
    pub compendium_path: Option<PathBuf>,

    /// 画像フォルダ（複数指定可、PNG/JPEG）
    #[arg(short = 'i', long = "image-path", value_name = "IMAGE_PATH")]
    pub image_paths: Vec<PathBuf>,

    /// トークンフォルダ（複数指定可、モンスターのみ）
    #[arg(short = 't', long = "token-path", value_name = "TOKEN_PATH")]
    pub token_paths: Vec<PathBuf>,

    /// 出力ファイル（デフォルト: with_images.compendium）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 自動採用する一致率 (0-100、デフォルト: 80)
    #[arg(short = 'm', long = "match", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub auto_threshold: Option<u8>,

    /// 確認を求める一致率 (0-100、デフォルト: 50)。`--match` 以上にすると確認しない
    #[arg(short = 'a', long = "ask", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub ask_threshold: Option<u8>,

    /// 詳細ログ (-v: 照合結果, -vv: デバッグ)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// 有効な設定を表示して終了
    #[arg(long)]
    pub show_config: bool,

    /// 閾値・出力先を設定ファイルに保存して終了
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_count(self.verbose)
    }

    /// 設定ファイルの値をコマンドライン引数で上書きする
    pub fn effective_config(&self, base: &Config) -> Config {
        Config {
            auto_threshold: self.auto_threshold.unwrap_or(base.auto_threshold),
            ask_threshold: self.ask_threshold.unwrap_or(base.ask_threshold),
            output: self.output.clone().unwrap_or_else(|| base.output.clone()),
        }
    }

    pub fn run_options(&self, config: &Config) -> Option<RunOptions> {
        let compendium_path = self.compendium_path.clone()?;
        Some(RunOptions {
            compendium_path,
            image_dirs: self.image_paths.clone(),
            token_dirs: self.token_paths.clone(),
            output_path: config.output.clone(),
            thresholds: config.thresholds(),
        })
    }
}
