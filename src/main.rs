use clap::Parser;
use compendium_images::{cli, config, error, logging, pipeline, prompt};
use cli::Cli;
use config::Config;
use error::{CompendiumError, Result};
use prompt::TerminalPrompter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbosity());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CompendiumError::Quit) => {
            log::info!("中断しました（出力ファイルは削除済み）");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_configuration() => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("予期しないエラーが発生しました: {}", e);
            log::error!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.effective_config(&Config::load()?);

    if cli.show_config || cli.save_config {
        if cli.save_config {
            let path = config.save()?;
            println!("✔ 設定を保存しました: {}", path.display());
        }
        if cli.show_config {
            println!("設定:");
            println!("  ファイル: {}", Config::config_path()?.display());
            println!("  自動採用: {}", config.auto_threshold);
            println!("  確認: {}", config.ask_threshold);
            println!("  出力: {}", config.output.display());
        }
        return Ok(());
    }

    let Some(options) = cli.run_options(&config) else {
        return Ok(());
    };

    println!("📦 compendium-images - 画像追加\n");
    pipeline::run(&options, &mut TerminalPrompter)?;
    println!("\n✅ 完了");

    Ok(())
}
