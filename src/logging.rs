//! ログ設定
//!
//! `-v` の回数で3段階:
//! - なし: 進捗のみ (Info)
//! - `-v`: 自動採用した照合結果など (Debug)
//! - `-vv`: 走査・照合の全詳細 (Trace)
//!
//! `RUST_LOG` が設定されていればそちらを優先する。

use log::LevelFilter;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Info,
    Detailed,
    Debug,
}

impl Verbosity {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Info,
            1 => Verbosity::Detailed,
            _ => Verbosity::Debug,
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Detailed => LevelFilter::Debug,
            Verbosity::Debug => LevelFilter::Trace,
        }
    }
}

pub fn init(verbosity: Verbosity) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(verbosity.level_filter())
        .format(|buf, record| {
            let label = match record.level() {
                log::Level::Debug => "DETAILED".to_string(),
                level => level.to_string(),
            };
            writeln!(buf, "{:<8} {}", label, record.args())
        })
        .parse_default_env();

    // テストなどで二重初期化されても無視
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_count() {
        assert_eq!(Verbosity::from_count(0), Verbosity::Info);
        assert_eq!(Verbosity::from_count(1), Verbosity::Detailed);
        assert_eq!(Verbosity::from_count(2), Verbosity::Debug);
        assert_eq!(Verbosity::from_count(7), Verbosity::Debug);
    }

    #[test]
    fn test_level_filters() {
        assert_eq!(Verbosity::Info.level_filter(), LevelFilter::Info);
        assert_eq!(Verbosity::Detailed.level_filter(), LevelFilter::Debug);
        assert_eq!(Verbosity::Debug.level_filter(), LevelFilter::Trace);
    }
}
