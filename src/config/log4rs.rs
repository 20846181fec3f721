use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

const PATTERN: &str = concat!(
    "memkv[",
    env!("CARGO_PKG_VERSION"),
    "]@{d(%Y-%m-%d %H:%M:%S)} {t}: {m}{n}"
);

fn console(target: Target) -> ConsoleAppender {
    ConsoleAppender::builder()
        .target(target)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build()
}

/// console logging: requests to stdout, errors to stderr.
pub fn config() -> Config {
    Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(console(Target::Stdout))))
        .appender(Appender::builder().build("stderr", Box::new(console(Target::Stderr))))
        .logger(
            Logger::builder()
                .appender("stderr")
                .build("app::error", LevelFilter::Error),
        )
        .logger(
            Logger::builder()
                .appender("stdout")
                .build("app::request", LevelFilter::Info),
        )
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .unwrap()
}
