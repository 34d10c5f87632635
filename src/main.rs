use clap::Parser;
use env_logger::Builder;

use memcalc::{run, Args};

fn main() {
    let args = Args::parse();

    let mut logger = Builder::from_default_env();
    if let Some(level) = args.log_level() {
        logger.filter_level(level);
    }
    logger.format_timestamp(None).try_init().ok();

    if let Err(e) = run(args.into_config()) {
        eprintln!("Ошибка: {e}");
        std::process::exit(1);
    }
}
