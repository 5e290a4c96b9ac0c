mod app;
mod cli;
mod config;
mod consts;
mod core;
mod date;
mod error;
mod html;
mod output;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();

    // JSON consumers get clean streams; config discovery stays quiet
    let config = if cli.json {
        Config::load_quiet()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);

    utils::set_scan_debug(cli.debug);

    std::process::exit(app::run(&cli));
}
