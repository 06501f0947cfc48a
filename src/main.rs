mod cli;
mod config;
mod contact;
mod delay;
mod logging;
mod model;
mod stepper;
mod storage;
mod summary;
mod tui;

use std::process;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
