mod app;
mod config;
mod error;
mod render;
mod source;
mod terminal;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use simplelog::{Config, WriteLogger};

use crate::app::App;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::terminal::Terminal;

fn run() -> Result<(), DemoError> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DemoConfig::load(config_path.as_deref())?;

    let log_file = File::create(&config.log_file)?;
    WriteLogger::init(config.level(), Config::default(), log_file)?;
    log::info!("[demo] {} rows, {:?}", config.rows, config.recycler);

    let mut terminal = Terminal::new()?;
    let (_, height) = terminal.size()?;
    let mut app = App::new(&config, height)?;

    while app.running() {
        let (_, height) = terminal.size()?;
        terminal.draw(&render::frame(app.controller(), &app.status(), height))?;

        for event in terminal.poll(Some(Duration::from_millis(250)))? {
            app.handle_event(event);
        }
    }

    log::info!("[demo] exiting");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}
