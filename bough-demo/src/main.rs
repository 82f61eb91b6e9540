mod app;
mod document;
mod error;
mod input;
mod terminal;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::document::Document;
use crate::error::DemoError;
use crate::input::convert_event;
use crate::terminal::Terminal;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn run() -> Result<(), DemoError> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(DemoError::Usage)?;

    let log_file = File::create("bough-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let tree = Document::load(&path)?.into_tree()?;
    let mut app = App::new(tree);
    info!(
        "Tree {} ready with {} nodes",
        app.tree().id(),
        app.tree().len()
    );

    let mut terminal = Terminal::new()?;
    while !app.should_quit() {
        let (width, height) = terminal.size()?;
        if app.take_redraw() {
            let frame = app.frame(width, height);
            terminal.draw(&frame.lines, frame.highlight)?;
        }

        let body_height = usize::from(height.saturating_sub(1));
        for action in terminal.poll(POLL_INTERVAL)?.into_iter().filter_map(convert_event) {
            app.handle(action, body_height);
        }
    }

    info!("Exiting");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
