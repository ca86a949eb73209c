//! lectern: A keyboard-driven outline presenter.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use env_logger::Env;
use lectern::app_state::{AppState, Intent, View};
use lectern::{config, formats, input, ui};
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Keyboard-driven slide presentations for outline documents", long_about = None)]
struct Args {
    /// Files or directories to present
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Section to open first, e.g. 5.2
    #[arg(long, value_name = "SECTION")]
    start: Option<String>,

    /// Print the parsed outline as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Write logs to this file (the terminal is taken over by the presenter)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)?;

    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let format = formats::markdown::MarkdownFormat;
    let outline = input::extract_outline(&documents[0], &format)?;

    if args.dump {
        let json = serde_json::to_string_pretty(&outline).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    if !outline.has_sections() {
        log::warn!("{} has no sections", documents[0].display());
    }

    let mut state = AppState::new(documents, outline, cfg.wrap_width);

    if let Some(start) = args.start {
        state.on_jump(&start);
    }

    run_tui(state, &cfg)
}

fn run_tui(mut app: AppState, cfg: &config::Config) -> io::Result<()> {
    let code = ui::CodeHighlighter::new(&cfg.theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg, &code);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    } else {
        let json = serde_json::to_string_pretty(&app.report()).map_err(io::Error::other)?;
        println!("{json}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &config::Config,
    code: &ui::CodeHighlighter,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, cfg, code))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match app.current_view {
                View::Slides => match Intent::from_key(key.code, key.modifiers) {
                    Some(Intent::Quit) => return Ok(()),
                    Some(Intent::NextDocument) => switch_document(app, true),
                    Some(Intent::PrevDocument) => switch_document(app, false),
                    Some(intent) => app.dispatch(intent),
                    None => {}
                },
                View::Jump => {
                    if app.on_prompt_key(key.code, key.modifiers) {
                        return Ok(());
                    }
                }
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(expander) = app.expander_at(mouse.column, mouse.row) {
                        app.on_expand(expander);
                    }
                }
                MouseEventKind::Down(MouseButton::Right) => {
                    if let Some(expander) = app.collapser_at(mouse.column, mouse.row) {
                        app.on_collapse(expander);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}

fn switch_document(app: &mut AppState, forward: bool) {
    let Some(index) = app.neighbour_document(forward) else {
        return;
    };

    let format = formats::markdown::MarkdownFormat;
    match input::extract_outline(&app.files[index], &format) {
        Ok(outline) => app.open_document(index, outline),
        Err(e) => {
            log::warn!("failed to load {}: {e}", app.files[index].display());
            app.message = Some(format!("Error loading {}: {e}", app.files[index].display()));
        }
    }
}
