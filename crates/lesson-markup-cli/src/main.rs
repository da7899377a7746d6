mod app;
mod ui;

use anyhow::{Context, Result};
use app::{App, COLOR_KEYS, theme_from_config};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lesson_markup_config::Config;
use lesson_markup_engine::{FormatCommand, Renderer, render::html::to_html};
use lesson_markup_syntax::{Align, tokenize};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::OpenOptions,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

enum Mode {
    Edit,
    Html,
    Tokens,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--html | --tokens] <file>");
    process::exit(1);
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let (mode, file) = match args.as_slice() {
        [_, file] if !file.starts_with("--") => (Mode::Edit, file),
        [_, flag, file] if flag == "--html" => (Mode::Html, file),
        [_, flag, file] if flag == "--tokens" => (Mode::Tokens, file),
        _ => usage(args.first().map_or("lesson-markup-cli", String::as_str)),
    };

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    init_logging(&config, matches!(mode, Mode::Edit))?;
    log::info!("lesson-markup-cli starting on {file}");

    let path = PathBuf::from(file);
    let source =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;

    match mode {
        Mode::Html => {
            let theme = theme_from_config(&config);
            let rendered = Renderer::new(&theme, None).render(&tokenize(&source), &mut |id: &str| {
                Some(format!("<input class=\"gap\" data-gap=\"{id}\">"))
            });
            println!("{}", to_html(&rendered, String::clone));
        }
        Mode::Tokens => {
            println!("{}", serde_json::to_string_pretty(&tokenize(&source))?);
        }
        Mode::Edit => run_editor(&path, source, &config)?,
    }

    Ok(())
}

/// Sends logs to the configured file. Without one, only warnings reach
/// stderr, and only outside the terminal UI.
fn init_logging(config: &Config, tui: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    match &config.log_file {
        Some(log_file) => {
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .with_context(|| format!("opening log file {}", log_file.display()))?;
            builder
                .filter_level(log::LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if tui => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {
            builder.filter_level(log::LevelFilter::Warn);
        }
    }
    builder.init();
    Ok(())
}

fn run_editor(path: &Path, source: String, config: &Config) -> Result<()> {
    let mut app = App::new(path.to_path_buf(), source, theme_from_config(config));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    if app.is_dirty() {
        eprintln!("Unsaved changes to {} were discarded", path.display());
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Char('b') => app.apply(FormatCommand::Bold),
            KeyCode::Char('i') => app.apply(FormatCommand::Italic),
            KeyCode::Char('u') => app.apply(FormatCommand::Underline),
            KeyCode::Char('l') => app.set_align(Align::Left),
            KeyCode::Char('c') => app.set_align(Align::Center),
            KeyCode::Char('r') => app.set_align(Align::Right),
            KeyCode::Char('+') | KeyCode::Char('=') => app.step_size(true),
            KeyCode::Char('-') => app.step_size(false),
            KeyCode::Char('0') => app.set_color(""),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                app.set_color(COLOR_KEYS[index]);
            }
            KeyCode::Char('s') => {
                if let Err(e) = app.save() {
                    log::warn!("save failed: {e:#}");
                    app.status = format!("Save failed: {e:#}");
                }
            }
            _ => {}
        }
    }
}
