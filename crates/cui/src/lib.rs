mod actions;
mod app;
mod input;
mod view;

use anyhow::{Context, Result};
use app::{App, DEFAULT_RUN_SEED};
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout, IsTerminal};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
    pub max_turns: Option<u32>,
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let seed = options.seed.unwrap_or(DEFAULT_RUN_SEED);
    let mut app = App::bootstrap(seed, options.max_turns)?;

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut seed = None;
    let mut max_turns = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--turns" => {
                if let Some(value) = args.get(idx + 1) {
                    max_turns = value.parse::<u32>().ok();
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    LaunchOptions { seed, max_turns }
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = input::map_key(key);
                actions::dispatch(app, action);
            }
        } else {
            app.on_tick();
        }
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "lootflip-cui requires an interactive TTY (run directly in a terminal, not a piped shell)"
    );
}

#[cfg(test)]
mod tests {
    use super::parse_options;

    #[test]
    fn parses_seed_and_turns() {
        let args = vec![
            "--seed".to_string(),
            "99".to_string(),
            "--turns".to_string(),
            "25".to_string(),
        ];
        let options = parse_options(&args);
        assert_eq!(options.seed, Some(99));
        assert_eq!(options.max_turns, Some(25));
    }

    #[test]
    fn ignores_unknown_flags() {
        let args = vec!["--wat".to_string(), "--seed".to_string(), "5".to_string()];
        let options = parse_options(&args);
        assert_eq!(options.seed, Some(5));
        assert_eq!(options.max_turns, None);
    }
}
