use crate::engine::action::{Action, Direction};
use crate::engine::error::MazeError;
use crate::engine::world::{GameState, World};
use crate::tui::{input::is_press, input::key_to_action, renderer::render};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use ratatui::{backend::CrosstermBackend, Terminal};

use std::{
    io::{self, BufRead, Write},
    time::{Duration, Instant},
};

const MOVE_COOLDOWN_MS: u64 = 90;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Arrived { moves: usize },
    Disconnected,
    Quit,
}

impl Outcome {
    fn of(world: &World) -> Self {
        match world.state {
            GameState::Arrived => Outcome::Arrived { moves: world.moves },
            GameState::Disconnected => Outcome::Disconnected,
            GameState::Exploring => Outcome::Quit,
        }
    }
}

pub fn banner(outcome: Outcome) -> String {
    match outcome {
        Outcome::Arrived { moves } => format!(
            "{} success out of the maze in {moves} moves {}",
            "*".repeat(20),
            "*".repeat(20)
        ),
        Outcome::Disconnected => "The maze is not connected from entrance to exit".to_string(),
        Outcome::Quit => "Left the maze before reaching the exit".to_string(),
    }
}

fn show_maze<W: Write>(out: &mut W, world: &World) -> io::Result<()> {
    writeln!(out, "maze is shown below...")?;
    write!(out, "{}", world.grid.render_codes())
}

/// Line-oriented session: prints the grid as numbers and reads one
/// direction per line, prompting again on anything unrecognised.
pub fn run_plain<R: BufRead, W: Write>(world: &mut World, input: R, out: &mut W) -> Result<Outcome, MazeError> {
    writeln!(
        out,
        "entrance: {}, exit: {}, connected: {}",
        world.entrance,
        world.exit,
        if world.connected { "yes" } else { "no" }
    )?;
    show_maze(out, world)?;

    if world.state == GameState::Disconnected {
        writeln!(out, "{}", banner(Outcome::Disconnected))?;
        return Ok(Outcome::Disconnected);
    }

    let mut lines = input.lines();
    write!(out, "please input your choice, in [W, S, A, D]: ")?;
    out.flush()?;

    while !world.is_arrived() {
        let Some(line) = lines.next() else {
            writeln!(out)?;
            tracing::info!(moves = world.moves, "input closed before arrival");
            return Ok(Outcome::Quit);
        };
        let line = line?;

        let dir = match line.parse::<Direction>() {
            Ok(dir) => dir,
            Err(e) => {
                tracing::debug!(error = %e, "rejected input");
                write!(out, "please input a valid choice, in [W, S, A, D]: ")?;
                out.flush()?;
                continue;
            }
        };

        match world.try_move(dir) {
            Ok(_) => show_maze(out, world)?,
            Err(e) => writeln!(out, "invalid move: {e}")?,
        }

        if !world.is_arrived() {
            write!(out, "please input your choice, in [W, S, A, D]: ")?;
            out.flush()?;
        }
    }

    let outcome = Outcome::of(world);
    writeln!(out, "{}", banner(outcome))?;
    Ok(outcome)
}

/// Full-screen session. Keeps drawing after arrival until the player quits.
/// A maze without a way through is never opened for play.
pub fn run_tui(world: &mut World) -> Result<Outcome, MazeError> {
    if world.state == GameState::Disconnected {
        tracing::info!(entrance = %world.entrance, exit = %world.exit, "maze not connected, skipping play");
        return Ok(Outcome::Disconnected);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = tui_loop(&mut terminal, world);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result?;
    Ok(Outcome::of(world))
}

fn tui_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, world: &mut World) -> Result<(), MazeError> {
    let tick_rate = Duration::from_millis(60);
    let cooldown = Duration::from_millis(MOVE_COOLDOWN_MS);
    let mut last_move_time = Instant::now() - cooldown;
    let mut announced = false;

    let mut running = true;
    while running {
        if terminal.draw(|f| render(f, world)).is_err() {
            terminal.autoresize()?;
            terminal.clear()?;
            continue;
        }

        if world.is_arrived() && !announced {
            world.push_log("Press Q or Esc to leave.");
            announced = true;
        }

        if !event::poll(tick_rate)? {
            continue;
        }

        match event::read()? {
            Event::Resize(_, _) => {
                terminal.autoresize()?;
                terminal.clear()?;
            }

            Event::Key(key) => {
                if !is_press(&key) {
                    continue;
                }

                let mut action = key_to_action(&key);

                if let Action::Move(_) = action {
                    let now = Instant::now();
                    if now.duration_since(last_move_time) < cooldown {
                        action = Action::None;
                    } else {
                        last_move_time = now;
                    }
                }

                running = world.apply_action(action);
            }

            _ => {}
        }
    }

    Ok(())
}
