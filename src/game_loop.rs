use std::io;
use std::time::Instant;

use crate::game::{GameState, GameStatus};
use crate::input::{GameInput, InputSource};

/// Drawing surface the loop hands the state to once per frame.
pub trait Renderer {
    fn draw(&mut self, state: &GameState) -> io::Result<()>;
}

/// Runs the game until the input source asks to exit.
///
/// While running, the wait between ticks is a poll on `input` bounded by the
/// snake's current speed, so commands are handled as they arrive. Once the game
/// is over the loop blocks on the next command.
pub fn run<I, R>(state: &mut GameState, input: &mut I, renderer: &mut R) -> io::Result<()>
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
{
    log::info!("session started");

    loop {
        renderer.draw(state)?;

        match state.status {
            GameStatus::Running => {
                let deadline = Instant::now() + state.tick_interval();
                while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
                    match input.poll(remaining)? {
                        Some(GameInput::Exit) => return Ok(()),
                        Some(command) => state.apply_input(command),
                        None => break,
                    }
                }

                state.tick(Instant::now());
            }
            GameStatus::GameOver => match input.wait()? {
                GameInput::Exit => return Ok(()),
                command => state.apply_input(command),
            },
        }
    }
}
