use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Exit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Source of player commands driving the game loop.
pub trait InputSource {
    /// Waits up to `timeout` for one command. `Ok(None)` means the timeout elapsed.
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<GameInput>>;

    /// Blocks until a command arrives.
    fn wait(&mut self) -> io::Result<GameInput>;
}

/// Keyboard input read through crossterm.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        poll_mapped(timeout, |remaining| {
            if event::poll(remaining)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })
    }

    fn wait(&mut self) -> io::Result<GameInput> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key_event(key) {
                    return Ok(input);
                }
            }
        }
    }
}

/// Reads events until one maps to a command or `timeout` has passed.
///
/// `next_event` waits up to the given duration and returns `Ok(None)` when
/// nothing arrived. Resizes, focus changes and unbound keys keep the wait going.
fn poll_mapped<F>(timeout: Duration, mut next_event: F) -> io::Result<Option<GameInput>>
where
    F: FnMut(Duration) -> io::Result<Option<Event>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let Some(event) = next_event(remaining)? else {
            return Ok(None);
        };

        if let Event::Key(key) = event {
            if let Some(input) = map_key_event(key) {
                return Ok(Some(input));
            }
        }

        if Instant::now() >= deadline {
            return Ok(None);
        }
    }
}

/// Maps one key event to a game command, ignoring releases and unbound keys.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Exit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Char('r' | 'R') => Some(GameInput::Restart),
        KeyCode::Char('e' | 'E' | 'q' | 'Q') | KeyCode::Esc => Some(GameInput::Exit),
        _ => None,
    }
}

/// Replays a fixed list of commands, for headless runs and tests.
///
/// `poll` returns queued commands immediately and times out at once when the
/// queue is empty. `wait` on an empty queue yields `Exit` so a script always
/// terminates the loop.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<GameInput>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(commands: impl IntoIterator<Item = GameInput>) -> Self {
        Self {
            queue: commands.into_iter().collect(),
        }
    }

    /// Number of commands not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> io::Result<Option<GameInput>> {
        Ok(self.queue.pop_front())
    }

    fn wait(&mut self) -> io::Result<GameInput> {
        Ok(self.queue.pop_front().unwrap_or(GameInput::Exit))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::thread;
    use std::time::{Duration, Instant};

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{
        direction_change_is_valid, map_key_event, poll_mapped, Direction, GameInput, InputSource,
        ScriptedInput,
    };

    /// Hands out queued events, then sleeps out the remaining wait like a quiet terminal.
    fn queued_events(
        events: Vec<Event>,
    ) -> impl FnMut(Duration) -> std::io::Result<Option<Event>> {
        let mut events = VecDeque::from(events);
        move |remaining| match events.pop_front() {
            Some(event) => Ok(Some(event)),
            None => {
                thread::sleep(remaining);
                Ok(None)
            }
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversal_is_not_a_valid_change() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Right, Direction::Right));
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(
            map_key_event(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Left)),
            Some(GameInput::Direction(Direction::Left))
        );
    }

    #[test]
    fn control_keys_map_to_restart_and_exit() {
        assert_eq!(map_key_event(press(KeyCode::Char('r'))), Some(GameInput::Restart));
        assert_eq!(map_key_event(press(KeyCode::Char('e'))), Some(GameInput::Exit));
        assert_eq!(map_key_event(press(KeyCode::Esc)), Some(GameInput::Exit));
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Exit)
        );
        assert_eq!(map_key_event(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(map_key_event(release), None);
    }

    #[test]
    fn ignored_events_do_not_cut_the_wait_short() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        let timeout = Duration::from_millis(50);
        let started = Instant::now();

        let polled = poll_mapped(
            timeout,
            queued_events(vec![
                Event::Resize(80, 24),
                Event::FocusGained,
                Event::Key(release),
                Event::Key(press(KeyCode::Char('x'))),
            ]),
        )
        .unwrap();

        assert_eq!(polled, None);
        assert!(started.elapsed() >= timeout);
    }

    #[test]
    fn first_bound_key_ends_the_wait() {
        let polled = poll_mapped(
            Duration::from_secs(5),
            queued_events(vec![Event::Resize(80, 24), Event::Key(press(KeyCode::Right))]),
        )
        .unwrap();

        assert_eq!(polled, Some(GameInput::Direction(Direction::Right)));
    }

    #[test]
    fn scripted_input_drains_then_exits() {
        let mut input = ScriptedInput::new([GameInput::Restart]);

        assert_eq!(
            input.poll(Duration::from_millis(10)).unwrap(),
            Some(GameInput::Restart)
        );
        assert_eq!(input.poll(Duration::from_millis(10)).unwrap(), None);
        assert_eq!(input.wait().unwrap(), GameInput::Exit);
        assert_eq!(input.remaining(), 0);
    }
}
