use std::time::{Duration, Instant};

use crate::config::{
    BASE_SPEED_SECS, COLLISION_RADIUS, GRID_STEP, INITIAL_SNAKE_LENGTH, PLAYFIELD_HALF_EXTENT,
};
use crate::input::{direction_change_is_valid, Direction};

/// Point on the playfield plane; `+y` points up.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Returns true when `other` is closer than the collision radius.
    #[must_use]
    pub fn touches(self, other: Self) -> bool {
        self.distance(other) < COLLISION_RADIUS
    }

    /// Returns true when the position lies on or inside the playfield walls.
    #[must_use]
    pub fn is_within_playfield(self) -> bool {
        self.x.abs() <= PLAYFIELD_HALF_EXTENT && self.y.abs() <= PLAYFIELD_HALF_EXTENT
    }

    /// Returns the neighbouring position one grid step away in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y + GRID_STEP),
            Direction::Down => Self::new(self.x, self.y - GRID_STEP),
            Direction::Left => Self::new(self.x - GRID_STEP, self.y),
            Direction::Right => Self::new(self.x + GRID_STEP, self.y),
        }
    }
}

/// Color classification of a segment, resolved to a concrete color by the renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SegmentShade {
    Head,
    BodyDark,
    BodyLight,
}

/// Segment positions, heading and pace of the snake.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: Vec<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    speed_secs: f64,
    speed_expiry: Option<Instant>,
}

impl Snake {
    /// Creates the starting snake: three segments trailing left of the origin, heading right.
    #[must_use]
    pub fn new() -> Self {
        let segments = (0..INITIAL_SNAKE_LENGTH)
            .map(|index| Position::new(-GRID_STEP * index as i32, 0))
            .collect();

        Self::from_segments(segments, Direction::Right)
    }

    /// Creates a snake from explicit segments (first is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");

        Self {
            segments,
            direction,
            pending_direction: None,
            speed_secs: BASE_SPEED_SECS,
            speed_expiry: None,
        }
    }

    /// Latches a turn for the next move. A reversal of the current heading is ignored.
    pub fn turn(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Appends a segment on top of the tail; it separates once the snake moves.
    pub fn add_segment(&mut self) {
        let tail = self.tail();
        self.segments.push(tail);
    }

    /// Drops the tail segment. Returns false when only the head is left.
    pub fn remove_tail_segment(&mut self) -> bool {
        if self.segments.len() <= 1 {
            return false;
        }

        self.segments.pop();
        true
    }

    /// Advances one tick: applies the latched turn, restores the base speed when
    /// a timed effect has run out, then moves every segment onto its predecessor
    /// and steps the head.
    pub fn move_forward(&mut self, now: Instant) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        if self.speed_expiry.is_some_and(|expiry| now >= expiry) {
            log::debug!("timed speed effect expired; speed back to {BASE_SPEED_SECS}s");
            self.speed_secs = BASE_SPEED_SECS;
            self.speed_expiry = None;
        }

        for index in (1..self.segments.len()).rev() {
            self.segments[index] = self.segments[index - 1];
        }
        self.segments[0] = self.segments[0].stepped(self.direction);
    }

    /// Returns true when the head has crossed a wall.
    #[must_use]
    pub fn check_wall_collision(&self) -> bool {
        !self.head().is_within_playfield()
    }

    /// Returns true when the head touches any other segment.
    #[must_use]
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.segments
            .iter()
            .skip(1)
            .any(|segment| head.touches(*segment))
    }

    /// Scales the tick duration by `factor`, never going below `floor`.
    pub fn scale_speed(&mut self, factor: f64, floor: f64) {
        self.speed_secs = (self.speed_secs * factor).max(floor);
    }

    /// Schedules the speed to reset to base at `expiry`.
    pub fn expire_speed_at(&mut self, expiry: Instant) {
        self.speed_expiry = Some(expiry);
    }

    /// Seconds per tick.
    #[must_use]
    pub fn speed_secs(&self) -> f64 {
        self.speed_secs
    }

    /// Seconds per tick as a duration.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.speed_secs)
    }

    /// When the current timed speed effect runs out, if any.
    #[must_use]
    pub fn speed_expiry(&self) -> Option<Instant> {
        self.speed_expiry
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Returns the last segment position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true when the snake has no segments, which the constructors prevent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.segments.iter()
    }

    /// Color class of the segment at `index`; body shades alternate.
    #[must_use]
    pub fn segment_shade(index: usize) -> SegmentShade {
        match index {
            0 => SegmentShade::Head,
            i if i % 2 == 0 => SegmentShade::BodyDark,
            _ => SegmentShade::BodyLight,
        }
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::BASE_SPEED_SECS;
    use crate::input::Direction;

    use super::{Position, SegmentShade, Snake};

    #[test]
    fn new_snake_has_three_segments_heading_right() {
        let snake = Snake::new();

        let segments: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position::new(0, 0),
                Position::new(-20, 0),
                Position::new(-40, 0),
            ]
        );
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.speed_secs(), BASE_SPEED_SECS);
    }

    #[test]
    fn segments_follow_the_leader() {
        let mut snake = Snake::new();

        snake.move_forward(Instant::now());

        let segments: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position::new(20, 0),
                Position::new(0, 0),
                Position::new(-20, 0),
            ]
        );
    }

    #[test]
    fn up_increases_y() {
        let mut snake = Snake::from_segments(vec![Position::new(0, 0)], Direction::Right);

        snake.turn(Direction::Up);
        snake.move_forward(Instant::now());

        assert_eq!(snake.head(), Position::new(0, 20));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut snake = Snake::new();

        snake.turn(Direction::Left);
        snake.move_forward(Instant::now());

        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Position::new(20, 0));
    }

    #[test]
    fn last_turn_before_tick_wins() {
        let mut snake = Snake::new();

        snake.turn(Direction::Up);
        snake.turn(Direction::Down);
        snake.move_forward(Instant::now());

        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.head(), Position::new(20, -20));
    }

    #[test]
    fn added_segment_overlaps_tail_until_next_move() {
        let mut snake = Snake::new();

        snake.add_segment();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(-40, 0));

        snake.move_forward(Instant::now());
        let segments: Vec<_> = snake.segments().copied().collect();
        assert_eq!(segments[2], Position::new(-20, 0));
        assert_eq!(segments[3], Position::new(-40, 0));
    }

    #[test]
    fn tail_removal_keeps_the_head() {
        let mut snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(-20, 0)],
            Direction::Right,
        );

        assert!(snake.remove_tail_segment());
        assert!(!snake.remove_tail_segment());
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(0, 0));
    }

    #[test]
    fn wall_collision_starts_past_half_extent() {
        let inside = Snake::from_segments(vec![Position::new(280, -280)], Direction::Right);
        let edge = Snake::from_segments(vec![Position::new(290, 0)], Direction::Right);
        let outside = Snake::from_segments(vec![Position::new(300, 0)], Direction::Right);
        let below = Snake::from_segments(vec![Position::new(0, -300)], Direction::Down);

        assert!(!inside.check_wall_collision());
        assert!(!edge.check_wall_collision());
        assert!(outside.check_wall_collision());
        assert!(below.check_wall_collision());
    }

    #[test]
    fn adjacent_segments_do_not_count_as_self_collision() {
        let snake = Snake::new();

        assert!(!snake.check_self_collision());
    }

    #[test]
    fn head_on_body_is_self_collision() {
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(20, 0),
                Position::new(20, 20),
                Position::new(0, 20),
                Position::new(-10, 5),
            ],
            Direction::Down,
        );

        assert!(snake.check_self_collision());
    }

    #[test]
    fn speed_resets_on_first_move_at_or_after_expiry() {
        let start = Instant::now();
        let mut snake = Snake::new();
        snake.scale_speed(1.5, 0.05);
        snake.expire_speed_at(start + Duration::from_secs(5));

        snake.move_forward(start + Duration::from_secs(4));
        assert!((snake.speed_secs() - 0.15).abs() < 1e-9);

        snake.move_forward(start + Duration::from_secs(5));
        assert_eq!(snake.speed_secs(), BASE_SPEED_SECS);
        assert_eq!(snake.speed_expiry(), None);
    }

    #[test]
    fn speed_scaling_respects_floor() {
        let mut snake = Snake::new();

        for _ in 0..20 {
            snake.scale_speed(0.7, 0.01);
        }

        assert_eq!(snake.speed_secs(), 0.01);
    }

    #[test]
    fn body_shades_alternate_after_head() {
        assert_eq!(Snake::segment_shade(0), SegmentShade::Head);
        assert_eq!(Snake::segment_shade(1), SegmentShade::BodyLight);
        assert_eq!(Snake::segment_shade(2), SegmentShade::BodyDark);
        assert_eq!(Snake::segment_shade(3), SegmentShade::BodyLight);
    }
}
