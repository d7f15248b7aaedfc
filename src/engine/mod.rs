mod clock;
mod difficulty;
mod direction;
mod food;
mod grid;
mod rules;
mod snake;
pub(crate) use self::clock::{ClockEvent, Scheduler, TimerQueue};
pub(crate) use self::difficulty::Difficulty;
pub(crate) use self::direction::Direction;
pub(crate) use self::food::{Food, FoodType};
pub(crate) use self::grid::{Cell, Grid};
pub(crate) use self::rules::Collision;
use self::clock::SimulationClock;
use self::food::spawn_food;
use self::rules::StepResult;
use self::snake::Snake;
use crate::consts;
use crate::store::KeyValueStore;
use crate::util::ErrorChain;
use rand::Rng;
use std::time::Duration;

/// A game of snake together with the high score carried across games.
///
/// All input arrives through [`initialize_game()`](Session::initialize_game),
/// [`set_direction()`](Session::set_direction),
/// [`toggle_pause()`](Session::toggle_pause), and
/// [`change_difficulty()`](Session::change_difficulty).  Time passes only
/// when the host calls [`advance_to()`](Session::advance_to).
#[derive(Clone, Debug)]
pub(crate) struct Session<S, K, R = rand::rngs::ThreadRng> {
    grid: Grid,
    scheduler: S,
    store: K,
    rng: R,
    clock: SimulationClock,
    difficulty: Difficulty,
    state: SessionState,
    snake: Snake,
    food: Food,
    score: u32,
    high_score: u32,
    elapsed_seconds: u32,
    collision: Option<Collision>,
}

impl<S: Scheduler, K: KeyValueStore, R: Rng> Session<S, K, R> {
    /// Create a session in the `Initializing` state, reading the high score
    /// from `store`.  No time passes until
    /// [`initialize_game()`](Session::initialize_game) is called.
    pub(crate) fn new(
        grid: Grid,
        difficulty: Difficulty,
        scheduler: S,
        store: K,
        mut rng: R,
    ) -> Session<S, K, R> {
        let high_score = load_high_score(&store);
        let snake = Snake::new(grid.center_cell(), Direction::Right);
        let food = spawn_food(&mut rng, &snake, grid)
            .expect("a one-segment snake should not fill the grid");
        Session {
            grid,
            scheduler,
            store,
            rng,
            clock: SimulationClock::default(),
            difficulty,
            state: SessionState::Initializing,
            snake,
            food,
            score: 0,
            high_score,
            elapsed_seconds: 0,
            collision: None,
        }
    }

    /// Start a new game, abandoning any game in progress
    pub(crate) fn initialize_game(&mut self) {
        self.snake = Snake::new(self.grid.center_cell(), Direction::Right);
        self.food = spawn_food(&mut self.rng, &self.snake, self.grid)
            .expect("a one-segment snake should not fill the grid");
        self.score = 0;
        self.elapsed_seconds = 0;
        self.collision = None;
        self.clock.start(&mut self.scheduler, self.difficulty.period());
        self.state = SessionState::Running;
        log::info!(
            "Starting new game on {} difficulty; food at {}",
            self.difficulty,
            self.food.cell
        );
    }

    /// Steer the snake.  Only has an effect while the game is running, and a
    /// direction straight back the way the snake is moving is ignored.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if self.state != SessionState::Running {
            log::debug!("Ignoring turn {direction:?} while {:?}", self.state);
        } else if !self.snake.turn(direction) {
            log::debug!(
                "Ignoring reversal {direction:?} while heading {:?}",
                self.snake.current_direction()
            );
        }
    }

    pub(crate) fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Running => {
                self.clock.suspend(&mut self.scheduler);
                self.state = SessionState::Paused;
                log::debug!("Game paused");
            }
            SessionState::Paused => {
                self.clock.resume(&mut self.scheduler);
                self.state = SessionState::Running;
                log::debug!("Game resumed");
            }
            SessionState::Initializing | SessionState::GameOver => {
                log::debug!("Ignoring pause toggle while {:?}", self.state);
            }
        }
    }

    /// Select a new difficulty.  If a game is underway, it is restarted at
    /// the new difficulty; otherwise the difficulty applies from the next
    /// game.
    pub(crate) fn change_difficulty(&mut self, difficulty: Difficulty) {
        log::info!("Difficulty changed from {} to {difficulty}", self.difficulty);
        self.difficulty = difficulty;
        if self.in_progress() {
            self.initialize_game();
        }
    }

    /// Deliver every clock event due at or before `now`, in order
    pub(crate) fn advance_to(&mut self, now: Duration) {
        while let Some(event) = self.scheduler.poll_due(now) {
            self.on_clock(event);
        }
    }

    /// Time at which the next clock event is due, if any
    pub(crate) fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            segments: self.snake.segments().iter().copied().collect(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            elapsed_seconds: self.elapsed_seconds,
            state: self.state,
            difficulty: self.difficulty,
            collision: self.collision,
        }
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    fn in_progress(&self) -> bool {
        self.state == SessionState::Running && self.snake.len() > 1
    }

    fn on_clock(&mut self, event: ClockEvent) {
        match event {
            ClockEvent::Tick => self.tick(),
            ClockEvent::Second => self.elapsed_seconds = self.elapsed_seconds.saturating_add(1),
        }
    }

    fn tick(&mut self) {
        match rules::step(&self.snake, &self.food, self.grid) {
            StepResult::Moved(snake) => self.snake = snake,
            StepResult::Ate { snake, points } => {
                self.snake = snake;
                self.score = self.score.saturating_add(points);
                log::debug!(
                    "Ate {} food at {} for {points} points; score is now {}",
                    self.food.kind,
                    self.food.cell,
                    self.score
                );
                if let Some(food) = spawn_food(&mut self.rng, &self.snake, self.grid) {
                    self.food = food;
                } else {
                    log::info!("Snake has filled the grid");
                    self.game_over(None);
                }
            }
            StepResult::Crashed(collision) => self.game_over(Some(collision)),
        }
    }

    fn game_over(&mut self, collision: Option<Collision>) {
        self.clock.stop(&mut self.scheduler);
        self.state = SessionState::GameOver;
        self.collision = collision;
        log::info!(
            "Game over ({collision:?}) with score {} and length {} after {}s",
            self.score,
            self.snake.len(),
            self.elapsed_seconds
        );
        if self.score > self.high_score {
            self.high_score = self.score;
            log::info!("New high score: {}", self.high_score);
            if let Err(e) = self
                .store
                .set(consts::HIGH_SCORE_KEY, self.high_score.to_string())
            {
                log::warn!("Could not save high score: {}", ErrorChain(&e));
            }
        }
    }
}

/// Read the stored high score, treating anything missing or unreadable as 0
fn load_high_score<K: KeyValueStore>(store: &K) -> u32 {
    match store.get(consts::HIGH_SCORE_KEY) {
        Ok(Some(value)) => value.trim().parse::<u32>().unwrap_or_else(|e| {
            log::warn!("Ignoring invalid stored high score {value:?}: {e}");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            log::warn!("Could not load high score: {}", ErrorChain(&e));
            0
        }
    }
}

/// The lifecycle state of a [`Session`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SessionState {
    /// No game has been started yet
    Initializing,
    Running,
    Paused,
    GameOver,
}

/// Everything the host needs in order to draw a [`Session`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) grid: Grid,

    /// The cells occupied by the snake, head first
    pub(crate) segments: Vec<Cell>,

    pub(crate) food: Food,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) elapsed_seconds: u32,
    pub(crate) state: SessionState,
    pub(crate) difficulty: Difficulty,

    /// What the snake hit, if the game ended in a crash
    pub(crate) collision: Option<Collision>,
}
