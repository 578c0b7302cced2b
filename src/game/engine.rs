use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{
    action::{Direction, Turn},
    ai::GreedyPilot,
    collision,
    config::GameConfig,
    error::GameError,
    food::{Food, FoodKind, FoodSpawner},
    snake::{CollisionType, MoveOutcome, Snake},
    state::{GameMode, Player, Position, RoundSnapshot, SnakeView},
};

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// The lone snake of a single-player round died
    GameOver,
    Winner(Player),
    Draw,
}

/// Things that happened during a tick, for sound effects and bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    FoodEaten {
        player: Player,
        kind: FoodKind,
        delta: i32,
    },
    FoodExpired {
        position: Position,
        kind: FoodKind,
    },
    SnakeDied {
        player: Player,
        cause: CollisionType,
    },
    /// Emitted exactly once per round
    RoundEnded {
        outcome: RoundOutcome,
        message: String,
    },
}

/// The round controller: owns the snakes, the food and the simulated clock,
/// and advances everything one tick per call.
pub struct Game {
    config: GameConfig,
    spawner: FoodSpawner,
    rng: StdRng,
    mode: GameMode,
    snakes: Vec<Snake>,
    foods: Vec<Food>,
    active: bool,
    paused: bool,
    outcome: Option<RoundOutcome>,
    winner_message: String,
    clock: Duration,
    ticks: u64,
}

impl Game {
    /// Create an idle game; call [`Game::reset`] to start a round
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an idle game whose randomness is fully determined by `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        let spawner = FoodSpawner::new(&config)?;

        Ok(Self {
            config,
            spawner,
            rng,
            mode: GameMode::Single,
            snakes: Vec::new(),
            foods: Vec::new(),
            active: false,
            paused: false,
            outcome: None,
            winner_message: String::new(),
            clock: Duration::ZERO,
            ticks: 0,
        })
    }

    /// Start a fresh round in `mode`
    pub fn reset(&mut self, mode: GameMode) -> Result<(), GameError> {
        self.mode = mode;
        self.snakes = self.seat_snakes(mode);
        self.foods.clear();
        self.active = false;
        self.paused = false;
        self.outcome = None;
        self.winner_message.clear();
        self.clock = Duration::ZERO;
        self.ticks = 0;

        self.replenish_food()?;
        self.active = true;

        info!(%mode, snakes = self.snakes.len(), foods = self.foods.len(), "round started");
        Ok(())
    }

    fn seat_snakes(&self, mode: GameMode) -> Vec<Snake> {
        let seats: &[Player] = match mode {
            GameMode::Single => &[Player::One],
            GameMode::TwoPlayer => &[Player::One, Player::Two],
            GameMode::VersusAi => &[Player::One, Player::Computer],
        };

        seats
            .iter()
            .map(|&player| {
                let (head, direction) = self.config.start_for(player);
                let snake = Snake::new(player, head, direction, self.config.initial_snake_length);
                match player {
                    Player::Computer => snake.with_pilot(Arc::new(GreedyPilot::new())),
                    Player::One | Player::Two => snake,
                }
            })
            .collect()
    }

    /// Steer a human seat. Ignored while the round is inactive or paused, for
    /// seats that are not in play, and for computer-driven snakes.
    pub fn turn(&mut self, player: Player, direction: Direction) {
        if !self.active || self.paused {
            return;
        }

        if let Some(snake) = self
            .snakes
            .iter_mut()
            .find(|snake| snake.player == player && snake.pilot().is_none())
        {
            snake.turn(direction);
        }
    }

    pub fn apply(&mut self, turn: Turn) {
        self.turn(turn.player, turn.direction);
    }

    /// Flip the pause flag of an active round; returns the new value
    pub fn toggle_pause(&mut self) -> bool {
        if self.active {
            self.paused = !self.paused;
            debug!(paused = self.paused, "pause toggled");
        }
        self.paused
    }

    /// Advance the round by one step. Does nothing while inactive or paused.
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();
        if !self.active || self.paused {
            return Ok(events);
        }

        self.clock += self.config.tick_interval();
        self.ticks += 1;

        self.steer_computers();
        self.move_snakes(&mut events);
        self.resolve_collisions(&mut events);

        if !self.active {
            return Ok(events);
        }

        self.eat_food(&mut events)?;
        self.expire_food(&mut events)?;

        Ok(events)
    }

    /// Every computer pilot picks a heading from the same pre-move snapshot
    fn steer_computers(&mut self) {
        let grid = self.config.grid();
        let views: Vec<SnakeView> = self.snakes.iter().map(Snake::view).collect();

        for (idx, snake) in self.snakes.iter_mut().enumerate() {
            if snake.is_dead {
                continue;
            }
            let Some(pilot) = snake.pilot().cloned() else {
                continue;
            };
            snake.direction =
                pilot.decide_direction(&views[idx], &self.foods, &views, grid, &mut self.rng);
        }
    }

    fn move_snakes(&mut self, events: &mut Vec<GameEvent>) {
        let grid = self.config.grid();
        let now = self.clock;

        for snake in self.snakes.iter_mut().filter(|snake| snake.is_alive()) {
            if let MoveOutcome::Blocked(cause) = snake.try_move(grid) {
                snake.die(now);
                info!(player = ?snake.player, ?cause, score = snake.score, "snake died");
                events.push(GameEvent::SnakeDied {
                    player: snake.player,
                    cause,
                });
            }
        }
    }

    fn resolve_collisions(&mut self, events: &mut Vec<GameEvent>) {
        if self.mode == GameMode::VersusAi && self.human_is_dead() {
            self.end_round(RoundOutcome::Winner(Player::Computer), events);
            return;
        }

        let views: Vec<SnakeView> = self.snakes.iter().map(Snake::view).collect();
        for (idx, cause) in collision::resolve(&views) {
            let snake = &mut self.snakes[idx];
            snake.die(self.clock);
            info!(player = ?snake.player, ?cause, score = snake.score, "snake died");
            events.push(GameEvent::SnakeDied {
                player: snake.player,
                cause,
            });
        }

        if let Some(outcome) = self.evaluate_outcome() {
            self.end_round(outcome, events);
        }
    }

    fn human_is_dead(&self) -> bool {
        self.snakes
            .iter()
            .any(|snake| snake.player.is_human() && snake.is_dead)
    }

    fn find(&self, player: Player) -> Option<&Snake> {
        self.snakes.iter().find(|snake| snake.player == player)
    }

    /// Decide whether the round is over after this tick's deaths
    fn evaluate_outcome(&self) -> Option<RoundOutcome> {
        match self.mode {
            GameMode::Single => self
                .snakes
                .iter()
                .all(|snake| snake.is_dead)
                .then_some(RoundOutcome::GameOver),
            GameMode::TwoPlayer => {
                let alive: Vec<&Snake> = self.snakes.iter().filter(|s| s.is_alive()).collect();
                match alive.as_slice() {
                    [] => Some(self.settle(Player::One, Player::Two)),
                    [survivor] => Some(RoundOutcome::Winner(survivor.player)),
                    _ => None,
                }
            }
            GameMode::VersusAi => {
                let human = self.find(Player::One).map(Snake::is_alive);
                let computer = self.find(Player::Computer).map(Snake::is_alive);
                match (human, computer) {
                    (Some(true), Some(false)) => Some(RoundOutcome::Winner(Player::One)),
                    (Some(false), Some(true)) => Some(RoundOutcome::Winner(Player::Computer)),
                    (Some(false), Some(false)) => Some(self.settle(Player::One, Player::Computer)),
                    _ => None,
                }
            }
        }
    }

    /// Both snakes are dead: higher score wins, then the later death, else a draw
    fn settle(&self, first: Player, second: Player) -> RoundOutcome {
        let (Some(a), Some(b)) = (self.find(first), self.find(second)) else {
            return RoundOutcome::Draw;
        };
        let died = |snake: &Snake| snake.death_time.unwrap_or(Duration::MAX);

        match a.score.cmp(&b.score).then_with(|| died(a).cmp(&died(b))) {
            Ordering::Greater => RoundOutcome::Winner(first),
            Ordering::Less => RoundOutcome::Winner(second),
            Ordering::Equal => RoundOutcome::Draw,
        }
    }

    /// One-shot transition to the finished state
    fn end_round(&mut self, outcome: RoundOutcome, events: &mut Vec<GameEvent>) {
        if !self.active {
            return;
        }

        self.active = false;
        self.paused = false;
        self.outcome = Some(outcome);
        self.winner_message = self.message_for(outcome);

        info!(
            mode = %self.mode,
            ticks = self.ticks,
            message = %self.winner_message,
            "round ended"
        );
        events.push(GameEvent::RoundEnded {
            outcome,
            message: self.winner_message.clone(),
        });
    }

    pub fn message_for(&self, outcome: RoundOutcome) -> String {
        let labels = &self.config.labels;
        match outcome {
            RoundOutcome::GameOver => labels.game_over.clone(),
            RoundOutcome::Draw => labels.draw.clone(),
            RoundOutcome::Winner(player) => format!("{} wins", self.label_for(player)),
        }
    }

    /// Display name for a seat in the current mode
    pub fn label_for(&self, player: Player) -> &str {
        let labels = &self.config.labels;
        match (self.mode, player) {
            (GameMode::Single, _) => &labels.solo,
            (GameMode::VersusAi, Player::One) => &labels.human,
            (_, Player::One) => &labels.player_one,
            (_, Player::Two) => &labels.player_two,
            (_, Player::Computer) => &labels.computer,
        }
    }

    fn eat_food(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let mut eaten = Vec::new();

        for (idx, food) in self.foods.iter().enumerate() {
            // First living snake on the cell gets it
            let Some(snake) = self
                .snakes
                .iter_mut()
                .find(|snake| snake.is_alive() && snake.head() == food.position)
            else {
                continue;
            };

            snake.grow(food.score);
            debug!(player = ?snake.player, kind = ?food.kind, score = snake.score, "food eaten");
            events.push(GameEvent::FoodEaten {
                player: snake.player,
                kind: food.kind,
                delta: food.score,
            });
            eaten.push(idx);
        }

        if eaten.is_empty() {
            return Ok(());
        }

        let mut idx = 0;
        self.foods.retain(|_| {
            let keep = !eaten.contains(&idx);
            idx += 1;
            keep
        });
        self.replenish_food()
    }

    fn expire_food(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let now = self.clock;
        let timeout = self.config.food_timeout();
        let before = self.foods.len();

        self.foods.retain(|food| {
            if food.is_timed_out(now, timeout) {
                debug!(position = ?food.position, kind = ?food.kind, "food expired");
                events.push(GameEvent::FoodExpired {
                    position: food.position,
                    kind: food.kind,
                });
                false
            } else {
                true
            }
        });

        if self.foods.len() == before {
            return Ok(());
        }
        self.replenish_food()
    }

    /// Every cell covered by a snake or a food item
    fn occupied_cells(&self) -> HashSet<Position> {
        self.snakes
            .iter()
            .flat_map(|snake| snake.body.iter().copied())
            .chain(self.foods.iter().map(|food| food.position))
            .collect()
    }

    /// Spawn food until the mode's cap is reached
    fn replenish_food(&mut self) -> Result<(), GameError> {
        let mut occupied = self.occupied_cells();
        let cap = self.config.food_cap(self.mode);
        self.spawner
            .fill_to(&mut self.foods, &mut occupied, cap, self.clock, &mut self.rng)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let timeout = self.config.food_timeout();
        RoundSnapshot {
            mode: self.mode,
            grid: self.config.grid(),
            active: self.active,
            paused: self.paused,
            winner_message: self.winner_message.clone(),
            ticks: self.ticks,
            snakes: self.snakes.iter().map(Snake::view).collect(),
            foods: self
                .foods
                .iter()
                .map(|food| food.view(self.clock, timeout))
                .collect(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn winner_message(&self) -> &str {
        &self.winner_message
    }

    /// Simulated time since the round started
    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::FoodSpec;

    fn game(mode: GameMode) -> Game {
        let mut game = Game::with_seed(GameConfig::default(), 42).unwrap();
        game.reset(mode).unwrap();
        game
    }

    /// A round with no food on the board, so nothing but movement happens
    fn bare_game(mode: GameMode) -> Game {
        let mut game = game(mode);
        game.foods.clear();
        game
    }

    fn round_ends(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, GameEvent::RoundEnded { .. }))
            .count()
    }

    #[test]
    fn test_new_game_is_idle() {
        let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
        assert!(!game.is_active());
        assert!(game.tick().unwrap().is_empty());
        assert_eq!(game.now(), Duration::ZERO);
        assert_eq!(game.ticks(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig::new(2, 2);
        assert!(matches!(
            Game::new(config),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_reset_seats_snakes_per_mode() {
        let single = game(GameMode::Single);
        assert_eq!(single.snakes().len(), 1);
        assert_eq!(single.foods().len(), 2);
        assert!(single.is_active());

        let two = game(GameMode::TwoPlayer);
        let players: Vec<_> = two.snakes().iter().map(|s| s.player).collect();
        assert_eq!(players, vec![Player::One, Player::Two]);
        assert_eq!(two.foods().len(), 5);
        assert!(two.snakes().iter().all(|s| s.pilot().is_none()));

        let vs = game(GameMode::VersusAi);
        assert_eq!(vs.snakes()[1].player, Player::Computer);
        assert!(vs.snakes()[1].pilot().is_some());
        assert!(vs.snakes()[0].pilot().is_none());
    }

    #[test]
    fn test_initial_food_avoids_snakes() {
        let game = game(GameMode::TwoPlayer);
        let snake_cells: HashSet<_> = game
            .snakes()
            .iter()
            .flat_map(|s| s.body.iter().copied())
            .collect();
        let food_cells: HashSet<_> = game.foods().iter().map(|f| f.position).collect();

        assert_eq!(food_cells.len(), game.foods().len());
        assert!(food_cells.is_disjoint(&snake_cells));
    }

    #[test]
    fn test_reset_clears_previous_round() {
        let mut game = bare_game(GameMode::Single);
        for _ in 0..20 {
            game.tick().unwrap();
        }
        assert!(!game.is_active());

        game.reset(GameMode::TwoPlayer).unwrap();
        assert!(game.is_active());
        assert!(game.winner_message().is_empty());
        assert_eq!(game.outcome(), None);
        assert_eq!(game.now(), Duration::ZERO);
        assert_eq!(game.snakes().len(), 2);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = bare_game(GameMode::Single);
        assert!(game.toggle_pause());
        let head = game.snakes()[0].head();

        for _ in 0..5 {
            assert!(game.tick().unwrap().is_empty());
        }
        assert_eq!(game.snakes()[0].head(), head);
        assert_eq!(game.now(), Duration::ZERO);

        // Turns are dropped while paused
        game.turn(Player::One, Direction::Up);
        assert_eq!(game.snakes()[0].direction, Direction::Right);

        assert!(!game.toggle_pause());
        game.tick().unwrap();
        assert_eq!(game.snakes()[0].head(), Position::new(6, 10));
    }

    #[test]
    fn test_pause_ignored_when_inactive() {
        let mut game = Game::with_seed(GameConfig::default(), 3).unwrap();
        assert!(!game.toggle_pause());
        assert!(!game.is_paused());
    }

    #[test]
    fn test_turn_takes_effect_on_next_tick() {
        let mut game = bare_game(GameMode::TwoPlayer);
        game.turn(Player::One, Direction::Up);
        game.turn(Player::Two, Direction::Down);
        game.tick().unwrap();

        assert_eq!(game.snakes()[0].head(), Position::new(5, 9));
        assert_eq!(game.snakes()[1].head(), Position::new(15, 11));
    }

    #[test]
    fn test_turn_ignored_for_computer_and_absent_seats() {
        let mut game = bare_game(GameMode::VersusAi);
        let before = game.snakes()[1].direction;
        game.turn(Player::Computer, before.opposite());
        game.turn(Player::Two, Direction::Up);
        assert_eq!(game.snakes()[1].direction, before);
    }

    #[test]
    fn test_wall_collision_ends_single_round_once() {
        let mut game = bare_game(GameMode::Single);
        let mut ends = 0;

        for tick in 1..=14 {
            let events = game.tick().unwrap();
            ends += round_ends(&events);
            assert!(game.is_active(), "round ended early on tick {tick}");
        }
        assert_eq!(game.snakes()[0].head(), Position::new(19, 10));

        let events = game.tick().unwrap();
        ends += round_ends(&events);
        assert!(events.contains(&GameEvent::SnakeDied {
            player: Player::One,
            cause: CollisionType::Wall,
        }));
        assert!(!game.is_active());
        assert_eq!(game.winner_message(), "Game Over");
        assert_eq!(game.outcome(), Some(RoundOutcome::GameOver));

        for _ in 0..5 {
            ends += round_ends(&game.tick().unwrap());
        }
        assert_eq!(ends, 1);
    }

    #[test]
    fn test_head_on_equal_scores_is_a_draw() {
        let mut game = bare_game(GameMode::TwoPlayer);
        let mut events = Vec::new();
        // Heads start ten cells apart on the same row and meet after five ticks
        for _ in 0..5 {
            events.extend(game.tick().unwrap());
        }

        assert!(!game.is_active());
        assert!(game.snakes().iter().all(|s| s.is_dead));
        assert_eq!(game.snakes()[0].death_time, game.snakes()[1].death_time);
        assert_eq!(game.winner_message(), "draw");
        assert_eq!(round_ends(&events), 1);
    }

    #[test]
    fn test_head_on_higher_score_wins() {
        let mut game = bare_game(GameMode::TwoPlayer);
        game.snakes[0].score = 5;
        game.snakes[1].score = 3;
        for _ in 0..5 {
            game.tick().unwrap();
        }

        assert!(game.snakes()[0].is_alive());
        assert!(game.snakes()[1].is_dead);
        assert_eq!(game.outcome(), Some(RoundOutcome::Winner(Player::One)));
        assert_eq!(game.winner_message(), "player 1 wins");
    }

    #[test]
    fn test_both_dead_higher_score_wins() {
        let mut game = bare_game(GameMode::TwoPlayer);
        game.snakes[1].score = 4;
        game.snakes[0].turn(Direction::Up);
        game.snakes[1].turn(Direction::Up);
        // Both run into the top wall on the same tick
        for _ in 0..11 {
            game.tick().unwrap();
        }

        assert!(!game.is_active());
        assert_eq!(game.winner_message(), "player 2 wins");
    }

    #[test]
    fn test_equal_scores_later_death_wins() {
        let mut game = bare_game(GameMode::TwoPlayer);
        // Player two dies first, player one a tick later
        game.snakes[1].die(Duration::from_millis(100));
        game.snakes[0].die(Duration::from_millis(200));
        assert_eq!(
            game.evaluate_outcome(),
            Some(RoundOutcome::Winner(Player::One))
        );

        game.snakes[1].death_time = Some(Duration::from_millis(300));
        assert_eq!(
            game.evaluate_outcome(),
            Some(RoundOutcome::Winner(Player::Two))
        );

        game.snakes[1].death_time = Some(Duration::from_millis(200));
        assert_eq!(game.evaluate_outcome(), Some(RoundOutcome::Draw));
    }

    #[test]
    fn test_last_snake_standing_wins() {
        let mut game = bare_game(GameMode::TwoPlayer);
        game.snakes[1].turn(Direction::Down);
        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(game.tick().unwrap());
            if !game.is_active() {
                break;
            }
        }

        // Player two reaches the bottom wall on tick ten
        assert_eq!(game.ticks(), 10);
        assert_eq!(game.outcome(), Some(RoundOutcome::Winner(Player::One)));
        assert!(events.contains(&GameEvent::SnakeDied {
            player: Player::Two,
            cause: CollisionType::Wall,
        }));
    }

    #[test]
    fn test_dead_human_means_computer_wins() {
        let mut game = bare_game(GameMode::VersusAi);
        game.snakes[0].is_dead = true;

        let events = game.tick().unwrap();
        assert!(game.snakes()[1].is_alive());
        assert!(!game.is_active());
        assert_eq!(game.winner_message(), "computer wins");
        assert_eq!(round_ends(&events), 1);
    }

    #[test]
    fn test_dead_computer_means_player_wins() {
        let mut game = bare_game(GameMode::VersusAi);
        game.snakes[1].die(Duration::ZERO);

        game.tick().unwrap();
        assert_eq!(game.outcome(), Some(RoundOutcome::Winner(Player::One)));
        assert_eq!(game.winner_message(), "player wins");
    }

    #[test]
    fn test_versus_both_dead_uses_scores() {
        let mut game = bare_game(GameMode::VersusAi);
        game.snakes[0].score = 1;
        game.snakes[1].score = 2;
        game.snakes[0].die(Duration::from_millis(100));
        game.snakes[1].die(Duration::from_millis(100));
        assert_eq!(
            game.evaluate_outcome(),
            Some(RoundOutcome::Winner(Player::Computer))
        );
    }

    #[test]
    fn test_computer_steers_toward_food() {
        let mut game = bare_game(GameMode::VersusAi);
        // Computer starts at (15, 10) facing left
        game.foods.push(Food::new(
            Position::new(15, 4),
            &FoodSpec::new(FoodKind::Normal, 1, 1.0),
            Duration::ZERO,
        ));

        game.tick().unwrap();
        assert_eq!(game.snakes()[1].direction, Direction::Up);
        assert_eq!(game.snakes()[1].head(), Position::new(15, 9));
    }

    #[test]
    fn test_eating_grows_and_replenishes() {
        let mut game = bare_game(GameMode::Single);
        game.foods.push(Food::new(
            Position::new(6, 10),
            &FoodSpec::new(FoodKind::Bonus, 5, 1.0),
            Duration::ZERO,
        ));

        let events = game.tick().unwrap();
        assert!(events.contains(&GameEvent::FoodEaten {
            player: Player::One,
            kind: FoodKind::Bonus,
            delta: 5,
        }));

        let snake = &game.snakes()[0];
        assert_eq!(snake.score, 5);
        assert_eq!(snake.length, 6);
        assert_eq!(game.foods().len(), 2);
        assert!(game
            .foods()
            .iter()
            .all(|f| f.position != snake.head() && f.created_at == game.now()));

        game.foods.clear();
        for _ in 0..5 {
            game.tick().unwrap();
        }
        assert_eq!(game.snakes()[0].len(), 6);
    }

    #[test]
    fn test_poison_shrinks_immediately() {
        let mut game = bare_game(GameMode::Single);
        game.snakes[0].score = 1;
        game.snakes[0].grow(3);
        for _ in 0..3 {
            game.tick().unwrap();
        }
        assert_eq!(game.snakes()[0].len(), 4);

        let ahead = game.snakes()[0].next_head();
        game.foods.push(Food::new(
            ahead,
            &FoodSpec::new(FoodKind::Hazard, -3, 1.0),
            game.now(),
        ));
        game.tick().unwrap();

        let snake = &game.snakes()[0];
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.length, 1);
        assert_eq!(snake.score, 1);
    }

    #[test]
    fn test_food_expires_after_timeout() {
        let mut game = Game::with_seed(GameConfig::new(300, 20), 7).unwrap();
        game.reset(GameMode::Single).unwrap();
        game.foods.clear();
        let marked = Position::new(0, 0);
        game.foods.push(Food::new(
            marked,
            &FoodSpec::new(FoodKind::Normal, 1, 1.0),
            game.now(),
        ));

        for _ in 0..99 {
            game.tick().unwrap();
        }
        assert!(game.foods().iter().any(|f| f.position == marked));

        let events = game.tick().unwrap();
        assert!(events.contains(&GameEvent::FoodExpired {
            position: marked,
            kind: FoodKind::Normal,
        }));
        assert!(game.foods().iter().all(|f| f.created_at == game.now()));
        assert_eq!(game.foods().len(), 2);
    }

    #[test]
    fn test_no_room_for_food_is_an_error() {
        let mut config = GameConfig::new(4, 4);
        config.max_food_single = 16;
        let mut game = Game::with_seed(config, 11).unwrap();

        assert_eq!(
            game.reset(GameMode::Single),
            Err(GameError::NoFreeCell {
                width: 4,
                height: 4
            })
        );
    }

    #[test]
    fn test_labels_follow_mode() {
        let single = game(GameMode::Single);
        assert_eq!(single.label_for(Player::One), "score");

        let two = game(GameMode::TwoPlayer);
        assert_eq!(two.label_for(Player::One), "player 1");
        assert_eq!(two.label_for(Player::Two), "player 2");

        let vs = game(GameMode::VersusAi);
        assert_eq!(vs.label_for(Player::One), "player");
        assert_eq!(vs.label_for(Player::Computer), "computer");
        assert_eq!(vs.message_for(RoundOutcome::Draw), "draw");
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = game(GameMode::VersusAi);
        game.tick().unwrap();
        let snapshot = game.snapshot();

        assert_eq!(snapshot.mode, GameMode::VersusAi);
        assert!(snapshot.active);
        assert_eq!(snapshot.ticks, 1);
        assert_eq!(snapshot.snakes.len(), 2);
        assert_eq!(snapshot.foods.len(), game.foods().len());
        assert!(snapshot
            .foods
            .iter()
            .all(|f| (0.0..=1.0).contains(&f.remaining)));
    }
}
