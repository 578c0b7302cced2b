//! Cross-snake collision resolution.
//!
//! Runs on post-move snapshots after every living snake has taken its step.
//! Wall and self collisions are already settled by the move itself; this
//! pass finds heads that landed on another living snake's body and heads
//! that share a cell.

use std::collections::{BTreeMap, HashMap};

use super::snake::CollisionType;
use super::state::{Position, SnakeView};

/// Indices of snakes that must die this tick, with the reason
pub type Deaths = BTreeMap<usize, CollisionType>;

pub fn resolve(snakes: &[SnakeView]) -> Deaths {
    let mut deaths = Deaths::new();
    body_collisions(snakes, &mut deaths);
    head_on_collisions(snakes, &mut deaths);
    deaths
}

fn living(snakes: &[SnakeView]) -> impl Iterator<Item = (usize, &SnakeView)> {
    snakes.iter().enumerate().filter(|(_, snake)| snake.alive)
}

/// A head on any non-head cell of another living snake is fatal. Bodies of
/// dead snakes are not obstacles.
fn body_collisions(snakes: &[SnakeView], deaths: &mut Deaths) {
    let mut owners: HashMap<Position, Vec<usize>> = HashMap::new();
    for (idx, snake) in living(snakes) {
        for &cell in snake.body_segments() {
            owners.entry(cell).or_default().push(idx);
        }
    }

    for (idx, snake) in living(snakes) {
        let hit_other = owners
            .get(&snake.head())
            .is_some_and(|cell_owners| cell_owners.iter().any(|&owner| owner != idx));
        if hit_other {
            deaths.entry(idx).or_insert(CollisionType::Body);
        }
    }
}

/// Heads sharing a cell: a unique top scorer survives, everyone else in the
/// group dies. If the top score is shared, the whole group dies.
fn head_on_collisions(snakes: &[SnakeView], deaths: &mut Deaths) {
    let mut heads: HashMap<Position, Vec<usize>> = HashMap::new();
    for (idx, snake) in living(snakes) {
        heads.entry(snake.head()).or_default().push(idx);
    }

    for group in heads.values().filter(|group| group.len() > 1) {
        let top = group
            .iter()
            .map(|&idx| snakes[idx].score)
            .max()
            .unwrap_or_default();
        let leaders: Vec<usize> = group
            .iter()
            .copied()
            .filter(|&idx| snakes[idx].score == top)
            .collect();
        let survivor = match leaders.as_slice() {
            [single] => Some(*single),
            _ => None,
        };

        for &idx in group {
            if Some(idx) != survivor {
                deaths.entry(idx).or_insert(CollisionType::HeadOn);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::state::Player;

    fn snake(player: Player, cells: &[(i32, i32)], score: u32) -> SnakeView {
        let body: Vec<Position> = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        SnakeView {
            player,
            length: body.len(),
            body,
            direction: Direction::Right,
            score,
            alive: true,
            death_time: None,
        }
    }

    #[test]
    fn test_no_contact_no_deaths() {
        let snakes = vec![
            snake(Player::One, &[(5, 5), (4, 5)], 0),
            snake(Player::Two, &[(10, 10), (11, 10)], 0),
        ];
        assert!(resolve(&snakes).is_empty());
    }

    #[test]
    fn test_head_on_equal_scores_kills_both() {
        let snakes = vec![
            snake(Player::One, &[(10, 10), (9, 10)], 5),
            snake(Player::Two, &[(10, 10), (11, 10)], 5),
        ];
        let deaths = resolve(&snakes);
        assert_eq!(deaths.get(&0), Some(&CollisionType::HeadOn));
        assert_eq!(deaths.get(&1), Some(&CollisionType::HeadOn));
    }

    #[test]
    fn test_head_on_higher_score_survives() {
        let snakes = vec![
            snake(Player::One, &[(10, 10), (9, 10)], 5),
            snake(Player::Two, &[(10, 10), (11, 10)], 3),
        ];
        let deaths = resolve(&snakes);
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths.get(&1), Some(&CollisionType::HeadOn));
    }

    #[test]
    fn test_three_way_tie_at_top_kills_everyone() {
        let snakes = vec![
            snake(Player::One, &[(10, 10), (9, 10)], 5),
            snake(Player::Two, &[(10, 10), (11, 10)], 5),
            snake(Player::Computer, &[(10, 10), (10, 11)], 3),
        ];
        assert_eq!(resolve(&snakes).len(), 3);
    }

    #[test]
    fn test_head_into_other_body() {
        let snakes = vec![
            snake(Player::One, &[(6, 5), (5, 5)], 9),
            snake(Player::Two, &[(7, 4), (7, 5), (6, 5)], 0),
        ];
        // Player two's tail is under player one's head
        let deaths = resolve(&snakes);
        assert_eq!(deaths.get(&0), Some(&CollisionType::Body));
        assert!(!deaths.contains_key(&1));
    }

    #[test]
    fn test_dead_body_is_not_an_obstacle() {
        let mut dead = snake(Player::Two, &[(7, 5), (6, 5), (5, 5)], 0);
        dead.alive = false;
        let snakes = vec![snake(Player::One, &[(6, 5), (6, 4)], 0), dead];

        assert!(resolve(&snakes).is_empty());
    }

    #[test]
    fn test_dead_head_does_not_count_for_head_on() {
        let mut dead = snake(Player::Two, &[(10, 10), (11, 10)], 9);
        dead.alive = false;
        let snakes = vec![snake(Player::One, &[(10, 10), (9, 10)], 0), dead];

        assert!(resolve(&snakes).is_empty());
    }

    #[test]
    fn test_body_cause_takes_precedence() {
        // Both heads meet on a third snake's body
        let snakes = vec![
            snake(Player::One, &[(5, 5), (4, 5)], 1),
            snake(Player::Two, &[(5, 5), (6, 5)], 0),
            snake(Player::Computer, &[(5, 4), (5, 5), (5, 6)], 0),
        ];
        let deaths = resolve(&snakes);
        assert_eq!(deaths.get(&0), Some(&CollisionType::Body));
        assert_eq!(deaths.get(&1), Some(&CollisionType::Body));
        assert!(!deaths.contains_key(&2));
    }
}
