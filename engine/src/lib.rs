#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative snake state and the reactions that mutate it.
//!
//! [`SnakeEngine`] owns the body, the direction, the food position and the
//! pause flag. Each call to [`SnakeEngine::receive`] handles exactly one
//! inbound [`Message`] and pushes any resulting messages into the borrowed
//! display, food and score ports before returning.

use std::fmt;

use snake_core::{Cell, Coord, Direction, MapDimension, Message, MessageId, Port};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::body::Body;

mod body;
pub mod config;

pub use config::{ConfigError, EngineConfig};

/// Failures raised by the engine. Neither kind is recoverable in place.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The configuration string did not follow the expected grammar.
    #[error("bad configuration of snake engine: {0}")]
    Configuration(#[from] ConfigError),
    /// A message the engine does not handle was delivered to it.
    #[error("unexpected event received: {message_id}")]
    UnexpectedEvent {
        /// Tag of the offending message.
        message_id: MessageId,
    },
}

/// Reactive controller for a single snake.
pub struct SnakeEngine<'p> {
    display: &'p dyn Port,
    food: &'p dyn Port,
    score: &'p dyn Port,
    map: MapDimension,
    food_position: Coord,
    direction: Direction,
    body: Body,
    paused: bool,
}

impl<'p> SnakeEngine<'p> {
    /// Parses `config` and creates an engine wired to the provided ports.
    ///
    /// Nothing is sent on any port during construction.
    pub fn new(
        display: &'p dyn Port,
        food: &'p dyn Port,
        score: &'p dyn Port,
        config: &str,
    ) -> Result<Self, EngineError> {
        let config: EngineConfig = config.parse()?;
        Ok(Self::from_config(display, food, score, config))
    }

    /// Creates an engine from an already-parsed configuration.
    #[must_use]
    pub fn from_config(
        display: &'p dyn Port,
        food: &'p dyn Port,
        score: &'p dyn Port,
        config: EngineConfig,
    ) -> Self {
        debug!(config = %config, "snake engine configured");
        Self {
            display,
            food,
            score,
            map: config.map(),
            food_position: config.food(),
            direction: config.direction(),
            body: config.into_body(),
            paused: false,
        }
    }

    /// Handles a single inbound message.
    ///
    /// Outbound kinds (display updates, food requests, score and loss
    /// reports) are rejected with [`EngineError::UnexpectedEvent`].
    pub fn receive(&mut self, message: Message) -> Result<(), EngineError> {
        trace!(message_id = %message.message_id(), "message received");
        match message {
            Message::Timeout => self.advance(),
            Message::Direction { direction } => self.turn(direction),
            Message::FoodPlaced { position } => self.place_food(position),
            Message::FoodPlacementConfirmed { position } => self.confirm_food(position),
            Message::Pause => self.toggle_pause(),
            Message::Display { .. } | Message::FoodRequest | Message::Score | Message::Loss => {
                return Err(EngineError::UnexpectedEvent {
                    message_id: message.message_id(),
                });
            }
        }
        Ok(())
    }

    fn advance(&mut self) {
        if self.paused {
            return;
        }

        let new_head = self.body.head().step(self.direction);

        if self.occupies(new_head) || !self.map.contains(new_head) {
            info!(head = %new_head, length = self.body.len(), "snake collided");
            self.score.send(Message::Loss);
            return;
        }

        if new_head == self.food_position {
            info!(food = %new_head, length = self.body.len() + 1, "snake ate");
            self.score.send(Message::Score);
            self.food.send(Message::FoodRequest);
            self.body.grow_to(new_head);
        } else {
            let tail = self.body.move_to(new_head);
            debug!(head = %new_head, tail = %tail, "snake moved");
            self.show(tail, Cell::Free);
        }

        self.show(new_head, Cell::Snake);
    }

    fn turn(&mut self, direction: Direction) {
        if self.paused {
            return;
        }

        if self.direction.is_perpendicular_to(direction) {
            debug!(from = ?self.direction, to = ?direction, "direction changed");
            self.direction = direction;
        } else {
            debug!(current = ?self.direction, requested = ?direction, "turn ignored");
        }
    }

    fn place_food(&mut self, position: Coord) {
        if self.occupies(position) {
            self.reject_food(position);
        } else {
            self.show(self.food_position, Cell::Free);
            self.show(position, Cell::Food);
        }
        self.food_position = position;
    }

    fn confirm_food(&mut self, position: Coord) {
        // The previous food cell was consumed by the head, so it is not freed.
        if self.occupies(position) {
            self.reject_food(position);
        } else {
            self.show(position, Cell::Food);
        }
        self.food_position = position;
    }

    fn reject_food(&self, position: Coord) {
        warn!(food = %position, "food placed on the snake body, requesting another");
        self.food.send(Message::FoodRequest);
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
    }

    fn occupies(&self, cell: Coord) -> bool {
        self.body.contains(cell)
    }

    fn show(&self, position: Coord, cell: Cell) {
        self.display.send(Message::Display { position, cell });
    }
}

impl fmt::Debug for SnakeEngine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnakeEngine")
            .field("map", &self.map)
            .field("food_position", &self.food_position)
            .field("direction", &self.direction)
            .field("body", &self.body)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

/// Immutable copy of the engine state used for comparisons and reporting.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnakeSnapshot {
    /// Body cells ordered head first.
    pub segments: Vec<Coord>,
    /// Direction applied on the next tick.
    pub direction: Direction,
    /// Cell the engine believes holds food.
    pub food: Coord,
    /// Size of the playable map.
    pub map: MapDimension,
    /// Whether ticks and turns are currently dropped.
    pub paused: bool,
}

/// Query functions that provide read-only access to the engine state.
pub mod query {
    use snake_core::{Coord, Direction, MapDimension};

    use super::{SnakeEngine, SnakeSnapshot};

    /// Body cells ordered head first.
    pub fn segments<'a>(engine: &'a SnakeEngine<'_>) -> impl Iterator<Item = Coord> + 'a {
        engine.body.iter()
    }

    /// Cell occupied by the head.
    #[must_use]
    pub fn head(engine: &SnakeEngine<'_>) -> Coord {
        engine.body.head()
    }

    /// Number of segments in the body.
    #[must_use]
    pub fn length(engine: &SnakeEngine<'_>) -> usize {
        engine.body.len()
    }

    /// Direction applied on the next tick.
    #[must_use]
    pub fn direction(engine: &SnakeEngine<'_>) -> Direction {
        engine.direction
    }

    /// Cell the engine believes holds food.
    #[must_use]
    pub fn food_position(engine: &SnakeEngine<'_>) -> Coord {
        engine.food_position
    }

    /// Size of the playable map.
    #[must_use]
    pub fn map_dimension(engine: &SnakeEngine<'_>) -> MapDimension {
        engine.map
    }

    /// Reports whether the engine is paused.
    #[must_use]
    pub fn is_paused(engine: &SnakeEngine<'_>) -> bool {
        engine.paused
    }

    /// Captures the complete engine state.
    #[must_use]
    pub fn snapshot(engine: &SnakeEngine<'_>) -> SnakeSnapshot {
        SnakeSnapshot {
            segments: segments(engine).collect(),
            direction: engine.direction,
            food: engine.food_position,
            map: engine.map,
            paused: engine.paused,
        }
    }
}
