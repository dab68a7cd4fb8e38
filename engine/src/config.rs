//! Parser for the textual engine configuration.
//!
//! The grammar is a fixed sequence of whitespace-separated tokens:
//!
//! ```text
//! W <width> <height> F <food x> <food y> S <U|D|L|R> <length> (<x> <y>){length}
//! ```
//!
//! Segments are listed head first. Nothing is range-checked: placing the
//! body or the food inside the map is the caller's responsibility.

use std::{fmt, str::FromStr, str::SplitWhitespace};

use snake_core::{Coord, Direction, MapDimension};
use thiserror::Error;

use crate::body::Body;

const MAP_TAG: char = 'W';
const FOOD_TAG: char = 'F';
const SNAKE_TAG: char = 'S';

/// Reasons a configuration string may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The string ended before the named token.
    #[error("configuration ended before the {expected}")]
    MissingToken {
        /// Description of the token that was expected next.
        expected: &'static str,
    },
    /// A literal section tag did not match the grammar.
    #[error("expected section tag '{expected}' but found '{found}'")]
    UnexpectedTag {
        /// Tag required at this position.
        expected: char,
        /// Token found instead.
        found: String,
    },
    /// The direction token is not one of `U`, `D`, `L` or `R`.
    #[error("direction '{found}' is not one of U, D, L or R")]
    InvalidDirection {
        /// Token found instead of a direction.
        found: String,
    },
    /// A numeric field could not be parsed.
    #[error("could not parse {field} from '{token}'")]
    InvalidNumber {
        /// Name of the numeric field.
        field: &'static str,
        /// Token that failed to parse.
        token: String,
    },
    /// The snake was configured without any segments.
    #[error("snake must have at least one segment")]
    EmptyBody,
}

/// Initial facts the engine is constructed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    map: MapDimension,
    food: Coord,
    direction: Direction,
    body: Body,
}

impl EngineConfig {
    /// Creates a configuration from already-parsed parts.
    ///
    /// `segments` are ordered head first and must not be empty.
    pub fn new(
        map: MapDimension,
        food: Coord,
        direction: Direction,
        segments: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, ConfigError> {
        let body = Body::from_segments(segments).ok_or(ConfigError::EmptyBody)?;

        Ok(Self {
            map,
            food,
            direction,
            body,
        })
    }

    /// Size of the playable map.
    #[must_use]
    pub const fn map(&self) -> MapDimension {
        self.map
    }

    /// Cell initially holding food.
    #[must_use]
    pub const fn food(&self) -> Coord {
        self.food
    }

    /// Direction the snake initially moves in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Initial body, head first.
    pub fn segments(&self) -> impl Iterator<Item = Coord> + '_ {
        self.body.iter()
    }

    pub(crate) fn into_body(self) -> Body {
        self.body
    }
}

impl FromStr for EngineConfig {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(value);

        tokens.tag(MAP_TAG)?;
        let width = tokens.number("map width")?;
        let height = tokens.number("map height")?;

        tokens.tag(FOOD_TAG)?;
        let food_x = tokens.number("food x")?;
        let food_y = tokens.number("food y")?;

        tokens.tag(SNAKE_TAG)?;
        let direction = tokens.direction()?;
        let length: usize = tokens.number("snake length")?;

        let mut segments = Vec::new();
        for _ in 0..length {
            let x = tokens.number("segment x")?;
            let y = tokens.number("segment y")?;
            segments.push(Coord::new(x, y));
        }

        Self::new(
            MapDimension::new(width, height),
            Coord::new(food_x, food_y),
            direction,
            segments,
        )
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{MAP_TAG} {} {} {FOOD_TAG} {} {} {SNAKE_TAG} {} {}",
            self.map.width(),
            self.map.height(),
            self.food.x(),
            self.food.y(),
            self.direction.as_char(),
            self.body.len(),
        )?;
        for segment in self.body.iter() {
            write!(f, " {} {}", segment.x(), segment.y())?;
        }
        Ok(())
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(value: &'a str) -> Self {
        Self {
            inner: value.split_whitespace(),
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a str, ConfigError> {
        self.inner
            .next()
            .ok_or(ConfigError::MissingToken { expected })
    }

    fn tag(&mut self, tag: char) -> Result<(), ConfigError> {
        let token = self.next("section tag")?;
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(found), None) if found == tag => Ok(()),
            _ => Err(ConfigError::UnexpectedTag {
                expected: tag,
                found: token.to_owned(),
            }),
        }
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> Result<T, ConfigError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| ConfigError::InvalidNumber {
            field,
            token: token.to_owned(),
        })
    }

    fn direction(&mut self) -> Result<Direction, ConfigError> {
        let token = self.next("direction")?;
        let mut chars = token.chars();
        let direction = match (chars.next(), chars.next()) {
            (Some(value), None) => Direction::from_char(value),
            _ => None,
        };
        direction.ok_or_else(|| ConfigError::InvalidDirection {
            found: token.to_owned(),
        })
    }
}
