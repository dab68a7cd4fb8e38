#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake engine.
//!
//! This crate defines the message surface that connects the engine with its
//! collaborators. Transports deliver [`Message`] values to the engine, the
//! engine reacts synchronously, and then pushes outbound [`Message`] values
//! into the [`Port`] handles it was constructed with: one for the display,
//! one for the food service and one for the score tracker.

use std::{cell::RefCell, fmt, sync::mpsc};

use serde::{Deserialize, Serialize};

/// Numeric tag identifying the kind of a protocol message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(u32);

impl MessageId {
    /// Requests a change of the snake's movement direction.
    pub const DIRECTION: Self = Self(0x10);
    /// Signals one discrete simulation step.
    pub const TIMEOUT: Self = Self(0x20);
    /// Carries a single cell update for the display.
    pub const DISPLAY: Self = Self(0x30);
    /// Announces food placed without a prior request.
    pub const FOOD_PLACED: Self = Self(0x40);
    /// Asks the food service for a new food position.
    pub const FOOD_REQUEST: Self = Self(0x41);
    /// Answers a food request with a new food position.
    pub const FOOD_PLACEMENT_CONFIRMED: Self = Self(0x42);
    /// Reports that the snake consumed food.
    pub const SCORE: Self = Self(0x70);
    /// Reports that the snake collided with a wall or itself.
    pub const LOSS: Self = Self(0x71);
    /// Toggles the pause state of the engine.
    pub const PAUSE: Self = Self(0x91);

    /// Creates a new message identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the identifier names one of the protocol messages.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(
            *self,
            Self::DIRECTION
                | Self::TIMEOUT
                | Self::DISPLAY
                | Self::FOOD_PLACED
                | Self::FOOD_REQUEST
                | Self::FOOD_PLACEMENT_CONFIRMED
                | Self::SCORE
                | Self::LOSS
                | Self::PAUSE
        )
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Every message exchanged between the engine and its collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    /// Requests that the snake turn toward the provided direction.
    Direction {
        /// Direction the snake should adopt on the next tick.
        direction: Direction,
    },
    /// Advances the simulation by one tick.
    Timeout,
    /// Updates the contents of a single display cell.
    Display {
        /// Cell whose contents changed.
        position: Coord,
        /// New contents of the cell.
        cell: Cell,
    },
    /// Announces food placed by the food service on its own initiative.
    FoodPlaced {
        /// Cell now holding the food.
        position: Coord,
    },
    /// Asks the food service to place food somewhere new.
    FoodRequest,
    /// Answers a previous [`Message::FoodRequest`].
    FoodPlacementConfirmed {
        /// Cell now holding the food.
        position: Coord,
    },
    /// Reports that the snake ate.
    Score,
    /// Reports that the snake hit a wall or its own body.
    Loss,
    /// Flips the pause state of the engine.
    Pause,
}

impl Message {
    /// Returns the numeric tag identifying the message kind.
    #[must_use]
    pub const fn message_id(&self) -> MessageId {
        match self {
            Self::Direction { .. } => MessageId::DIRECTION,
            Self::Timeout => MessageId::TIMEOUT,
            Self::Display { .. } => MessageId::DISPLAY,
            Self::FoodPlaced { .. } => MessageId::FOOD_PLACED,
            Self::FoodRequest => MessageId::FOOD_REQUEST,
            Self::FoodPlacementConfirmed { .. } => MessageId::FOOD_PLACEMENT_CONFIRMED,
            Self::Score => MessageId::SCORE,
            Self::Loss => MessageId::LOSS,
            Self::Pause => MessageId::PAUSE,
        }
    }

    /// Reports whether the engine accepts this kind of message.
    #[must_use]
    pub const fn is_inbound(&self) -> bool {
        matches!(
            self,
            Self::Direction { .. }
                | Self::Timeout
                | Self::FoodPlaced { .. }
                | Self::FoodPlacementConfirmed { .. }
                | Self::Pause
        )
    }

    /// Builds the payload-free message identified by `id`, if there is one.
    ///
    /// Kinds that carry a payload cannot be reconstructed from their tag
    /// alone and yield `None`, as do unknown identifiers.
    #[must_use]
    pub const fn without_payload(id: MessageId) -> Option<Self> {
        match id {
            MessageId::TIMEOUT => Some(Self::Timeout),
            MessageId::FOOD_REQUEST => Some(Self::FoodRequest),
            MessageId::SCORE => Some(Self::Score),
            MessageId::LOSS => Some(Self::Loss),
            MessageId::PAUSE => Some(Self::Pause),
            _ => None,
        }
    }
}

/// Location of a single map cell expressed as signed x and y coordinates.
///
/// Coordinates are signed so that a step past the map edge stays
/// representable and can be reported as a wall collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    x: i32,
    y: i32,
}

impl Coord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal index of the cell, growing to the right.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical index of the cell, growing downward.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring cell one step toward `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => Self::new(self.x, self.y.saturating_add(1)),
            Direction::Left => Self::new(self.x.saturating_sub(1), self.y),
            Direction::Right => Self::new(self.x.saturating_add(1), self.y),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions available to the snake.
///
/// The discriminants keep vertical and horizontal directions on separate
/// values of bit 0, the axis bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Movement toward decreasing y.
    Up = 0b00,
    /// Movement toward increasing y.
    Down = 0b10,
    /// Movement toward decreasing x.
    Left = 0b01,
    /// Movement toward increasing x.
    Right = 0b11,
}

impl Direction {
    /// Returns the bit shared by a direction and its opposite.
    #[must_use]
    pub const fn axis_bit(self) -> u8 {
        self as u8 & 0b01
    }

    /// Reports whether `other` lies on the other axis.
    #[must_use]
    pub const fn is_perpendicular_to(self, other: Direction) -> bool {
        self.axis_bit() != other.axis_bit()
    }

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Parses the single-character form used by configuration strings.
    #[must_use]
    pub const fn from_char(value: char) -> Option<Self> {
        match value {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }

    /// Single-character form used by configuration strings.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }
}

/// Contents of a single display cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing occupies the cell.
    Free,
    /// The cell holds food.
    Food,
    /// A snake segment occupies the cell.
    Snake,
}

/// Size of the playable rectangle measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapDimension {
    width: i32,
    height: i32,
}

impl MapDimension {
    /// Creates a new map size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Width of the map in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height of the map in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether the cell lies within `[0, width) x [0, height)`.
    #[must_use]
    pub const fn contains(&self, cell: Coord) -> bool {
        cell.x() >= 0 && cell.y() >= 0 && cell.x() < self.width && cell.y() < self.height
    }
}

/// Capability of accepting one outbound message at a time.
///
/// Sending is fire-and-forget: delivery and backpressure are the receiving
/// collaborator's concern.
pub trait Port {
    /// Hands a message to the collaborator behind the port.
    fn send(&self, message: Message);
}

impl<T: Port + ?Sized> Port for &T {
    fn send(&self, message: Message) {
        (**self).send(message);
    }
}

impl Port for mpsc::Sender<Message> {
    fn send(&self, message: Message) {
        // A hung-up receiver means nobody is listening any more.
        let _ = mpsc::Sender::send(self, message);
    }
}

/// Adapts a closure into a [`Port`].
pub struct FnPort<F>(F);

impl<F: Fn(Message)> FnPort<F> {
    /// Wraps the provided closure.
    #[must_use]
    pub const fn new(send: F) -> Self {
        Self(send)
    }
}

impl<F: Fn(Message)> Port for FnPort<F> {
    fn send(&self, message: Message) {
        (self.0)(message);
    }
}

impl<F> fmt::Debug for FnPort<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnPort")
    }
}

/// Port that keeps every received message in arrival order.
#[derive(Debug, Default)]
pub struct Recorder {
    messages: RefCell<Vec<Message>>,
}

impl Recorder {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: RefCell::new(Vec::new()),
        }
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<Message> {
        self.messages.take()
    }

    /// Number of messages waiting to be taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    /// Reports whether no messages are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Port for Recorder {
    fn send(&self, message: Message) {
        self.messages.borrow_mut().push(message);
    }
}
