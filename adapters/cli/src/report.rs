//! Plain-text rendering of outbound messages and engine state.

use snake_core::{Cell, Message, Recorder};
use snake_engine::SnakeSnapshot;

/// Short human-readable form of a message.
///
/// Inbound kinds use the replay script vocabulary.
pub(crate) fn describe(message: &Message) -> String {
    match message {
        Message::Timeout => "tick".to_owned(),
        Message::Pause => "pause".to_owned(),
        Message::Direction { direction } => format!("dir {}", direction.as_char()),
        Message::FoodPlaced { position } => format!("food {} {}", position.x(), position.y()),
        Message::FoodPlacementConfirmed { position } => {
            format!("food-resp {} {}", position.x(), position.y())
        }
        Message::Display { position, cell } => {
            let cell = match cell {
                Cell::Free => "free",
                Cell::Food => "food",
                Cell::Snake => "snake",
            };
            format!("{cell}@{position}")
        }
        Message::FoodRequest => "food-request".to_owned(),
        Message::Score => "score".to_owned(),
        Message::Loss => "loss".to_owned(),
    }
}

/// Drains the port and formats its messages as one labelled line.
///
/// Returns `None` when the port received nothing.
pub(crate) fn drain(label: &str, port: &Recorder) -> Option<String> {
    let messages = port.take();
    if messages.is_empty() {
        return None;
    }

    let described: Vec<String> = messages.iter().map(describe).collect();
    Some(format!("  {label}: {}", described.join(", ")))
}

/// Multi-line summary of the final engine state.
pub(crate) fn summary(snapshot: &SnakeSnapshot) -> String {
    let body: Vec<String> = snapshot
        .segments
        .iter()
        .map(ToString::to_string)
        .collect();
    format!(
        "map: {}x{}\nfood: {}\ndirection: {}\npaused: {}\nlength: {}\nbody: {}",
        snapshot.map.width(),
        snapshot.map.height(),
        snapshot.food,
        snapshot.direction.as_char(),
        snapshot.paused,
        snapshot.segments.len(),
        body.join(" "),
    )
}
