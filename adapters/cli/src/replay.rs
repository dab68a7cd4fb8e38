//! Drives the engine through a parsed script and writes what every port receives.

use std::io::Write;

use anyhow::{Context, Result};
use snake_core::Recorder;
use snake_engine::{query, EngineConfig, SnakeEngine};

use crate::{report, script::Step};

/// Replays `steps` in order, writing each step and the port output it caused.
///
/// Ends with a summary of the final state. The first step the engine rejects
/// aborts the replay; output written up to that point is kept.
pub(crate) fn run(config: EngineConfig, steps: &[Step], out: &mut impl Write) -> Result<()> {
    let display = Recorder::new();
    let food = Recorder::new();
    let score = Recorder::new();
    let mut engine = SnakeEngine::from_config(&display, &food, &score, config);

    for step in steps {
        writeln!(out, "{:>4}: {}", step.line, report::describe(&step.message))?;
        engine
            .receive(step.message)
            .with_context(|| format!("replay aborted at line {}", step.line))?;
        for (label, port) in [("display", &display), ("food", &food), ("score", &score)] {
            if let Some(line) = report::drain(label, port) {
                writeln!(out, "{line}")?;
            }
        }
    }

    writeln!(out, "{}", report::summary(&query::snapshot(&engine)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script;

    fn replay(config: &str, source: &str) -> (Result<()>, String) {
        let config: EngineConfig = config.parse().expect("configuration should be valid");
        let steps = script::parse(source).expect("script should be valid");
        let mut out = Vec::new();
        let result = run(config, &steps, &mut out);
        (result, String::from_utf8(out).expect("output is utf-8"))
    }

    #[test]
    fn bundled_script_prints_every_port_and_the_final_state() {
        let (result, output) = replay(
            "W 6 4 F 3 1 S R 2 1 1 0 1",
            include_str!("../scripts/grow_and_crash.txt"),
        );

        assert!(result.is_ok(), "replay failed: {result:?}");
        assert_eq!(
            output,
            "   3: tick\n\
             \x20 display: free@(0, 1), snake@(2, 1)\n\
             \x20  4: tick\n\
             \x20 display: snake@(3, 1)\n\
             \x20 food: food-request\n\
             \x20 score: score\n\
             \x20  5: food-resp 2 1\n\
             \x20 food: food-request\n\
             \x20  6: food-resp 5 3\n\
             \x20 display: food@(5, 3)\n\
             \x20  7: dir D\n\
             \x20  8: tick\n\
             \x20 display: free@(1, 1), snake@(3, 2)\n\
             \x20  9: pause\n\
             \x20 10: tick\n\
             \x20 11: pause\n\
             \x20 12: dir R\n\
             \x20 13: tick\n\
             \x20 display: free@(2, 1), snake@(4, 2)\n\
             \x20 14: dir D\n\
             \x20 15: tick\n\
             \x20 display: free@(3, 1), snake@(4, 3)\n\
             \x20 16: dir R\n\
             \x20 17: tick\n\
             \x20 display: snake@(5, 3)\n\
             \x20 food: food-request\n\
             \x20 score: score\n\
             \x20 18: tick\n\
             \x20 score: loss\n\
             map: 6x4\n\
             food: (5, 3)\n\
             direction: R\n\
             paused: false\n\
             length: 4\n\
             body: (5, 3) (4, 3) (4, 2) (3, 2)\n",
        );
    }

    #[test]
    fn outbound_step_aborts_with_its_line_number() {
        let (result, output) = replay("W 10 10 F 5 5 S R 3 2 2 1 2 0 2", "tick\nraw 0x70\ntick");

        let error = result.expect_err("score is not an inbound event");
        let message = format!("{error:#}");
        assert!(
            message.contains("replay aborted at line 2"),
            "missing line context: {message}",
        );
        assert!(
            message.contains("unexpected event received: 0x70"),
            "missing engine error: {message}",
        );
        assert_eq!(
            output,
            "   1: tick\n  display: free@(0, 2), snake@(3, 2)\n   2: score\n",
            "output before the rejected step must be kept and nothing after it",
        );
    }
}
