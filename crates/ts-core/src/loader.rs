//! Whitespace-token scenario loader.
//!
//! # File format
//!
//! Tokens are separated by any whitespace; line breaks carry no meaning.
//!
//! ```text
//! nTrains nStations
//! stationCount station_0 station_1 ... station_{stationCount-1}   # train 0
//! stationCount station_0 ...                                       # train 1
//! ...
//! ```
//!
//! Example: two trains crossing a three-station line in opposite directions:
//!
//! ```text
//! 2 3
//! 3 0 1 2
//! 3 2 1 0
//! ```
//!
//! Anything after the last declared route is ignored.

use std::io::Read;
use std::path::Path;
use std::str::SplitWhitespace;

use crate::{CoreError, CoreResult, Route, Scenario, StationId};

// ── Token cursor ──────────────────────────────────────────────────────────────

/// Pulls integer tokens in order and remembers the 1-based position of the
/// last one for error messages.
struct Tokens<'a> {
    inner:    SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { inner: text.split_whitespace(), position: 0 }
    }

    fn next_u32(&mut self, expected: &'static str) -> CoreResult<u32> {
        self.position += 1;
        let position = self.position;
        let token = self
            .inner
            .next()
            .ok_or(CoreError::UnexpectedEof { position, expected })?;
        token.parse::<u32>().map_err(|_| CoreError::Parse {
            position,
            expected,
            found: token.to_owned(),
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate a scenario from a file.
pub fn load_scenario_path(path: &Path) -> CoreResult<Scenario> {
    let file = std::fs::File::open(path)?;
    load_scenario_reader(file)
}

/// Like [`load_scenario_path`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or reading from stdin.
pub fn load_scenario_reader<R: Read>(mut reader: R) -> CoreResult<Scenario> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_scenario(&text)
}

/// Parse and validate a scenario from its textual form.
pub fn parse_scenario(text: &str) -> CoreResult<Scenario> {
    let mut tokens = Tokens::new(text);

    let train_count = tokens.next_u32("train count")?;
    let station_count = tokens.next_u32("station count")?;

    let mut routes = Vec::with_capacity(train_count.min(65_536) as usize);
    for _ in 0..train_count {
        let len = tokens.next_u32("route station count")?;
        let route: Route = (0..len)
            .map(|_| tokens.next_u32("station index").map(StationId))
            .collect::<CoreResult<Vec<_>>>()?
            .into();
        routes.push(route);
    }

    Scenario::new(station_count as usize, routes)
}
