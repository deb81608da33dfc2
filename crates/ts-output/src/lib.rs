//! `ts-output` — what train workers say about their moves, and where it goes.
//!
//! | Type               | Role                                                  |
//! |--------------------|-------------------------------------------------------|
//! | [`MoveRecord`]     | One crossing attempt (train, step, leg, outcome)      |
//! | [`RecordSink`]     | Shared destination for records (`Send + Sync`)        |
//! | [`PrintChannel`]   | Line-atomic text output, e.g. stdout                  |
//! | [`RecordCollector`]| In-memory log, used for summaries and tests          |
//! | [`CsvSink`]        | `train,step,from,to,segment_a,segment_b,outcome` rows |
//! | [`Tee`]            | Fan-out to two sinks                                  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ts_output::{PrintChannel, RecordCollector, Tee};
//!
//! let console = PrintChannel::stdout();
//! let log = RecordCollector::new();
//! let report = sim.run(&Tee(&console, &log))?;
//! console.finish()?;
//! ```

pub mod collector;
pub mod csv;
pub mod error;
pub mod print;
pub mod row;
pub mod sink;


pub use collector::RecordCollector;
pub use crate::csv::CsvSink;
pub use error::{OutputError, OutputResult};
pub use print::PrintChannel;
pub use row::{MoveOutcome, MoveRecord, MoveRow};
pub use sink::{Discard, RecordSink, Tee};
