//! `ts-sync` — synchronization primitives for lockstep train workers.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`barrier`] | `ShrinkingBarrier`, `BarrierWaitResult`                    |
//! | [`gate`]    | `StartGate`                                                |
//!
//! # Lifecycle
//!
//! ```text
//! orchestrator:  build ShrinkingBarrier(n) + StartGate  → spawn n workers → gate.open()
//! worker:        gate.wait()
//!                loop { barrier.arrive(); attempt one move }
//!                barrier.deregister()
//! ```
//!
//! `std::sync::Barrier` has a fixed party count, so a worker that finishes
//! early would leave its peers waiting forever.  `ShrinkingBarrier` lets that
//! worker leave the quorum instead.

pub mod barrier;
pub mod gate;


pub use barrier::{BarrierWaitResult, ShrinkingBarrier};
pub use gate::StartGate;
