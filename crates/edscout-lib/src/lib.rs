//! EDScout library entry points.
//!
//! This crate reads the player's state from the Elite Dangerous journal,
//! fetches candidate locations from edtools.cc, and ranks them by a
//! distance/value trade-off. Higher-level consumers (the CLI) should only
//! depend on the functions exported here instead of reimplementing
//! behavior.

#![deny(warnings)]

pub mod candidate;
pub mod edtools;
pub mod error;
pub mod filter;
pub mod journal;
pub mod material;
pub mod rank;
pub mod run;

pub use candidate::{Candidate, Coords, PadSize, RingType};
pub use edtools::{Clock, FetchSession, SystemClock};
pub use error::{Error, Result};
pub use filter::{filter, SearchConstraints};
pub use journal::{CargoItem, PlayerLocation};
pub use rank::{rank, RankPolicy, Ranked};
pub use run::{run, Activity, ActivityKind, Recommendation, RunRequest};
