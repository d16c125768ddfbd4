//! One-shot run orchestration.
//!
//! Sequences state read, remote fetch, filter and rank. Fetches exactly
//! once per run, never caches across runs, never issues concurrent
//! requests. Lower layers exclude bad data; this module decides what is
//! fatal.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::edtools::{Clock, FetchSession};
use crate::error::Result;
use crate::filter::{filter, SearchConstraints};
use crate::journal;
use crate::material;
use crate::rank::{rank, RankPolicy, Ranked};

/// Commodity searched for when the hold is empty and none was named.
const FALLBACK_MATERIAL: &str = "Void Opal";

/// What the player wants to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    /// Find a hotspot ring to mine the named material.
    Mine { material: String },
    /// Find a station to sell a commodity; `None` means "whatever fills
    /// most of the hold".
    Sell { material: Option<String> },
}

/// Activity label carried into the result for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Mine,
    Sell,
}

/// Everything a single decision run needs, supplied once and not mutated.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub activity: Activity,
    /// Origin override; when absent the journal provides the origin.
    pub origin_system: Option<String>,
    /// Journal directory override; when absent the platform default is used.
    pub journal_dir: Option<PathBuf>,
    pub constraints: SearchConstraints,
    pub policy: RankPolicy,
}

/// Ranked outcome of one run. Created fresh per invocation and discarded
/// after presentation.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub kind: ActivityKind,
    /// Canonical material name.
    pub material: String,
    /// Origin system the distances are measured from.
    pub origin: String,
    /// Survivors in rank order; empty means "no viable destination".
    pub ranked: Vec<Ranked>,
    /// Human-readable note about fallbacks taken while resolving inputs.
    pub notice: Option<String>,
}

impl Recommendation {
    /// The top-ranked candidate, when any survived filtering.
    pub fn best(&self) -> Option<&Ranked> {
        self.ranked.first()
    }
}

/// Execute one decision run.
pub fn run<C: Clock>(session: &mut FetchSession<C>, request: &RunRequest) -> Result<Recommendation> {
    match &request.activity {
        Activity::Mine { material } => run_mine(session, request, material),
        Activity::Sell { material } => run_sell(session, request, material.as_deref()),
    }
}

fn run_mine<C: Clock>(
    session: &mut FetchSession<C>,
    request: &RunRequest,
    material_name: &str,
) -> Result<Recommendation> {
    let material = material::lookup(material_name)?;
    let origin = resolve_origin(request)?;
    info!(material = material.name, %origin, "searching mining hotspots");

    let raw = session.mining_hotspots(&origin, material)?;
    debug!(count = raw.len(), "fetched hotspot candidates");
    let ranked = rank(filter(raw, &request.constraints), &request.policy);

    Ok(Recommendation {
        kind: ActivityKind::Mine,
        material: material.name.to_string(),
        origin,
        ranked,
        notice: None,
    })
}

fn run_sell<C: Clock>(
    session: &mut FetchSession<C>,
    request: &RunRequest,
    material_name: Option<&str>,
) -> Result<Recommendation> {
    let mut notice = None;
    let material_name = match material_name {
        Some(name) => name.to_string(),
        None => match journal::main_cargo(&journal_dir(request)?)? {
            Some(item) => item.name,
            None => {
                notice = Some(format!(
                    "no cargo found, searching {FALLBACK_MATERIAL} prices"
                ));
                FALLBACK_MATERIAL.to_string()
            }
        },
    };
    let material = material::lookup(&material_name)?;
    let origin = resolve_origin(request)?;
    info!(material = material.name, %origin, "searching sell stations");

    // Origin coordinates come first; an unknown origin aborts before the
    // trade data is ever requested.
    let origin_coords = session.system_coords(&origin)?;
    let raw = session.sell_offers(material, &origin_coords)?;
    debug!(count = raw.len(), "fetched station candidates");
    let ranked = rank(filter(raw, &request.constraints), &request.policy);

    Ok(Recommendation {
        kind: ActivityKind::Sell,
        material: material.name.to_string(),
        origin,
        ranked,
        notice,
    })
}

fn resolve_origin(request: &RunRequest) -> Result<String> {
    if let Some(system) = &request.origin_system {
        return Ok(system.clone());
    }
    let location = journal::current_location(&journal_dir(request)?)?;
    debug!(system = %location.system, "origin read from journal");
    Ok(location.system)
}

fn journal_dir(request: &RunRequest) -> Result<PathBuf> {
    match &request.journal_dir {
        Some(dir) => Ok(dir.clone()),
        None => journal::default_journal_dir(),
    }
}
