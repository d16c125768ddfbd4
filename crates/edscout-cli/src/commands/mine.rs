//! Mine command: locate the best hotspot ring for a material.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use edscout_lib::{
    Activity, FetchSession, RankPolicy, RingType, RunRequest, SearchConstraints,
};

use crate::commands::validate_positive;
use crate::output::Presenter;

#[derive(Args, Debug)]
pub struct MineArgs {
    /// Material to find hotspots for.
    #[arg(default_value = "Void Opal")]
    pub material: String,

    /// System to search from (default: reads from the journal).
    #[arg(long, short = 's')]
    pub system: Option<String>,

    /// Path to the Elite Dangerous journal folder.
    #[arg(long = "journal-path", short = 'j')]
    pub journal_path: Option<PathBuf>,

    /// Minimum ring density to consider.
    #[arg(long = "min-density", short = 'd', default_value_t = 7.0)]
    pub min_density: f64,

    /// Maximum distance to search, in light years.
    #[arg(long = "max-distance", short = 'm', default_value_t = 100.0)]
    pub max_distance: f64,

    /// Ring type to search for: icy, rocky, metallic or metal-rich.
    #[arg(long = "ring-type", short = 'r')]
    pub ring_type: Option<RingType>,

    /// Distance band within which the distance penalty stays below one
    /// improvement bar.
    #[arg(long = "close-band", default_value_t = 10.0)]
    pub close_band: f64,

    /// Density gain a candidate one band farther out must bring to keep
    /// its rank.
    #[arg(long = "improvement-bar", default_value_t = 1.0)]
    pub improvement_bar: f64,

    /// Disable voice output.
    #[arg(long = "no-voice", short = 'q')]
    pub no_voice: bool,

    /// Do not copy the target system to the clipboard.
    #[arg(long = "no-clipboard")]
    pub no_clipboard: bool,
}

pub fn handle_mine(args: &MineArgs) -> Result<()> {
    validate_positive("--max-distance", args.max_distance)?;
    validate_positive("--close-band", args.close_band)?;
    validate_positive("--improvement-bar", args.improvement_bar)?;

    let request = RunRequest {
        activity: Activity::Mine {
            material: args.material.clone(),
        },
        origin_system: args.system.clone(),
        journal_dir: args.journal_path.clone(),
        constraints: SearchConstraints {
            max_distance_ly: args.max_distance,
            min_value: Some(args.min_density),
            ring_type: args.ring_type,
            pad_sizes: None,
        },
        policy: RankPolicy {
            close_band_ly: args.close_band,
            improvement_bar: args.improvement_bar,
        },
    };

    let mut session = FetchSession::new().context("failed to build the lookup session")?;
    let recommendation =
        edscout_lib::run(&mut session, &request).context("mining search failed")?;

    let presenter = Presenter::new(!args.no_voice, !args.no_clipboard);
    presenter.present(&recommendation, &request.constraints);
    Ok(())
}
