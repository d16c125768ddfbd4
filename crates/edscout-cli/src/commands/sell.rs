//! Sell command: locate the best station to sell a commodity.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use edscout_lib::{
    Activity, FetchSession, PadSize, RankPolicy, RunRequest, SearchConstraints,
};

use crate::commands::validate_positive;
use crate::output::Presenter;

/// Landing pad requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PadChoice {
    /// Small pads only.
    S,
    /// Medium pads only.
    M,
    /// Large pads only.
    L,
    /// Medium or large pads.
    Ml,
}

impl PadChoice {
    fn pad_sizes(self) -> Vec<PadSize> {
        match self {
            PadChoice::S => vec![PadSize::Small],
            PadChoice::M => vec![PadSize::Medium],
            PadChoice::L => vec![PadSize::Large],
            PadChoice::Ml => vec![PadSize::Medium, PadSize::Large],
        }
    }
}

#[derive(Args, Debug)]
pub struct SellArgs {
    /// Commodity to sell (default: the biggest stack in your cargo hold).
    pub material: Option<String>,

    /// System to search from (default: reads from the journal).
    #[arg(long, short = 's')]
    pub system: Option<String>,

    /// Path to the Elite Dangerous journal folder.
    #[arg(long = "journal-path", short = 'j')]
    pub journal_path: Option<PathBuf>,

    /// Maximum distance to search, in light years.
    #[arg(long = "max-distance", short = 'm', default_value_t = 100.0)]
    pub max_distance: f64,

    /// Minimum unit price to consider; no floor by default.
    #[arg(long = "min-price")]
    pub min_price: Option<f64>,

    /// Required landing pad size.
    #[arg(long, short = 'p', value_enum, default_value_t = PadChoice::Ml)]
    pub pad: PadChoice,

    /// Distance band within which the distance penalty stays below one
    /// improvement bar.
    #[arg(long = "close-band", default_value_t = 20.0)]
    pub close_band: f64,

    /// Price gain per unit a candidate one band farther out must bring to
    /// keep its rank.
    #[arg(long = "improvement-bar", default_value_t = 100_000.0)]
    pub improvement_bar: f64,

    /// Disable voice output.
    #[arg(long = "no-voice", short = 'q')]
    pub no_voice: bool,

    /// Do not copy the target station to the clipboard.
    #[arg(long = "no-clipboard")]
    pub no_clipboard: bool,
}

pub fn handle_sell(args: &SellArgs) -> Result<()> {
    validate_positive("--max-distance", args.max_distance)?;
    validate_positive("--close-band", args.close_band)?;
    validate_positive("--improvement-bar", args.improvement_bar)?;

    let request = RunRequest {
        activity: Activity::Sell {
            material: args.material.clone(),
        },
        origin_system: args.system.clone(),
        journal_dir: args.journal_path.clone(),
        constraints: SearchConstraints {
            max_distance_ly: args.max_distance,
            min_value: args.min_price,
            ring_type: None,
            pad_sizes: Some(args.pad.pad_sizes()),
        },
        policy: RankPolicy {
            close_band_ly: args.close_band,
            improvement_bar: args.improvement_bar,
        },
    };

    let mut session = FetchSession::new().context("failed to build the lookup session")?;
    let recommendation =
        edscout_lib::run(&mut session, &request).context("sell search failed")?;

    let presenter = Presenter::new(!args.no_voice, !args.no_clipboard);
    presenter.present(&recommendation, &request.constraints);
    Ok(())
}
