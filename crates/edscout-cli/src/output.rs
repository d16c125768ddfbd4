//! Result presentation: stdout, clipboard and speech.
//!
//! Sink failures (no clipboard service, no speech engine) are logged and
//! swallowed; they never change the computed result or the exit code.

use std::process::Command;

use tracing::warn;

use edscout_lib::{ActivityKind, Ranked, Recommendation, SearchConstraints};

const MAX_ALTERNATES: usize = 5;

pub struct Presenter {
    voice: bool,
    clipboard: bool,
}

impl Presenter {
    pub fn new(voice: bool, clipboard: bool) -> Self {
        Self { voice, clipboard }
    }

    pub fn present(&self, recommendation: &Recommendation, constraints: &SearchConstraints) {
        if let Some(notice) = &recommendation.notice {
            println!("{notice}");
        }

        let Some(best) = recommendation.best() else {
            let message = no_candidates_message(recommendation, constraints);
            println!("{message}");
            self.speak(&message);
            return;
        };

        let headline = headline(recommendation, best);
        println!("{headline}");

        if self.clipboard {
            // The in-game galaxy map search wants the system for mining
            // runs and the station name for sell runs.
            let target = match recommendation.kind {
                ActivityKind::Mine => &best.candidate.system,
                ActivityKind::Sell => &best.candidate.name,
            };
            if self.copy_to_clipboard(target) {
                println!("({target} copied to clipboard)");
            }
        }

        self.print_alternates(recommendation);
        self.speak(&headline);
    }

    fn print_alternates(&self, recommendation: &Recommendation) {
        let alternates = &recommendation.ranked[1..];
        if alternates.is_empty() {
            return;
        }
        println!("Alternatives:");
        for (index, ranked) in alternates.iter().take(MAX_ALTERNATES).enumerate() {
            println!(
                "  {}. {} — {}, {:.1} ly, {}",
                index + 2,
                ranked.candidate.system,
                ranked.candidate.name,
                ranked.candidate.distance_ly,
                value_label(recommendation.kind, ranked)
            );
        }
        let hidden = alternates.len().saturating_sub(MAX_ALTERNATES);
        if hidden > 0 {
            println!("  ... and {hidden} more");
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> bool {
        let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
        if let Err(err) = result {
            warn!(%err, "clipboard copy failed");
            return false;
        }
        true
    }

    fn speak(&self, text: &str) {
        if !self.voice {
            return;
        }
        match speech_command(text).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(%status, "speech command exited unsuccessfully"),
            Err(err) => warn!(%err, "speech command failed to start"),
        }
    }
}

fn headline(recommendation: &Recommendation, best: &Ranked) -> String {
    let candidate = &best.candidate;
    match recommendation.kind {
        ActivityKind::Mine => format!(
            "{}, {} light years away, ring {} with {:.1} density",
            candidate.system,
            candidate.distance_ly.round() as i64,
            candidate.name,
            candidate.value
        ),
        ActivityKind::Sell => format!(
            "You can sell {} for about {} at {} in {}, {:.0} light years away",
            recommendation.material,
            round_to_50k(candidate.value),
            candidate.name,
            candidate.system,
            candidate.distance_ly
        ),
    }
}

fn value_label(kind: ActivityKind, ranked: &Ranked) -> String {
    match kind {
        ActivityKind::Mine => format!("density {:.1}", ranked.candidate.value),
        ActivityKind::Sell => round_to_50k(ranked.candidate.value),
    }
}

fn no_candidates_message(
    recommendation: &Recommendation,
    constraints: &SearchConstraints,
) -> String {
    match recommendation.kind {
        ActivityKind::Mine => {
            let mut message = format!(
                "No suitable {} hotspots found near {}",
                recommendation.material, recommendation.origin
            );
            let mut active = Vec::new();
            if let Some(min_value) = constraints.min_value {
                active.push(format!("min density {min_value}"));
            }
            active.push(format!("max distance {} ly", constraints.max_distance_ly));
            if let Some(ring_type) = constraints.ring_type {
                active.push(format!("ring type {ring_type}"));
            }
            message.push_str(&format!(" ({})", active.join(", ")));
            message
        }
        ActivityKind::Sell => {
            let pads = constraints
                .pad_sizes
                .as_ref()
                .map(|pads| {
                    pads.iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>()
                        .join("/")
                })
                .unwrap_or_else(|| "any".to_string());
            format!(
                "No suitable stations buying {} within {} ly of {} ({} pads)",
                recommendation.material, constraints.max_distance_ly, recommendation.origin, pads
            )
        }
    }
}

/// Prices move in 50k increments, so the spoken number is rounded to the
/// nearest 50,000 and read in thousands.
fn round_to_50k(price: f64) -> String {
    let rounded_k = ((price / 50_000.0).round() as u64).saturating_mul(50);
    format!("{} K", format_with_separators(rounded_k))
}

fn format_with_separators(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(target_os = "macos")]
fn speech_command(text: &str) -> Command {
    let mut command = Command::new("say");
    command.arg(text);
    command
}

#[cfg(target_os = "windows")]
fn speech_command(text: &str) -> Command {
    let script = format!(
        "Add-Type -AssemblyName System.Speech; \
         (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{}')",
        text.replace('\'', "''")
    );
    let mut command = Command::new("powershell");
    command.args(["-NoProfile", "-Command", &script]);
    command
}

#[cfg(all(unix, not(target_os = "macos")))]
fn speech_command(text: &str) -> Command {
    let mut command = Command::new("espeak");
    command.arg(text);
    command
}
