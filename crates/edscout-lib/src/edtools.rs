//! Blocking client for the edtools.cc lookup service.
//!
//! All requests go through a [`FetchSession`] that enforces a minimum
//! inter-request delay, to keep the tool at a human pace against a shared
//! community service. The session owns the last-request instant and an
//! injected clock, so pacing is testable with a fake clock instead of a
//! hidden module-level timer.
//!
//! Response parsing degrades per record: a malformed hotspot row or station
//! record excludes that one candidate with a warning, never the batch.

use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::candidate::{Candidate, Coords};
use crate::error::{Error, Result};
use crate::material::Material;

const DEFAULT_BASE_URL: &str = "https://edtools.cc";
const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// The service rejects requests that look like obvious bots.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Time source for request pacing. Injected so tests can drive a fake clock.
pub trait Clock {
    fn now(&self) -> Instant;
    fn pause(&self, duration: Duration);
}

/// Wall clock used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// One HTTP session against the lookup service.
///
/// Owns the client, the base URL, the pacing delay and the last-request
/// instant. Created per run; never shared across runs.
pub struct FetchSession<C: Clock = SystemClock> {
    client: Client,
    base_url: String,
    min_delay: Duration,
    last_request: Option<Instant>,
    clock: C,
}

impl FetchSession<SystemClock> {
    /// Session with the default endpoint and pacing.
    pub fn new() -> Result<Self> {
        Self::with_min_delay(DEFAULT_MIN_DELAY)
    }

    /// Session with a custom inter-request delay.
    pub fn with_min_delay(min_delay: Duration) -> Result<Self> {
        Self::build(DEFAULT_BASE_URL.to_string(), min_delay, SystemClock)
    }
}

impl<C: Clock> FetchSession<C> {
    /// Session against an alternate endpoint with an injected clock.
    pub fn with_clock(base_url: impl Into<String>, min_delay: Duration, clock: C) -> Result<Self> {
        Self::build(base_url.into(), min_delay, clock)
    }

    fn build(base_url: String, min_delay: Duration, clock: C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://edtools.cc/"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            min_delay,
            last_request: None,
            clock,
        })
    }

    /// Wait out the remainder of the pacing delay, then stamp this request.
    fn throttle(&mut self) {
        let now = self.clock.now();
        if let Some(last) = self.last_request {
            let elapsed = now.duration_since(last);
            if elapsed < self.min_delay {
                let wait = self.min_delay - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "pacing outbound request");
                self.clock.pause(wait);
            }
        }
        self.last_request = Some(self.clock.now());
    }

    fn get_text(&mut self, path_and_query: &str) -> Result<String> {
        self.throttle();
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!(%url, "fetching");
        let response = self.client.get(&url).send()?.error_for_status()?;
        Ok(response.text()?)
    }

    /// Resolve a system name to galactic coordinates.
    ///
    /// A service-side "unknown system" answer maps to
    /// [`Error::UnknownSystem`]; callers decide whether that is fatal.
    pub fn system_coords(&mut self, system: &str) -> Result<Coords> {
        let body = self.get_text(&format!("/sys_coord.php?s={}", encode(system)))?;
        let parsed: SysCoordResponse =
            serde_json::from_str(&body).map_err(|err| Error::UnexpectedResponse {
                message: format!("system coordinates: {err}"),
            })?;
        if parsed.error.is_some() {
            return Err(Error::UnknownSystem {
                name: system.to_string(),
            });
        }
        parsed.coords.ok_or_else(|| Error::UnknownSystem {
            name: system.to_string(),
        })
    }

    /// Hotspot rings for `material` near `system`, with distances as
    /// precomputed by the service.
    pub fn mining_hotspots(&mut self, system: &str, material: &Material) -> Result<Vec<Candidate>> {
        let body = self.get_text(&format!(
            "/hotspot?s={}&m={}",
            encode(system),
            encode(material.query_name)
        ))?;
        Ok(parse_hotspot_table(&body))
    }

    /// Stations buying `material`, with distances computed from `origin`.
    pub fn sell_offers(&mut self, material: &Material, origin: &Coords) -> Result<Vec<Candidate>> {
        let body = self.get_text(&format!("/trd.php?f=json&cmdy={}", encode(material.query_name)))?;
        let records: Vec<StationRecord> =
            serde_json::from_str(&body).map_err(|err| Error::UnexpectedResponse {
                message: format!("trade data: {err}"),
            })?;
        Ok(convert_station_records(records, origin))
    }
}

fn encode(value: &str) -> String {
    // Query values here are system and commodity names; space is the only
    // character that shows up in practice.
    value.trim().replace(' ', "%20")
}

#[derive(Debug, Deserialize)]
struct SysCoordResponse {
    error: Option<String>,
    coords: Option<Coords>,
}

/// Raw station record from the trade endpoint, prior to validation.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    #[serde(default)]
    pub station: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub pad: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub coords: Option<Coords>,
    /// Age of the price data in days, when reported.
    #[serde(default)]
    pub upd: Option<f64>,
}

/// Convert raw station records into candidates, dropping records that are
/// missing a station name, coordinates or a usable price.
pub fn convert_station_records(records: Vec<StationRecord>, origin: &Coords) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(records.len());
    for record in records {
        let (Some(station), Some(system), Some(coords), Some(price)) = (
            record.station,
            record.system,
            record.coords,
            record.price,
        ) else {
            debug!("dropping station record with missing fields");
            continue;
        };
        if !price.is_finite() || price < 0.0 {
            warn!(%station, "dropping station record with invalid price");
            continue;
        }
        let pad_size = record.pad.as_deref().and_then(|p| p.parse().ok());
        candidates.push(Candidate {
            name: station,
            system,
            distance_ly: origin.distance_to(&coords),
            value: price,
            ring_type: None,
            pad_size,
            hotspot_count: None,
            arrival_ls: None,
            populated: None,
            freshness_days: record.upd,
        });
    }
    candidates
}

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table#sys_tbl tr").expect("static selector parses"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("static selector parses"));
static COPY_BUTTON_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.btn").expect("static selector parses"));
static HOVER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.hvr").expect("static selector parses"));
static TOOLTIP_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.ttip").expect("static selector parses"));
static POPULATED_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.gr").expect("static selector parses"));

/// Parse the hotspot results table out of the service's HTML response.
///
/// Rows that do not have the expected seven columns, or whose numeric
/// fields fail to parse, are excluded individually.
pub fn parse_hotspot_table(html: &str) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    // First row is the header.
    for row in document.select(&ROW_SELECTOR).skip(1) {
        match parse_hotspot_row(&row) {
            Some(candidate) => candidates.push(candidate),
            None => warn!("dropping malformed hotspot row"),
        }
    }
    candidates
}

fn parse_hotspot_row(row: &ElementRef) -> Option<Candidate> {
    let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
    if cells.len() < 7 {
        return None;
    }

    let distance_ly: f64 = cell_text(&cells[0]).parse().ok()?;

    // The system cell holds a copy button carrying the exact name; the
    // visible text may include decorations.
    let system = cells[1]
        .select(&COPY_BUTTON_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("data-clipboard-text"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| Some(cell_text(&cells[1])))
        .filter(|s| !s.is_empty())?;
    let populated = cells[1].select(&POPULATED_SELECTOR).next().is_some();

    // The ring cell mixes the ring name with a hotspot tooltip; stripping
    // the tooltip text leaves the name.
    let ring_cell_text = cells[2]
        .select(&HOVER_SELECTOR)
        .next()
        .map(|el| text_of(&el))
        .unwrap_or_else(|| cell_text(&cells[2]));
    let tooltip_text = cells[2]
        .select(&TOOLTIP_SELECTOR)
        .next()
        .map(|el| text_of(&el))
        .unwrap_or_default();
    let tooltip_text = tooltip_text.trim();
    let name = if tooltip_text.is_empty() {
        ring_cell_text.trim().to_string()
    } else {
        ring_cell_text.replace(tooltip_text, "").trim().to_string()
    };
    if name.is_empty() {
        return None;
    }

    let ring_type = cell_text(&cells[3]).parse().ok();
    let hotspot_count: Option<u32> = cell_text(&cells[4]).parse().ok();
    let arrival_ls: Option<u64> = cell_text(&cells[5]).replace(',', "").parse().ok();

    // Density cell reads like "7.2M=1,234..."; the number before "M=" is
    // the ring density.
    let density_text = cells[6]
        .select(&HOVER_SELECTOR)
        .next()
        .map(|el| text_of(&el))
        .unwrap_or_else(|| cell_text(&cells[6]));
    let value: f64 = density_text
        .split("M=")
        .next()
        .map(|s| s.trim().replace(',', ""))?
        .parse()
        .ok()?;

    if !(distance_ly.is_finite() && distance_ly >= 0.0 && value.is_finite() && value >= 0.0) {
        return None;
    }

    Some(Candidate {
        name,
        system,
        distance_ly,
        value,
        ring_type,
        pad_size: None,
        hotspot_count,
        arrival_ls,
        populated: Some(populated),
        freshness_days: None,
    })
}

fn cell_text(cell: &ElementRef) -> String {
    text_of(cell).trim().to_string()
}

fn text_of(el: &ElementRef) -> String {
    el.text().collect::<String>()
}
