//! Mining commodity registry.
//!
//! Maps in-game material names (and the common abbreviations players use)
//! to the identifiers and query names the lookup service expects. The
//! numeric ids are not documented anywhere; they were found by inspecting
//! the service's network requests, so they may change.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};

/// A mining commodity known to the lookup service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    /// Canonical in-game name.
    pub name: &'static str,
    /// Name the lookup service expects in query strings.
    pub query_name: &'static str,
    /// Numeric commodity id used by the trade endpoint.
    pub edtools_id: u32,
    aliases: &'static [&'static str],
}

const MATERIALS: &[Material] = &[
    Material {
        name: "Void Opal",
        query_name: "Opal",
        edtools_id: 350,
        aliases: &["Void Opals", "Opal", "Opals"],
    },
    Material {
        name: "Low Temperature Diamond",
        query_name: "LowTemperatureDiamond",
        edtools_id: 276,
        aliases: &["Low Temperature Diamonds", "LTD", "LTDs"],
    },
    Material {
        name: "Painite",
        query_name: "Painite",
        edtools_id: 83,
        aliases: &[],
    },
    Material {
        name: "Platinum",
        query_name: "Platinum",
        edtools_id: 46,
        aliases: &[],
    },
    Material {
        name: "Benitoite",
        query_name: "Benitoite",
        edtools_id: 347,
        aliases: &[],
    },
    Material {
        name: "Serendibite",
        query_name: "Serendibite",
        edtools_id: 344,
        aliases: &[],
    },
    Material {
        name: "Monazite",
        query_name: "Monazite",
        edtools_id: 345,
        aliases: &[],
    },
    Material {
        name: "Musgravite",
        query_name: "Musgravite",
        edtools_id: 346,
        aliases: &[],
    },
    Material {
        name: "Grandidierite",
        query_name: "Grandidierite",
        edtools_id: 348,
        aliases: &[],
    },
];

/// Case-insensitive index over canonical names and aliases.
static INDEX: Lazy<HashMap<String, &'static Material>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for material in MATERIALS {
        index.insert(material.name.to_ascii_lowercase(), material);
        for alias in material.aliases {
            index.insert(alias.to_ascii_lowercase(), material);
        }
    }
    index
});

/// Look up a material by canonical name or alias, case-insensitively.
///
/// Unknown names fail with [`Error::UnknownMaterial`] carrying close
/// matches from the registry.
pub fn lookup(name: &str) -> Result<&'static Material> {
    let key = name.trim().to_ascii_lowercase();
    INDEX.get(key.as_str()).copied().ok_or_else(|| {
        Error::UnknownMaterial {
            name: name.to_string(),
            suggestions: suggestions(name),
        }
    })
}

/// All canonical material names, for help text and suggestions.
pub fn canonical_names() -> impl Iterator<Item = &'static str> {
    MATERIALS.iter().map(|m| m.name)
}

const SUGGESTION_THRESHOLD: f64 = 0.75;
const MAX_SUGGESTIONS: usize = 3;

fn suggestions(name: &str) -> Vec<String> {
    let needle = name.trim().to_ascii_lowercase();
    let mut scored: Vec<(f64, &str)> = MATERIALS
        .iter()
        .map(|m| {
            (
                strsim::jaro_winkler(&needle, &m.name.to_ascii_lowercase()),
                m.name,
            )
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let material = lookup("void opal").expect("known material");
        assert_eq!(material.query_name, "Opal");
        assert_eq!(material.edtools_id, 350);
    }

    #[test]
    fn aliases_resolve_to_canonical_material() {
        let ltd = lookup("LTDs").expect("alias resolves");
        assert_eq!(ltd.name, "Low Temperature Diamond");
        assert_eq!(ltd.query_name, "LowTemperatureDiamond");
    }

    #[test]
    fn unknown_material_carries_suggestions() {
        let err = lookup("Painte").unwrap_err();
        match err {
            Error::UnknownMaterial { name, suggestions } => {
                assert_eq!(name, "Painte");
                assert!(suggestions.iter().any(|s| s == "Painite"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn gibberish_has_no_suggestions() {
        let err = lookup("zzzzqqq").unwrap_err();
        match err {
            Error::UnknownMaterial { suggestions, .. } => assert!(suggestions.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
