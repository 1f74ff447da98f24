//! Self-healing recommendations across all tiles.
//!
//! Each tile already carries deduplicated solutions for its own payload. Here
//! the same remediation text coming from several modules collapses into one
//! aggregated entry that counts and names the modules it applies to.

use crate::modules::{MessageSet, ModuleTile};
use serde::Serialize;
use std::collections::HashMap;

/// Recommendation shown when every module delivered valid data.
pub const ALL_CLEAR: &str = "All modules deliver complete data; no action needed.";

/// One remediation text shared by one or more modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedSolution {
    /// Remediation text
    pub text: String,
    /// Number of modules it applies to
    pub count: usize,
    /// Identifiers of those modules, in render order
    pub modules: Vec<String>,
    /// Display name of the first module that triggered it
    pub example: String,
}

/// The `self_healing` section of the dashboard model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfHealing {
    /// What to do next, one line per failing module followed by its fixes
    pub recommended_actions: MessageSet,
    /// Solutions of all modules, deduplicated across modules
    pub solutions: Vec<AggregatedSolution>,
    /// Checks the shell ran while rendering
    pub auto_checks: Vec<String>,
}

/// Builds recommendations from rendered tiles.
pub fn self_healing(tiles: &[ModuleTile], auto_checks: Vec<String>) -> SelfHealing {
    let mut recommended_actions = MessageSet::new();
    for tile in tiles.iter().filter(|t| !t.validation.is_valid()) {
        recommended_actions.insert(format!(
            "Module '{}' reports invalid data: {}",
            tile.display_name,
            tile.validation.errors().join(" ")
        ));
    }
    for tile in tiles.iter().filter(|t| !t.validation.is_valid()) {
        for solution in tile.validation.solutions() {
            recommended_actions.insert(solution);
        }
    }
    if recommended_actions.is_empty() {
        recommended_actions.insert(ALL_CLEAR);
    }

    SelfHealing {
        recommended_actions,
        solutions: aggregate_solutions(tiles),
        auto_checks,
    }
}

/// Groups identical solution texts across tiles, keeping first-seen order.
pub fn aggregate_solutions(tiles: &[ModuleTile]) -> Vec<AggregatedSolution> {
    let mut aggregated: Vec<AggregatedSolution> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tile in tiles {
        for text in tile.validation.solutions() {
            match index.get(text.as_str()) {
                Some(&i) => {
                    let entry = &mut aggregated[i];
                    if !entry.modules.contains(&tile.identifier) {
                        entry.modules.push(tile.identifier.clone());
                        entry.count += 1;
                    }
                }
                None => {
                    index.insert(text, aggregated.len());
                    aggregated.push(AggregatedSolution {
                        text: text.clone(),
                        count: 1,
                        modules: vec![tile.identifier.clone()],
                        example: tile.display_name.clone(),
                    });
                }
            }
        }
    }
    aggregated
}
