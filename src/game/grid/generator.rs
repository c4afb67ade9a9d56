//! Randomized grid generation.
//!
//! Each target symbol is placed in priority order. A placement samples random
//! cells until it finds a free one (giving up after `PLACEMENT_ATTEMPT_CAP`
//! collisions), and clustered symbols then spill into the free neighbors of
//! every seed cell. Whatever is still empty afterwards becomes the decoy.

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Serialize, Deserialize};

use crate::config::game::{DECOY, PLACEMENTS, PLACEMENT_ATTEMPT_CAP};
use crate::game::grid::grid::{neighbors_within, Grid};
use crate::game::types::{Position, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub symbol: Symbol,
    pub count: usize,
    pub cluster: bool,
}

/// Ordered placement requests plus the fallback fill symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSpec {
    pub placements: Vec<Placement>,
    pub decoy: Symbol,
    pub attempt_cap: u32,
}

impl Default for PlacementSpec {
    fn default() -> Self {
        Self {
            placements: PLACEMENTS
                .iter()
                .map(|&(symbol, count, cluster)| Placement { symbol, count, cluster })
                .collect(),
            decoy: DECOY,
            attempt_cap: PLACEMENT_ATTEMPT_CAP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub symbol: Symbol,
    pub requested: usize,
    pub placed: usize,
}

impl PlacementOutcome {
    pub fn shortfall(&self) -> usize {
        self.requested - self.placed
    }
}

/// What the generator actually managed to place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub outcomes: Vec<PlacementOutcome>,
    pub decoy_fills: usize,
}

impl GenerationReport {
    pub fn total_shortfall(&self) -> usize {
        self.outcomes.iter().map(PlacementOutcome::shortfall).sum()
    }
}

/// Generate a `rows x cols` grid. Deterministic for a seeded `rng`.
pub fn generate_grid<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    spec: &PlacementSpec,
    rng: &mut R,
) -> (Grid, GenerationReport) {
    let mut slots: Vec<Vec<Option<Symbol>>> = vec![vec![None; cols]; rows];
    let mut report = GenerationReport::default();

    for placement in &spec.placements {
        let placed = place_symbol(&mut slots, placement, spec.attempt_cap, rng);
        let outcome = PlacementOutcome {
            symbol: placement.symbol,
            requested: placement.count,
            placed,
        };
        if outcome.shortfall() > 0 {
            warn!(
                "[Grid] Placed {}/{} {:?} before hitting the attempt cap",
                placed, placement.count, placement.symbol
            );
        }
        report.outcomes.push(outcome);
    }

    let cells: Vec<Vec<Symbol>> = slots
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|slot| {
                    slot.unwrap_or_else(|| {
                        report.decoy_fills += 1;
                        spec.decoy
                    })
                })
                .collect()
        })
        .collect();

    debug!(
        "[Grid] Generated {}x{} grid, {} decoy fills, shortfall {}",
        rows, cols, report.decoy_fills, report.total_shortfall()
    );

    (Grid::from_parts(rows, cols, cells), report)
}

/// Place up to `placement.count` copies of a symbol. Returns how many were placed.
fn place_symbol<R: Rng + ?Sized>(
    slots: &mut [Vec<Option<Symbol>>],
    placement: &Placement,
    attempt_cap: u32,
    rng: &mut R,
) -> usize {
    let rows = slots.len();
    let cols = slots.first().map_or(0, |row| row.len());
    if rows == 0 || cols == 0 {
        return 0;
    }

    let mut remaining = placement.count;
    let mut attempts = 0;
    while remaining > 0 && attempts < attempt_cap {
        let pos = Position::new(rng.random_range(0..rows), rng.random_range(0..cols));
        if slots[pos.row][pos.col].is_some() {
            attempts += 1;
            continue;
        }
        slots[pos.row][pos.col] = Some(placement.symbol);
        remaining -= 1;

        if placement.cluster {
            let mut neighbors = neighbors_within(rows, cols, pos);
            neighbors.shuffle(rng);
            for n in neighbors {
                if remaining == 0 {
                    break;
                }
                if slots[n.row][n.col].is_none() {
                    slots[n.row][n.col] = Some(placement.symbol);
                    remaining -= 1;
                }
            }
        }
    }
    placement.count - remaining
}
