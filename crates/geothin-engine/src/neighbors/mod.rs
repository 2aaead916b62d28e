//! NeighborFinder: radius queries over record coordinates.
//!
//! One R*-tree per stratum (or one for everything), bulk-loaded, then one
//! radius query per point in parallel. Only pairs with `a < b` are kept so
//! each neighbor relation is reported once. Records in different strata are
//! never indexed together, so they never become neighbors.

pub mod geodesy;

use std::collections::BTreeMap;

use geothin_core::constants::INDEX_QUERY_SLACK;
use geothin_core::types::{DistanceMode, RecordId, StratumId};
use rayon::prelude::*;
use rstar::primitives::GeomWithData;
use rstar::{Point, RTree};

use crate::types::NeighborEdge;

/// Finds all pairs closer than `radius`.
#[derive(Debug, Clone, Copy)]
pub struct NeighborFinder {
    mode: DistanceMode,
    radius: f64,
}

impl NeighborFinder {
    /// `radius` is in coordinate units (planar) or metres (geographic).
    pub fn new(mode: DistanceMode, radius: f64) -> Self {
        Self { mode, radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance between two `[x, y]` points under this finder's mode.
    pub fn distance(&self, p: [f64; 2], q: [f64; 2]) -> f64 {
        distance(self.mode, p, q)
    }

    /// All neighbor pairs among `points` (indexed by `RecordId`), sorted by
    /// `(a, b)`. With `strata`, pairs are only formed within a stratum.
    pub fn find(&self, points: &[[f64; 2]], strata: Option<&[StratumId]>) -> Vec<NeighborEdge> {
        let mut edges: Vec<NeighborEdge> = match strata {
            None => {
                let members: Vec<RecordId> = (0..points.len()).map(RecordId::from_index).collect();
                self.find_among(points, &members)
            }
            Some(strata) => {
                let mut by_stratum: BTreeMap<StratumId, Vec<RecordId>> = BTreeMap::new();
                for (index, &stratum) in strata.iter().enumerate() {
                    by_stratum
                        .entry(stratum)
                        .or_default()
                        .push(RecordId::from_index(index));
                }
                by_stratum
                    .into_values()
                    .collect::<Vec<_>>()
                    .par_iter()
                    .flat_map_iter(|members| self.find_among(points, members))
                    .collect()
            }
        };

        edges.par_sort_unstable_by_key(|e| (e.a, e.b));
        edges
    }

    fn find_among(&self, points: &[[f64; 2]], members: &[RecordId]) -> Vec<NeighborEdge> {
        if members.len() < 2 {
            return Vec::new();
        }
        match self.mode {
            DistanceMode::Planar => {
                let padded = self.radius * (1.0 + INDEX_QUERY_SLACK);
                query_tree(
                    members,
                    |id| points[id.index()],
                    padded * padded,
                    |a, b| planar_distance(points[a.index()], points[b.index()]),
                    self.radius,
                )
            }
            DistanceMode::Geographic => {
                let chord = geodesy::chord_for_arc(self.radius) * (1.0 + INDEX_QUERY_SLACK);
                query_tree(
                    members,
                    |id| geodesy::unit_vector(points[id.index()]),
                    chord * chord,
                    |a, b| geodesy::haversine_m(points[a.index()], points[b.index()]),
                    self.radius,
                )
            }
        }
    }
}

/// Distance between two `[x, y]` points under `mode`.
pub fn distance(mode: DistanceMode, p: [f64; 2], q: [f64; 2]) -> f64 {
    match mode {
        DistanceMode::Planar => planar_distance(p, q),
        DistanceMode::Geographic => geodesy::haversine_m(p, q),
    }
}

fn planar_distance(p: [f64; 2], q: [f64; 2]) -> f64 {
    (p[0] - q[0]).hypot(p[1] - q[1])
}

/// Index `members` at `embed(id)`, query each one within `squared_radius`
/// in index space, and keep candidates whose exact distance is `< radius`.
fn query_tree<P, E, D>(
    members: &[RecordId],
    embed: E,
    squared_radius: f64,
    exact: D,
    radius: f64,
) -> Vec<NeighborEdge>
where
    P: Point<Scalar = f64> + Send + Sync,
    E: Fn(RecordId) -> P + Sync,
    D: Fn(RecordId, RecordId) -> f64 + Sync,
{
    let tree = RTree::bulk_load(
        members
            .iter()
            .map(|&id| GeomWithData::new(embed(id), id))
            .collect(),
    );

    members
        .par_iter()
        .flat_map_iter(|&id| {
            let mut found: Vec<NeighborEdge> = tree
                .locate_within_distance(embed(id), squared_radius)
                .filter(|candidate| candidate.data > id)
                .filter_map(|candidate| {
                    let d = exact(id, candidate.data);
                    (d < radius).then(|| NeighborEdge::new(id, candidate.data, d))
                })
                .collect();
            found.sort_unstable_by_key(|e| e.b);
            found
        })
        .collect()
}
