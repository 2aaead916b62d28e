//! Input validation: turns the raw tables into dense, engine-ready arrays.
//!
//! Everything indexed here is by input row. The priority order re-indexes
//! it afterwards.

use geothin_core::config::ThinningParams;
use geothin_core::errors::ValidationError;
use geothin_core::models::{AttributeValue, RecordRow, ThinningInput};
use geothin_core::types::collections::{FxHashMap, FxHashSet};
use geothin_core::types::{CategoryId, DistanceMode, SimilarityMetric, StratumId};

use crate::types::Composition;

/// Validated input, indexed by input row.
#[derive(Debug, Clone)]
pub struct PreparedInput {
    /// `[x, y]`; `[lon, lat]` in geographic mode.
    pub points: Vec<[f64; 2]>,
    pub compositions: Vec<Composition>,
    /// Interned stratum per row, when stratification is configured.
    pub strata: Option<Vec<StratumId>>,
    /// Ranking value per row, when the policy uses one. `None` = missing.
    pub ranking: Option<Vec<Option<f64>>>,
    /// `CategoryId` → category name.
    pub categories: Vec<String>,
}

impl PreparedInput {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Validate both tables against `params`.
///
/// Fails on the first problem found, scanning records before compositions.
pub fn prepare(input: &ThinningInput, params: &ThinningParams) -> Result<PreparedInput, ValidationError> {
    let records = &input.records;
    if records.is_empty() {
        return Err(ValidationError::EmptyRecordTable);
    }
    if records.len() > u32::MAX as usize {
        return Err(ValidationError::TooManyRecords {
            count: records.len(),
            max: u32::MAX as usize,
        });
    }

    let mut row_of_key: FxHashMap<&str, usize> = FxHashMap::default();
    row_of_key.reserve(records.len());
    let mut points = Vec::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        if row_of_key.insert(record.key.as_str(), row).is_some() {
            return Err(ValidationError::DuplicateRecordKey {
                key: record.key.clone(),
            });
        }
        points.push(parse_coordinates(record, params.distance_mode)?);
    }

    let strata = match params.stratum_column.as_deref() {
        Some(column) => Some(intern_strata(records, column)?),
        None => None,
    };

    let ranking = match params.ranking_attribute.as_deref() {
        Some(column) if params.policy.requires_ranking_attribute() => Some(ranking_values(records, column)?),
        _ => None,
    };

    let (compositions, categories) = build_compositions(input, &row_of_key, params.metric)?;

    Ok(PreparedInput {
        points,
        compositions,
        strata,
        ranking,
        categories,
    })
}

fn parse_coordinates(record: &RecordRow, mode: DistanceMode) -> Result<[f64; 2], ValidationError> {
    let mut point = [0.0; 2];
    for (slot, (axis, value)) in point.iter_mut().zip([("x", record.x), ("y", record.y)]) {
        let value = value.ok_or_else(|| ValidationError::MissingCoordinate {
            key: record.key.clone(),
            axis,
        })?;
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate {
                key: record.key.clone(),
                axis,
            });
        }
        *slot = value;
    }

    if mode == DistanceMode::Geographic {
        let [lon, lat] = point;
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ValidationError::CoordinateOutOfRange {
                key: record.key.clone(),
                axis: "x",
                value: lon,
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::CoordinateOutOfRange {
                key: record.key.clone(),
                axis: "y",
                value: lat,
            });
        }
    }
    Ok(point)
}

fn require_column(records: &[RecordRow], column: &str, role: &'static str) -> Result<(), ValidationError> {
    if records.iter().any(|r| r.attributes.contains_key(column)) {
        Ok(())
    } else {
        Err(ValidationError::UnknownColumn {
            column: column.to_string(),
            role,
        })
    }
}

/// Intern stratum labels in order of first appearance.
fn intern_strata(records: &[RecordRow], column: &str) -> Result<Vec<StratumId>, ValidationError> {
    require_column(records, column, "stratum")?;

    let mut ids: FxHashMap<String, StratumId> = FxHashMap::default();
    records
        .iter()
        .map(|record| {
            let label = record
                .attribute(column)
                .as_label()
                .ok_or_else(|| ValidationError::MissingStratum {
                    key: record.key.clone(),
                    column: column.to_string(),
                })?;
            let next = StratumId::from_index(ids.len());
            Ok(*ids.entry(label).or_insert(next))
        })
        .collect()
}

/// Numeric ranking values; null and NaN read as missing.
fn ranking_values(records: &[RecordRow], column: &str) -> Result<Vec<Option<f64>>, ValidationError> {
    require_column(records, column, "ranking attribute")?;

    records
        .iter()
        .map(|record| match record.attribute(column) {
            AttributeValue::Null => Ok(None),
            AttributeValue::Number(n) if n.is_nan() => Ok(None),
            AttributeValue::Number(n) => Ok(Some(*n)),
            _ => Err(ValidationError::NonNumericAttribute {
                key: record.key.clone(),
                column: column.to_string(),
            }),
        })
        .collect()
}

/// Build per-row sparse compositions and the category dictionary.
///
/// A zero weight is rejected under Bray–Curtis; under presence/absence
/// metrics it means "absent" and the row is dropped.
fn build_compositions(
    input: &ThinningInput,
    row_of_key: &FxHashMap<&str, usize>,
    metric: SimilarityMetric,
) -> Result<(Vec<Composition>, Vec<String>), ValidationError> {
    let mut entries: Vec<Vec<(CategoryId, f64)>> = vec![Vec::new(); input.records.len()];
    let mut category_ids: FxHashMap<&str, CategoryId> = FxHashMap::default();
    let mut categories: Vec<String> = Vec::new();
    let mut seen: FxHashSet<(usize, CategoryId)> = FxHashSet::default();

    for entry in &input.compositions {
        let row = *row_of_key
            .get(entry.key.as_str())
            .ok_or_else(|| ValidationError::UnknownCompositionKey {
                key: entry.key.clone(),
            })?;

        let invalid = |reason: &str| ValidationError::InvalidWeight {
            key: entry.key.clone(),
            category: entry.category.clone(),
            reason: reason.to_string(),
        };
        let weight = entry.weight.ok_or_else(|| invalid("missing"))?;
        if !weight.is_finite() {
            return Err(invalid("not finite"));
        }
        if weight < 0.0 {
            return Err(invalid("negative"));
        }
        if weight == 0.0 && !metric.is_presence_absence() {
            return Err(invalid("zero weight is not allowed under bray-curtis"));
        }

        let category = *category_ids.entry(entry.category.as_str()).or_insert_with(|| {
            categories.push(entry.category.clone());
            CategoryId::from_index(categories.len() - 1)
        });
        if !seen.insert((row, category)) {
            return Err(ValidationError::DuplicateCompositionEntry {
                key: entry.key.clone(),
                category: entry.category.clone(),
            });
        }

        if weight > 0.0 {
            entries[row].push((category, weight));
        }
    }

    if let Some(row) = entries.iter().position(Vec::is_empty) {
        return Err(ValidationError::RecordWithoutComposition {
            key: input.records[row].key.clone(),
        });
    }

    let compositions = entries.into_iter().map(Composition::from_entries).collect();
    Ok((compositions, categories))
}
