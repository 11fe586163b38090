//! Spatial join folds: proximity enrichment and area-weighted averaging.
//!
//! Both folds consume candidate documents fetched through a coarse
//! geographic filter, reproject them into the parcel's planar CRS and
//! compute exact metrics there. The coarse filter only narrows the
//! candidate set; inclusion is decided here.

use geo::{Geometry, Intersects};

use parcelgis_core::crs::CrsId;
use parcelgis_core::error::Result;
use parcelgis_core::models::{CandidateDocument, EnrichmentRecord, SpatialCandidate};

use crate::transform::TransformEngine;
use crate::{buffer, spatial};

/// Keep every candidate within `search_distance` meters of the parcel and
/// report distance and intersection details, in fetch order.
///
/// `parcel` must already be reprojected into `target_crs`; candidate
/// geometries arrive geographic and are reprojected here. A candidate
/// exactly at the search distance is included.
pub fn enrich_candidates(
    transforms: &TransformEngine,
    parcel: &Geometry<f64>,
    source_crs: CrsId,
    target_crs: CrsId,
    documents: Vec<CandidateDocument>,
    search_distance: f64,
) -> Result<Vec<EnrichmentRecord>> {
    let mut records = Vec::new();
    for document in documents {
        let reprojected = transforms.reproject(&document.geometry, source_crs, target_crs)?;
        let candidate = SpatialCandidate::from_document(document, reprojected, None);

        let distance = spatial::planar_distance(parcel, &candidate.geometry);
        if distance > search_distance {
            continue;
        }

        let intersects = parcel.intersects(&candidate.geometry);
        let intersection =
            intersects.then(|| spatial::intersection_metric(parcel, &candidate.geometry));
        records.push(EnrichmentRecord {
            id: candidate.id.clone(),
            intersects,
            min_distance: distance,
            intersection,
            wkt_type: spatial::wkt_type(&candidate.geometry).to_string(),
            properties: candidate.cleaned_properties(),
        });
    }
    Ok(records)
}

/// Area-weighted average of cell values over the parcel footprint.
///
/// Cells are expanded to `resolution`-sized squares, the parcel gets a
/// `resolution / 4` smoothing buffer, and each cell contributes its overlap
/// area as weight. Returns `None` when nothing overlaps; the weighted mean
/// is rounded to six decimals.
pub fn weighted_average(
    transforms: &TransformEngine,
    parcel: &Geometry<f64>,
    source_crs: CrsId,
    target_crs: CrsId,
    documents: Vec<CandidateDocument>,
    resolution: f64,
    value_attribute: &str,
) -> Result<Option<f64>> {
    let smoothed = buffer::planar_buffer(parcel, resolution / 4.0)?;

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for document in documents {
        let reprojected = transforms.reproject(&document.geometry, source_crs, target_crs)?;
        let candidate =
            SpatialCandidate::from_document(document, reprojected, Some(value_attribute));

        let Some(value) = candidate.value else {
            tracing::warn!(
                candidate = ?candidate.id,
                attribute = value_attribute,
                "skipping candidate without a numeric value"
            );
            continue;
        };

        let cell = buffer::cell_square(&candidate.geometry, resolution)?;
        let overlap = spatial::overlap_area(&smoothed, &Geometry::Polygon(cell));
        weighted_sum += overlap * value;
        total_weight += overlap;
    }

    if total_weight == 0.0 {
        return Ok(None);
    }
    Ok(Some(round_decimals(weighted_sum / total_weight)))
}

/// Round to six decimals, half away from zero.
fn round_decimals(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
