//! Radial allocation chart for a contract's committed quantity
//!
//! Partitions a contract's fixed quantity proportionally across its
//! sub-contracts and produces renderable angular segments plus the SVG
//! donut-slice geometry. Angles are degrees measured from the top of the
//! ring, clockwise.

use serde::{Deserialize, Serialize};

use crate::models::SubContractRecord;
use crate::reconcile::percentage_of;
use crate::types::DisplayColor;

/// One renderable slice of the allocation ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSegment {
    /// Id of the sub-contract this slice represents.
    pub source_id: String,
    pub label: String,
    /// Reserved quantity the slice stands for, in the contract's unit.
    pub value: f64,
    pub color: DisplayColor,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Segment list plus the clamped aggregate for the center label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationChart {
    pub segments: Vec<AllocationSegment>,
    /// `min(100, sum(reserved) / fixed * 100)`; 0 when `fixed` is 0.
    pub total_percentage: f64,
}

/// Partition `fixed` across the records' reserved quantities.
///
/// Segments receive contiguous, non-overlapping angle ranges in input-list
/// order so the legend order and the visual order stay aligned. Records
/// with `reserved <= 0` contribute no segment rather than a degenerate
/// zero-width arc. The ring saturates at a full turn: once the cumulative
/// sweep reaches 360° (over-allocated contract), later records are
/// truncated or dropped.
pub fn build_segments(records: &[SubContractRecord], fixed: f64) -> Vec<AllocationSegment> {
    let mut cursor = 0.0;
    records
        .iter()
        .filter_map(|record| {
            let share = percentage_of(record.reserved, fixed);
            let angle = share / 100.0 * 360.0;
            let start_angle = cursor;
            let end_angle = (cursor + angle).min(360.0);
            if end_angle <= start_angle {
                return None;
            }
            cursor = end_angle;
            Some(AllocationSegment {
                source_id: record.id.clone(),
                label: record.contract_number.clone(),
                value: record.reserved,
                color: record.color.clone(),
                start_angle,
                end_angle,
            })
        })
        .collect()
}

/// Build the full chart: segments plus the center-label aggregate.
pub fn build_chart(records: &[SubContractRecord], fixed: f64) -> AllocationChart {
    let reserved_sum: f64 = records.iter().map(|r| r.reserved).sum();
    AllocationChart {
        segments: build_segments(records, fixed),
        total_percentage: percentage_of(reserved_sum, fixed),
    }
}

/// Point at `angle_deg` (from the top, clockwise) on a circle of `radius`
/// centered at `(cx, cy)`.
pub fn polar_point(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let radians = angle_deg.to_radians();
    (cx + radius * radians.sin(), cy - radius * radians.cos())
}

/// SVG path for a filled donut slice between `inner_radius` and
/// `outer_radius`: the outer arc, a line to the inner ring, the inner arc
/// traversed backward, and a closing line.
pub fn donut_slice_path(
    cx: f64,
    cy: f64,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    let large_arc = if end_angle - start_angle > 180.0 { 1 } else { 0 };
    let (outer_start_x, outer_start_y) = polar_point(cx, cy, outer_radius, start_angle);
    let (outer_end_x, outer_end_y) = polar_point(cx, cy, outer_radius, end_angle);
    let (inner_end_x, inner_end_y) = polar_point(cx, cy, inner_radius, end_angle);
    let (inner_start_x, inner_start_y) = polar_point(cx, cy, inner_radius, start_angle);

    format!(
        "M {outer_start_x:.3} {outer_start_y:.3} \
         A {outer_radius:.3} {outer_radius:.3} 0 {large_arc} 1 {outer_end_x:.3} {outer_end_y:.3} \
         L {inner_end_x:.3} {inner_end_y:.3} \
         A {inner_radius:.3} {inner_radius:.3} 0 {large_arc} 0 {inner_start_x:.3} {inner_start_y:.3} \
         Z"
    )
}
