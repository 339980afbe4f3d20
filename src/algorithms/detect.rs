// Intersection detector: enumerates raw junction candidates over every
// unordered segment pair and every segment x shape-side pair. Pure; O(N^2 +
// N*M) with no spatial index — schematic sizes keep this cheap, and a grid
// bucket pass is the obvious extension point if that changes.

use crate::geometry::intersect::segment_intersection;
use crate::geometry::project::point_on_segment;
use crate::geometry::rect::rotated_rectangle_sides;
use crate::geometry::tolerance::ON_SEGMENT_TOL;
use crate::model::{Point, Segment, SegmentId, Shape, ShapeId};

#[derive(Clone, Copy, Debug)]
pub enum RawCandidate {
    SegSeg {
        at: Point,
        seg_a: SegmentId,
        seg_b: SegmentId,
    },
    SegShape {
        at: Point,
        seg: SegmentId,
        shape: ShapeId,
        side: u8,
    },
}

impl RawCandidate {
    pub fn at(&self) -> Point {
        match *self {
            RawCandidate::SegSeg { at, .. } => at,
            RawCandidate::SegShape { at, .. } => at,
        }
    }
}

pub fn detect_candidates(
    segments: &[Option<Segment>],
    shapes: &[Option<Shape>],
) -> Vec<RawCandidate> {
    let mut out = Vec::new();

    let live: Vec<(SegmentId, &Segment)> = segments
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.as_ref().map(|s| (i as SegmentId, s)))
        .collect();

    for (i, &(id_a, sa)) in live.iter().enumerate() {
        for &(id_b, sb) in live.iter().skip(i + 1) {
            let Some(pt) = segment_intersection(sa.a, sa.b, sb.a, sb.b) else {
                continue;
            };
            // The parametric hit must also survive the clamped distance test
            // on both parents; this filters grazing near-parallel solutions.
            if point_on_segment(pt, sa.a, sa.b, ON_SEGMENT_TOL)
                && point_on_segment(pt, sb.a, sb.b, ON_SEGMENT_TOL)
            {
                out.push(RawCandidate::SegSeg {
                    at: pt,
                    seg_a: id_a,
                    seg_b: id_b,
                });
            }
        }
    }

    for (shape_id, shape) in shapes.iter().enumerate() {
        let Some(shape) = shape else { continue };
        let sides = rotated_rectangle_sides(shape);
        for &(seg_id, seg) in &live {
            for side in &sides {
                let Some(pt) = segment_intersection(seg.a, seg.b, side.a, side.b) else {
                    continue;
                };
                if point_on_segment(pt, seg.a, seg.b, ON_SEGMENT_TOL)
                    && point_on_segment(pt, side.a, side.b, ON_SEGMENT_TOL)
                {
                    out.push(RawCandidate::SegShape {
                        at: pt,
                        seg: seg_id,
                        shape: shape_id as ShapeId,
                        side: side.index,
                    });
                }
            }
        }
    }

    out
}
