//! Headless network core for mine-ventilation schematics.
//!
//! Users draw duct segments and place rotatable equipment shapes; this crate
//! owns the geometry pipeline that turns that picture into a network:
//! intersection detection, junction clustering, segment splitting, endpoint
//! classification and the bounded resistance relaxation. Rendering, UI and
//! export are collaborators that consume [`snapshot::NetworkSnapshot`] and
//! drive the mutators on [`Network`]; they never reach inside.

pub mod error;
pub mod model;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod project;
    pub mod rect;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod classify;
    pub mod cluster;
    pub mod detect;
    pub mod propagate;
    pub mod split;
}
pub mod snapshot;

use algorithms::classify::classify_junctions;
use algorithms::cluster::cluster_candidates;
use algorithms::detect::{detect_candidates, RawCandidate};
use algorithms::propagate::{propagate, PropagationReport};
use algorithms::split::split_segments;
use error::NetworkError;
use geometry::intersect::segment_intersection;
use geometry::limits::{in_coord_bounds, in_dim_bounds, in_width_bounds};
use geometry::project::point_on_segment;
use geometry::tolerance::{MERGE_TOL, ON_SEGMENT_TOL, TR_DEFAULT};
use log::debug;
use model::{
    Contribution, EndpointClass, IdAllocator, Junction, Point, SegEnd, Segment, SegmentId,
    SegmentMeta, SegmentStyle, Shape, ShapeId,
};
use snapshot::{snapshot_impl, to_json_impl, NetworkSnapshot};
use std::collections::HashMap;

pub struct Network {
    // Slot arenas: id is the index, deletion leaves a None, ids are never
    // reused within a session.
    segments: Vec<Option<Segment>>,
    shapes: Vec<Option<Shape>>,
    // Rebuilt wholesale by recompute_network; ids from the allocator are
    // session-unique, so compare junctions by position/structure, not id.
    junctions: Vec<Junction>,
    junction_ids: IdAllocator,
    last_propagation: Option<PropagationReport>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    pub fn new() -> Self {
        Network {
            segments: Vec::new(),
            shapes: Vec::new(),
            junctions: Vec::new(),
            junction_ids: IdAllocator::new(),
            last_propagation: None,
        }
    }

    /// Drops all entities and restarts junction numbering. The only way the
    /// allocator ever goes backwards.
    pub fn reset(&mut self) {
        self.segments.clear();
        self.shapes.clear();
        self.junctions.clear();
        self.junction_ids.reset();
        self.last_propagation = None;
    }

    // ---- segments ----

    /// Completes a draw gesture. Rejects malformed input at the boundary;
    /// the returned id may be retired right away if the new segment crosses
    /// existing ones, since drawing auto-splits both sides.
    pub fn add_segment(
        &mut self,
        a: Point,
        b: Point,
        style: SegmentStyle,
    ) -> Result<SegmentId, NetworkError> {
        Self::check_point(a)?;
        Self::check_point(b)?;
        if !in_width_bounds(style.width) {
            return Err(NetworkError::BadWidth { width: style.width });
        }
        let length = a.dist(b);
        if length <= MERGE_TOL {
            return Err(NetworkError::SegmentTooShort {
                length,
                min: MERGE_TOL,
            });
        }

        let id = self.segments.len() as SegmentId;
        self.segments.push(Some(Segment {
            a,
            b,
            style,
            meta: SegmentMeta::default(),
            tr: TR_DEFAULT,
            track: Vec::new(),
            endtrack: Vec::new(),
            passability: HashMap::new(),
        }));
        self.autosplit_around(id);
        Ok(id)
    }

    pub fn delete_segment(&mut self, id: SegmentId) -> bool {
        if let Some(slot) = self.segments.get_mut(id as usize) {
            if slot.is_some() {
                *slot = None;
                return true;
            }
        }
        false
    }

    /// Moves one endpoint of a live segment. Fails if the result would be
    /// degenerate or out of bounds.
    pub fn move_endpoint(&mut self, id: SegmentId, which: SegEnd, pos: Point) -> bool {
        if Self::check_point(pos).is_err() {
            return false;
        }
        let Some(Some(seg)) = self.segments.get_mut(id as usize) else {
            return false;
        };
        let other = match which {
            SegEnd::A => seg.b,
            SegEnd::B => seg.a,
        };
        if pos.dist(other) <= MERGE_TOL {
            return false;
        }
        match which {
            SegEnd::A => seg.a = pos,
            SegEnd::B => seg.b = pos,
        }
        true
    }

    pub fn set_segment_meta(&mut self, id: SegmentId, meta: SegmentMeta) -> bool {
        match self.segments.get_mut(id as usize) {
            Some(Some(seg)) => {
                seg.meta = meta;
                true
            }
            _ => false,
        }
    }

    /// Manual resistance override; re-runs propagation over the junctions as
    /// they stand so dependent segments pick the value up immediately.
    pub fn set_segment_tr(&mut self, id: SegmentId, tr: f32) -> bool {
        if !tr.is_finite() {
            return false;
        }
        match self.segments.get_mut(id as usize) {
            Some(Some(seg)) => {
                seg.tr = tr;
                self.repropagate();
                true
            }
            _ => false,
        }
    }

    // ---- shapes ----

    pub fn add_shape(
        &mut self,
        kind: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<ShapeId, NetworkError> {
        let center = Point::new(x, y);
        Self::check_point(center)?;
        if !in_dim_bounds(width) || !in_dim_bounds(height) {
            return Err(NetworkError::BadDimensions { width, height });
        }
        let id = self.shapes.len() as ShapeId;
        self.shapes.push(Some(Shape {
            center,
            width,
            height,
            rotation_deg: 0.0,
            air_value: None,
            kind: kind.to_string(),
            label: kind.to_string(),
        }));
        Ok(id)
    }

    /// Deleting equipment invalidates the junctions it contributed to, so
    /// the network is rebuilt on the spot.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        if let Some(slot) = self.shapes.get_mut(id as usize) {
            if slot.is_some() {
                *slot = None;
                self.recompute_network();
                return true;
            }
        }
        false
    }

    pub fn set_shape_rotation(&mut self, id: ShapeId, degrees: f32) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        match self.shapes.get_mut(id as usize) {
            Some(Some(shape)) => {
                shape.rotation_deg = degrees;
                true
            }
            _ => false,
        }
    }

    pub fn set_shape_label(&mut self, id: ShapeId, label: &str) -> bool {
        match self.shapes.get_mut(id as usize) {
            Some(Some(shape)) => {
                shape.label = label.to_string();
                true
            }
            _ => false,
        }
    }

    /// Sets or clears the equipment resistance override and re-runs
    /// propagation so departures from its junction take the new value.
    pub fn set_shape_air_value(&mut self, id: ShapeId, value: Option<f32>) -> bool {
        if let Some(v) = value {
            if !v.is_finite() {
                return false;
            }
        }
        match self.shapes.get_mut(id as usize) {
            Some(Some(shape)) => {
                shape.air_value = value;
                self.repropagate();
                true
            }
            _ => false,
        }
    }

    // ---- pipeline ----

    /// Full rebuild: detect, cluster, split, re-detect, classify, propagate.
    /// Atomic from the caller's view; junctions are always rederived from
    /// the current segment/shape state, never patched.
    pub fn recompute_network(&mut self) {
        for seg in self.segments.iter_mut().flatten() {
            seg.clear_bookkeeping();
        }

        // Pass one establishes where to cut.
        let candidates = detect_candidates(&self.segments, &self.shapes);
        let sites: Vec<Point> = cluster_candidates(&candidates)
            .iter()
            .map(|p| p.pos)
            .collect();
        let outcome = split_segments(&mut self.segments, &sites);
        if outcome.parents_split > 0 {
            debug!(
                "recompute split {} segment(s) into {}",
                outcome.parents_split, outcome.children_created
            );
        }

        // Pass two derives junctions over the split geometry, so every
        // contribution references a live segment at build time.
        let candidates = detect_candidates(&self.segments, &self.shapes);
        let protos = cluster_candidates(&candidates);
        let mut junctions = Vec::with_capacity(protos.len());
        for proto in protos {
            junctions.push(Junction {
                id: self.junction_ids.alloc(),
                pos: proto.pos,
                contributions: proto
                    .candidates
                    .into_iter()
                    .map(contribution_from)
                    .collect(),
            });
        }
        self.junctions = junctions;

        classify_junctions(&mut self.segments, &mut self.junctions);
        self.repropagate();
    }

    fn repropagate(&mut self) {
        let report = propagate(&mut self.segments, &self.shapes, &self.junctions);
        self.last_propagation = Some(report);
    }

    // Splits the freshly drawn segment and whatever it crosses, using the
    // same splitter the full recompute uses. Junctions are not rebuilt here;
    // that stays with recompute_network.
    fn autosplit_around(&mut self, id: SegmentId) {
        let Some(Some(new_seg)) = self.segments.get(id as usize) else {
            return;
        };
        let (na, nb) = (new_seg.a, new_seg.b);
        let mut candidates: Vec<RawCandidate> = Vec::new();
        for (other_id, other) in self.segments_iter() {
            if other_id == id {
                continue;
            }
            let Some(pt) = segment_intersection(na, nb, other.a, other.b) else {
                continue;
            };
            if point_on_segment(pt, na, nb, ON_SEGMENT_TOL)
                && point_on_segment(pt, other.a, other.b, ON_SEGMENT_TOL)
            {
                candidates.push(RawCandidate::SegSeg {
                    at: pt,
                    seg_a: id,
                    seg_b: other_id,
                });
            }
        }
        if candidates.is_empty() {
            return;
        }
        let sites: Vec<Point> = cluster_candidates(&candidates)
            .iter()
            .map(|p| p.pos)
            .collect();
        split_segments(&mut self.segments, &sites);
    }

    // ---- read side ----

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id as usize).and_then(|s| s.as_ref())
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id as usize).and_then(|s| s.as_ref())
    }

    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    pub fn segments_iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i as SegmentId, s)))
    }

    pub fn shapes_iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i as ShapeId, s)))
    }

    pub fn segment_count(&self) -> u32 {
        self.segments.iter().filter(|s| s.is_some()).count() as u32
    }

    pub fn shape_count(&self) -> u32 {
        self.shapes.iter().filter(|s| s.is_some()).count() as u32
    }

    pub fn junction_count(&self) -> u32 {
        self.junctions.len() as u32
    }

    /// Pass count and convergence flag of the most recent propagation run.
    /// Non-convergence is not an error; this is the debug channel for it.
    pub fn last_propagation(&self) -> Option<PropagationReport> {
        self.last_propagation
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        snapshot_impl(self)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        to_json_impl(self)
    }

    fn check_point(p: Point) -> Result<(), NetworkError> {
        if in_coord_bounds(p.x) && in_coord_bounds(p.y) {
            Ok(())
        } else {
            Err(NetworkError::BadCoordinate { x: p.x, y: p.y })
        }
    }
}

fn contribution_from(candidate: RawCandidate) -> Contribution {
    match candidate {
        RawCandidate::SegSeg { seg_a, seg_b, .. } => Contribution::SegSeg {
            seg_a,
            seg_b,
            end_a: EndpointClass::Middle,
            end_b: EndpointClass::Middle,
        },
        RawCandidate::SegShape {
            seg, shape, side, ..
        } => Contribution::SegShape {
            seg,
            shape,
            end: EndpointClass::Middle,
            side,
        },
    }
}
