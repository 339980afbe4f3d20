// Resistance propagator: bounded fixed-point relaxation. Resistance flows
// from segments arriving at a junction by their end into segments departing
// by their start. Each pass computes every junction's update from a snapshot
// of the values at pass start, then applies them, so junction order cannot
// bias a pass. Cyclic networks may never stabilize; the pass ceiling bounds
// runtime and the last values are kept as best effort.

use crate::geometry::tolerance::{MAX_PASSES, TR_EPS};
use crate::model::{
    Contribution, EndpointClass, Junction, JunctionPattern, Segment, SegmentId, Shape,
};
use log::{debug, warn};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagationReport {
    pub passes: u32,
    pub converged: bool,
}

// Start/end/middle segment ids at one junction, deduplicated across its
// contributions. Stale references are dropped here: a deleted segment or
// shape means "no influence", never a fault.
struct Grouping {
    starts: Vec<SegmentId>,
    ends: Vec<SegmentId>,
    override_value: Option<f32>,
}

fn group_junction(
    junction: &Junction,
    segments: &[Option<Segment>],
    shapes: &[Option<Shape>],
) -> Grouping {
    let mut starts: Vec<SegmentId> = Vec::new();
    let mut ends: Vec<SegmentId> = Vec::new();
    let mut override_value: Option<f32> = None;

    let mut add = |id: SegmentId, class: EndpointClass, starts: &mut Vec<SegmentId>, ends: &mut Vec<SegmentId>| {
        if segments.get(id as usize).map_or(true, |s| s.is_none()) {
            return;
        }
        match class {
            EndpointClass::Start => {
                if !starts.contains(&id) {
                    starts.push(id);
                }
            }
            EndpointClass::End => {
                if !ends.contains(&id) {
                    ends.push(id);
                }
            }
            EndpointClass::Middle => {}
        }
    };

    for contribution in &junction.contributions {
        match *contribution {
            Contribution::SegSeg {
                seg_a,
                seg_b,
                end_a,
                end_b,
            } => {
                add(seg_a, end_a, &mut starts, &mut ends);
                add(seg_b, end_b, &mut starts, &mut ends);
            }
            Contribution::SegShape {
                seg, shape, end, ..
            } => {
                add(seg, end, &mut starts, &mut ends);
                if override_value.is_none() {
                    if let Some(Some(shape)) = shapes.get(shape as usize) {
                        override_value = shape.air_value;
                    }
                }
            }
        }
    }

    Grouping {
        starts,
        ends,
        override_value,
    }
}

fn pattern_of(grouping: &Grouping) -> JunctionPattern {
    if let Some(v) = grouping.override_value {
        return JunctionPattern::Override(v);
    }
    match (grouping.ends.len(), grouping.starts.len()) {
        (1, 1) => JunctionPattern::OneToOne,
        (1, n) if n > 1 => JunctionPattern::FanOut,
        (e, n) if e >= 2 && n >= 1 => JunctionPattern::FanIn,
        _ => JunctionPattern::NoRule,
    }
}

pub fn propagate(
    segments: &mut [Option<Segment>],
    shapes: &[Option<Shape>],
    junctions: &[Junction],
) -> PropagationReport {
    let mut passes = 0u32;
    let mut converged = false;

    while passes < MAX_PASSES {
        passes += 1;

        let before: Vec<Option<f32>> = segments
            .iter()
            .map(|s| s.as_ref().map(|s| s.tr))
            .collect();
        let tr_of = |id: SegmentId| -> f32 {
            before
                .get(id as usize)
                .copied()
                .flatten()
                .unwrap_or_default()
        };

        // Later junctions win on conflicting targets; junction order is the
        // deterministic rebuild order, so reruns agree.
        let mut updates: HashMap<SegmentId, f32> = HashMap::new();
        for junction in junctions {
            let grouping = group_junction(junction, segments, shapes);
            match pattern_of(&grouping) {
                JunctionPattern::Override(v) => {
                    for &id in &grouping.starts {
                        updates.insert(id, v);
                    }
                }
                JunctionPattern::OneToOne => {
                    updates.insert(grouping.starts[0], tr_of(grouping.ends[0]));
                }
                JunctionPattern::FanOut => {
                    let share = tr_of(grouping.ends[0]) / grouping.starts.len() as f32;
                    for &id in &grouping.starts {
                        updates.insert(id, share);
                    }
                }
                JunctionPattern::FanIn => {
                    let sum: f32 = grouping.ends.iter().map(|&id| tr_of(id)).sum();
                    let share = sum / grouping.starts.len() as f32;
                    for &id in &grouping.starts {
                        updates.insert(id, share);
                    }
                }
                JunctionPattern::NoRule => {}
            }
        }

        let mut changed = false;
        for (&id, &tr) in &updates {
            if let Some(Some(seg)) = segments.get_mut(id as usize) {
                if (seg.tr - tr).abs() > TR_EPS {
                    seg.tr = tr;
                    changed = true;
                }
            }
        }

        if !changed {
            converged = true;
            break;
        }
    }

    if converged {
        debug!("propagation converged after {} pass(es)", passes);
    } else {
        warn!("propagation hit the {} pass ceiling without converging", MAX_PASSES);
    }
    PropagationReport { passes, converged }
}
