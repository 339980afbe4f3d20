// Endpoint classifier: labels how a segment touches a junction and keeps the
// segment-side bookkeeping (track/endtrack/passability) in sync.

use crate::geometry::tolerance::{MERGE_TOL, PASS_END, PASS_MIDDLE, PASS_START};
use crate::model::{
    Contribution, EndpointClass, Junction, JunctionId, Point, Segment, SegmentId,
};

/// Exactly one of Start/End/Middle holds for any (segment, junction) pair.
/// A degenerate segment with both endpoints in tolerance gets the nearer one.
pub fn classify_endpoint(seg: &Segment, pos: Point) -> EndpointClass {
    let d_start = seg.a.dist(pos);
    let d_end = seg.b.dist(pos);
    let near_start = d_start < MERGE_TOL;
    let near_end = d_end < MERGE_TOL;
    match (near_start, near_end) {
        (true, true) => {
            if d_start <= d_end {
                EndpointClass::Start
            } else {
                EndpointClass::End
            }
        }
        (true, false) => EndpointClass::Start,
        (false, true) => EndpointClass::End,
        (false, false) => EndpointClass::Middle,
    }
}

fn record(seg: &mut Segment, junction: JunctionId, class: EndpointClass) {
    match class {
        EndpointClass::Start => {
            if !seg.track.contains(&junction) {
                seg.track.push(junction);
            }
            seg.passability.insert(junction, PASS_START);
        }
        EndpointClass::End => {
            if !seg.endtrack.contains(&junction) {
                seg.endtrack.push(junction);
            }
            seg.passability.insert(junction, PASS_END);
        }
        EndpointClass::Middle => {
            seg.passability.insert(junction, PASS_MIDDLE);
        }
    }
}

fn classify_one(
    segments: &mut [Option<Segment>],
    seg_id: SegmentId,
    junction: JunctionId,
    pos: Point,
) -> Option<EndpointClass> {
    let seg = segments.get_mut(seg_id as usize)?.as_mut()?;
    let class = classify_endpoint(seg, pos);
    record(seg, junction, class);
    Some(class)
}

/// Annotates every contribution of every junction with endpoint classes and
/// updates segment bookkeeping. Contributions referencing deleted segments
/// are left untouched; the propagator skips them the same way.
pub fn classify_junctions(segments: &mut [Option<Segment>], junctions: &mut [Junction]) {
    for junction in junctions.iter_mut() {
        let jid = junction.id;
        let pos = junction.pos;
        for contribution in junction.contributions.iter_mut() {
            match contribution {
                Contribution::SegSeg {
                    seg_a,
                    seg_b,
                    end_a,
                    end_b,
                } => {
                    if let Some(c) = classify_one(segments, *seg_a, jid, pos) {
                        *end_a = c;
                    }
                    if let Some(c) = classify_one(segments, *seg_b, jid, pos) {
                        *end_b = c;
                    }
                }
                Contribution::SegShape { seg, end, .. } => {
                    if let Some(c) = classify_one(segments, *seg, jid, pos) {
                        *end = c;
                    }
                }
            }
        }
    }
}
