// Network splitter: cuts segments at junction sites into sub-segments.
// Children inherit style, metadata and resistance; bookkeeping starts empty
// and is repopulated by the classifier. Used both for the incremental
// auto-split on draw and for the wholesale recompute, so splitting semantics
// exist exactly once.

use crate::geometry::project::{point_on_segment, project_onto_segment};
use crate::geometry::tolerance::{MERGE_TOL, ON_SEGMENT_TOL};
use crate::model::{Point, Segment};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    pub parents_split: u32,
    pub children_created: u32,
}

pub fn split_segments(segments: &mut Vec<Option<Segment>>, sites: &[Point]) -> SplitOutcome {
    let mut outcome = SplitOutcome::default();
    let existing = segments.len();

    for idx in 0..existing {
        let Some(seg) = segments[idx].as_ref() else {
            continue;
        };
        let a = seg.a;
        let b = seg.b;

        // Cut points are the sites lying on this segment, projected onto it
        // so the children stay exactly collinear with the parent.
        let mut cuts: Vec<(f32, Point)> = Vec::new();
        for &site in sites {
            if !point_on_segment(site, a, b, ON_SEGMENT_TOL) {
                continue;
            }
            let (_, t) = project_onto_segment(site, a, b);
            let proj = Point {
                x: a.x + t * (b.x - a.x),
                y: a.y + t * (b.y - a.y),
            };
            cuts.push((t, proj));
        }
        if cuts.is_empty() {
            continue;
        }
        cuts.sort_by(|l, r| l.0.partial_cmp(&r.0).unwrap_or(std::cmp::Ordering::Equal));

        // Keep only cut points clear of the endpoints and of each other, so
        // every emitted piece exceeds the minimum length and pieces chain
        // with no gaps.
        let mut chain: Vec<Point> = vec![a];
        for &(_, p) in &cuts {
            let last = *chain.last().unwrap();
            if p.dist(last) > MERGE_TOL && p.dist(b) > MERGE_TOL {
                chain.push(p);
            }
        }
        if chain.len() == 1 {
            // Every site collapsed into an endpoint; the segment passes
            // through unchanged under its original id.
            continue;
        }
        chain.push(b);

        let Some(parent) = segments[idx].take() else {
            continue;
        };
        outcome.parents_split += 1;
        for w in chain.windows(2) {
            segments.push(Some(Segment {
                a: w[0],
                b: w[1],
                style: parent.style,
                meta: parent.meta,
                tr: parent.tr,
                track: Vec::new(),
                endtrack: Vec::new(),
                passability: HashMap::new(),
            }));
            outcome.children_created += 1;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tolerance::TR_DEFAULT;
    use crate::model::{SegmentMeta, SegmentStyle};
    use approx::assert_relative_eq;

    fn seg(ax: f32, ay: f32, bx: f32, by: f32, tr: f32) -> Option<Segment> {
        Some(Segment {
            a: Point::new(ax, ay),
            b: Point::new(bx, by),
            style: SegmentStyle { color: None, width: 3.0 },
            meta: SegmentMeta {
                height: Some(2.5),
                ..Default::default()
            },
            tr,
            track: vec![99],
            endtrack: Vec::new(),
            passability: HashMap::new(),
        })
    }

    fn live(segments: &[Option<Segment>]) -> Vec<&Segment> {
        segments.iter().filter_map(|s| s.as_ref()).collect()
    }

    #[test]
    fn midpoint_cut_replaces_parent() {
        let mut segs = vec![seg(0.0, 0.0, 100.0, 0.0, 42.0)];
        let out = split_segments(&mut segs, &[Point::new(50.0, 1.0)]);
        assert_eq!(out, SplitOutcome { parents_split: 1, children_created: 2 });
        assert!(segs[0].is_none(), "parent id retired");
        let children = live(&segs);
        assert_eq!(children.len(), 2);
        // Children inherit tr/style/meta but not bookkeeping.
        for c in &children {
            assert_relative_eq!(c.tr, 42.0);
            assert_eq!(c.meta.height, Some(2.5));
            assert!(c.track.is_empty());
        }
        let total: f32 = children.iter().map(|c| c.length()).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn sites_near_endpoints_do_not_split() {
        let mut segs = vec![seg(0.0, 0.0, 100.0, 0.0, TR_DEFAULT)];
        let out = split_segments(
            &mut segs,
            &[Point::new(2.0, 0.0), Point::new(98.0, 1.0)],
        );
        assert_eq!(out, SplitOutcome::default());
        assert!(segs[0].is_some(), "segment keeps its original id");
    }

    #[test]
    fn clustered_sites_cut_once() {
        let mut segs = vec![seg(0.0, 0.0, 100.0, 0.0, TR_DEFAULT)];
        let out = split_segments(
            &mut segs,
            &[Point::new(50.0, 0.0), Point::new(52.0, 1.0)],
        );
        assert_eq!(out.children_created, 2);
        let children = live(&segs);
        let total: f32 = children.iter().map(|c| c.length()).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-3);
        // No gap: consecutive children share an endpoint.
        assert_relative_eq!(children[0].b.x, children[1].a.x, epsilon = 1e-5);
    }

    #[test]
    fn off_segment_site_is_ignored() {
        let mut segs = vec![seg(0.0, 0.0, 100.0, 0.0, TR_DEFAULT)];
        let out = split_segments(&mut segs, &[Point::new(50.0, 10.0)]);
        assert_eq!(out, SplitOutcome::default());
    }

    #[test]
    fn multiple_cuts_stay_ordered_and_conserve_length() {
        let mut segs = vec![seg(0.0, 0.0, 0.0, 90.0, TR_DEFAULT)];
        let sites = [
            Point::new(0.0, 60.0),
            Point::new(0.0, 20.0),
            Point::new(0.0, 40.0),
        ];
        let out = split_segments(&mut segs, &sites);
        assert_eq!(out.children_created, 4);
        let children = live(&segs);
        let total: f32 = children.iter().map(|c| c.length()).sum();
        assert_relative_eq!(total, 90.0, epsilon = 1e-3);
        for w in children.windows(2) {
            assert_relative_eq!(w[0].b.y, w[1].a.y, epsilon = 1e-5);
        }
    }
}
