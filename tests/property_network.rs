// Randomized pipeline invariants: recompute never panics, splitting
// conserves total duct length, classification is exclusive, and a second
// recompute reproduces the first by value.

use proptest::prelude::*;
use ventnet::geometry::tolerance::{PASS_END, PASS_MIDDLE, PASS_START};
use ventnet::model::{Point, SegmentStyle};
use ventnet::Network;

#[derive(Clone, Debug)]
struct SegSpec {
    ax: i16,
    ay: i16,
    bx: i16,
    by: i16,
}

fn seg_strategy() -> impl Strategy<Value = SegSpec> {
    (0i16..300, 0i16..300, 0i16..300, 0i16..300).prop_map(|(ax, ay, bx, by)| SegSpec {
        ax,
        ay,
        bx,
        by,
    })
}

fn build(specs: &[SegSpec], shapes: &[(i16, i16)]) -> Network {
    let mut n = Network::new();
    for s in specs {
        // Too-short or degenerate strokes are rejected at the boundary;
        // that is part of the contract, not a test failure.
        let _ = n.add_segment(
            Point::new(s.ax as f32, s.ay as f32),
            Point::new(s.bx as f32, s.by as f32),
            SegmentStyle::default(),
        );
    }
    for &(x, y) in shapes {
        let _ = n.add_shape("fan", x as f32, y as f32, 24.0, 16.0);
    }
    n
}

fn total_length(n: &Network) -> f64 {
    n.segments_iter().map(|(_, s)| s.length() as f64).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn recompute_conserves_total_length(
        specs in proptest::collection::vec(seg_strategy(), 1..12),
        shapes in proptest::collection::vec((0i16..300, 0i16..300), 0..3),
    ) {
        let mut n = build(&specs, &shapes);
        let before = total_length(&n);
        n.recompute_network();
        let after = total_length(&n);
        let scale = before.max(1.0);
        prop_assert!(
            ((before - after) / scale).abs() < 1e-3,
            "length drifted: {} -> {}", before, after
        );
    }

    #[test]
    fn classification_is_exclusive(
        specs in proptest::collection::vec(seg_strategy(), 1..12),
    ) {
        let mut n = build(&specs, &[]);
        n.recompute_network();
        for (_, seg) in n.segments_iter() {
            for (&jid, &sentinel) in &seg.passability {
                let in_track = seg.track.contains(&jid);
                let in_endtrack = seg.endtrack.contains(&jid);
                match sentinel {
                    PASS_START => prop_assert!(in_track && !in_endtrack),
                    PASS_END => prop_assert!(!in_track && in_endtrack),
                    PASS_MIDDLE => prop_assert!(!in_track && !in_endtrack),
                    other => prop_assert!(false, "unknown sentinel {}", other),
                }
            }
        }
    }

    #[test]
    fn recompute_twice_matches_by_value(
        specs in proptest::collection::vec(seg_strategy(), 1..10),
        shapes in proptest::collection::vec((0i16..300, 0i16..300), 0..2),
    ) {
        let mut n = build(&specs, &shapes);
        n.recompute_network();
        let first = n.snapshot();
        let converged = n.last_propagation().unwrap().converged;

        n.recompute_network();
        let second = n.snapshot();

        prop_assert_eq!(first.segments.len(), second.segments.len());
        prop_assert_eq!(first.junctions.len(), second.junctions.len());
        for (a, b) in first.segments.iter().zip(second.segments.iter()) {
            prop_assert_eq!(a.id, b.id);
            prop_assert_eq!(a.track.len(), b.track.len());
            prop_assert_eq!(a.endtrack.len(), b.endtrack.len());
            if converged {
                prop_assert!((a.tr - b.tr).abs() < 1e-6, "tr drifted for {}", a.id);
            }
        }
        for (a, b) in first.junctions.iter().zip(second.junctions.iter()) {
            prop_assert!(a.pos.dist(b.pos) < 1e-3);
            prop_assert_eq!(a.contributions.len(), b.contributions.len());
        }
    }

    #[test]
    fn propagation_always_terminates(
        specs in proptest::collection::vec(seg_strategy(), 1..14),
    ) {
        let mut n = build(&specs, &[]);
        n.recompute_network();
        let report = n.last_propagation().unwrap();
        prop_assert!(report.passes >= 1 && report.passes <= 10);
        // All resistances stay finite whatever the topology.
        for (_, seg) in n.segments_iter() {
            prop_assert!(seg.tr.is_finite());
        }
    }
}
