// Node clusterer: merges near-duplicate raw intersection candidates into
// canonical junction sites. Sort-by-x sweep with an early break, then a
// second dedup pass for non-transitive proximity chains the sweep misses.

use crate::geometry::tolerance::MERGE_TOL;
use crate::model::Point;

use super::detect::RawCandidate;

// A junction site before ids are allocated. `pos` is the running mean of all
// absorbed candidate points; `count` keeps merging commutative.
#[derive(Clone, Debug)]
pub struct ProtoJunction {
    pub pos: Point,
    pub count: u32,
    pub candidates: Vec<RawCandidate>,
}

impl ProtoJunction {
    fn absorb_point(&mut self, p: Point) {
        let n = self.count as f32;
        self.pos.x = (self.pos.x * n + p.x) / (n + 1.0);
        self.pos.y = (self.pos.y * n + p.y) / (n + 1.0);
        self.count += 1;
    }

    fn merge(&mut self, other: ProtoJunction) {
        let na = self.count as f32;
        let nb = other.count as f32;
        self.pos.x = (self.pos.x * na + other.pos.x * nb) / (na + nb);
        self.pos.y = (self.pos.y * na + other.pos.y * nb) / (na + nb);
        self.count += other.count;
        self.candidates.extend(other.candidates);
    }
}

pub fn cluster_candidates(candidates: &[RawCandidate]) -> Vec<ProtoJunction> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        candidates[a]
            .at()
            .x
            .partial_cmp(&candidates[b].at().x)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut used = vec![false; candidates.len()];
    let mut protos: Vec<ProtoJunction> = Vec::new();

    for (si, &i) in order.iter().enumerate() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let seed = candidates[i].at();
        let mut proto = ProtoJunction {
            pos: seed,
            count: 1,
            candidates: vec![candidates[i]],
        };
        for &j in order.iter().skip(si + 1) {
            if used[j] {
                continue;
            }
            let p = candidates[j].at();
            // Sorted by x, so once the x gap alone exceeds the tolerance no
            // later candidate can merge into this seed.
            if p.x - seed.x > MERGE_TOL {
                break;
            }
            if p.dist(proto.pos) <= MERGE_TOL {
                used[j] = true;
                proto.absorb_point(p);
                proto.candidates.push(candidates[j]);
            }
        }
        protos.push(proto);
    }

    dedup_protos(protos)
}

// Merge any pair of sites still within tolerance of each other. Weighted by
// absorbed count, so merge order does not change the result. Idempotent.
pub fn dedup_protos(protos: Vec<ProtoJunction>) -> Vec<ProtoJunction> {
    let mut kept: Vec<ProtoJunction> = Vec::new();
    for proto in protos {
        match kept
            .iter_mut()
            .find(|k| k.pos.dist(proto.pos) <= MERGE_TOL)
        {
            Some(k) => k.merge(proto),
            None => kept.push(proto),
        }
    }
    kept
}
