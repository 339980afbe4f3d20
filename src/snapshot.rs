// Read-only snapshot of the network, consumed by rendering and by the
// persistence/report exporter. Never hands out mutable access.

use crate::model::{
    Color, Contribution, JunctionId, Point, SegmentId, SegmentMeta, ShapeId,
};
use crate::Network;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
pub struct SegmentView {
    pub id: SegmentId,
    pub a: Point,
    pub b: Point,
    pub tr: f32,
    pub color: Option<Color>,
    pub width: f32,
    pub meta: SegmentMeta,
    pub track: Vec<JunctionId>,
    pub endtrack: Vec<JunctionId>,
    pub passability: HashMap<JunctionId, u8>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ShapeView {
    pub id: ShapeId,
    pub center: Point,
    pub width: f32,
    pub height: f32,
    pub rotation_deg: f32,
    pub air_value: Option<f32>,
    pub kind: String,
    pub label: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct JunctionView {
    pub id: JunctionId,
    pub pos: Point,
    pub contributions: Vec<Contribution>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NetworkSnapshot {
    pub segments: Vec<SegmentView>,
    pub shapes: Vec<ShapeView>,
    pub junctions: Vec<JunctionView>,
}

pub fn snapshot_impl(n: &Network) -> NetworkSnapshot {
    let segments = n
        .segments_iter()
        .map(|(id, s)| SegmentView {
            id,
            a: s.a,
            b: s.b,
            tr: s.tr,
            color: s.style.color,
            width: s.style.width,
            meta: s.meta,
            track: s.track.clone(),
            endtrack: s.endtrack.clone(),
            passability: s.passability.clone(),
        })
        .collect();
    let shapes = n
        .shapes_iter()
        .map(|(id, s)| ShapeView {
            id,
            center: s.center,
            width: s.width,
            height: s.height,
            rotation_deg: s.rotation_deg,
            air_value: s.air_value,
            kind: s.kind.clone(),
            label: s.label.clone(),
        })
        .collect();
    let junctions = n
        .junctions()
        .iter()
        .map(|j| JunctionView {
            id: j.id,
            pos: j.pos,
            contributions: j.contributions.clone(),
        })
        .collect();
    NetworkSnapshot {
        segments,
        shapes,
        junctions,
    }
}

pub fn to_json_impl(n: &Network) -> Value {
    #[derive(Serialize)]
    struct Doc {
        version: u32,
        #[serde(flatten)]
        snapshot: NetworkSnapshot,
    }
    serde_json::to_value(Doc {
        version: 1,
        snapshot: snapshot_impl(n),
    })
    .unwrap_or(Value::Null)
}
