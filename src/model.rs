use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type SegmentId = u32;
pub type ShapeId = u32;
pub type JunctionId = u32;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn dist(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SegmentStyle {
    pub color: Option<Color>,
    pub width: f32,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        SegmentStyle {
            color: None,
            width: 2.0,
        }
    }
}

// Duct metadata entered in the properties panel. Carried through splits
// untouched; the core never interprets it.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct SegmentMeta {
    pub height: Option<f32>,
    pub width: Option<f32>,
    pub volume: Option<f32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
    pub style: SegmentStyle,
    pub meta: SegmentMeta,
    // Propagated resistance. Defaults to TR_DEFAULT at creation and is
    // inherited across splits.
    pub tr: f32,
    // Junction ids touching this segment at its start / end.
    pub track: Vec<JunctionId>,
    pub endtrack: Vec<JunctionId>,
    // Per-junction display sentinel (start 5, end 10, middle 0). Debug/UI
    // only; the propagator never reads it.
    pub passability: HashMap<JunctionId, u8>,
}

impl Segment {
    pub fn length(&self) -> f32 {
        self.a.dist(self.b)
    }

    pub fn clear_bookkeeping(&mut self) {
        self.track.clear();
        self.endtrack.clear();
        self.passability.clear();
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shape {
    pub center: Point,
    pub width: f32,
    pub height: f32,
    pub rotation_deg: f32,
    // Resistance override applied to segments departing a junction this
    // shape contributes to.
    pub air_value: Option<f32>,
    pub kind: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointClass {
    Start,
    End,
    Middle,
}

// Which endpoint of a segment a mutator addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegEnd {
    A,
    B,
}

// One raw intersection fact absorbed into a junction. Endpoint classes are
// filled in by the classifier once the junction list is final.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contribution {
    SegSeg {
        seg_a: SegmentId,
        seg_b: SegmentId,
        end_a: EndpointClass,
        end_b: EndpointClass,
    },
    SegShape {
        seg: SegmentId,
        shape: ShapeId,
        end: EndpointClass,
        side: u8,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Junction {
    pub id: JunctionId,
    pub pos: Point,
    pub contributions: Vec<Contribution>,
}

// Per-junction propagation pattern, computed once per junction per pass.
// Override is checked before any count-based rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JunctionPattern {
    Override(f32),
    OneToOne,
    FanOut,
    FanIn,
    NoRule,
}

// Monotonic id source owned by a Network. Never hands out the same id twice
// within a session; reset only via an explicit network reset.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 0 }
    }

    pub fn alloc(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}
