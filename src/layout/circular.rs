use egui::{Pos2, Vec2};

// Gap between the node rim and the bottom of its caption
const LABEL_GAP: f32 = 10.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CircleLayout {
    pub center: Pos2,
    pub radius: f32,
    pub node_radius: f32,
}

impl CircleLayout {
    pub fn new(center: Pos2, radius: f32, node_radius: f32) -> Self {
        Self { center, radius, node_radius }
    }

    pub fn positions(&self, n: usize) -> Vec<Pos2> {
        circular_positions(self.center, self.radius, n)
    }

    pub fn label_anchor(&self, pos: Pos2) -> Pos2 {
        pos - Vec2::new(0.0, self.node_radius + LABEL_GAP)
    }

    pub fn hit_test(&self, positions: &[Pos2], pointer: Pos2) -> Option<usize> {
        hit_test(positions, pointer, self.node_radius)
    }
}

/// Place `n` points at equal angular steps of `360° / n` around `center`.
///
/// Index 0 sits on the +x axis; later indices advance clockwise on screen since
/// y grows downward.
pub fn circular_positions(center: Pos2, radius: f32, n: usize) -> Vec<Pos2> {
    if n == 0 {
        return Vec::new();
    }
    let step = 360.0_f32 / n as f32;
    (0..n)
        .map(|i| {
            let theta = (i as f32 * step).to_radians();
            Pos2::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
        })
        .collect()
}

// Every unordered pair, i < j
pub fn connections(n: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            out.push((i, j));
        }
    }
    out
}

/// Index of the node whose disc contains `pointer`. Later nodes are painted on
/// top, so the highest index wins when discs overlap.
pub fn hit_test(positions: &[Pos2], pointer: Pos2, node_radius: f32) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .rev()
        .find(|(_, p)| p.distance(pointer) <= node_radius)
        .map(|(i, _)| i)
}
