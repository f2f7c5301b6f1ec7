use crate::{
    foundation::core::{FrameIndex, Positions},
    foundation::math::Fnv1a64,
    graph::model::GraphModel,
};

/// 128-bit hash of emitted frame state, built from two independently seeded FNV-1a streams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

const SEED_A: u64 = Fnv1a64::OFFSET_BASIS;
const SEED_B: u64 = 0x9ae1_6a3b_2f90_404f;

impl FrameFingerprint {
    /// Fold `next` into a rolling run fingerprint.
    pub fn combine(self, next: FrameFingerprint) -> FrameFingerprint {
        let mut a = Fnv1a64::new(SEED_A);
        let mut b = Fnv1a64::new(SEED_B);
        for v in [self.hi, self.lo, next.hi, next.lo] {
            write_u64_pair(&mut a, &mut b, v);
        }
        FrameFingerprint {
            hi: a.finish(),
            lo: b.finish(),
        }
    }
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Hash everything that decides how frame `idx` looks: node ids, positions, rendered sizes,
/// styles, labels, classes and edges with their sizes and styles.
pub fn fingerprint_frame(graph: &GraphModel, positions: &Positions, idx: FrameIndex) -> FrameFingerprint {
    let mut a = Fnv1a64::new(SEED_A);
    let mut b = Fnv1a64::new(SEED_B);

    write_u64_pair(&mut a, &mut b, idx.0);
    write_u64_pair(&mut a, &mut b, graph.node_count() as u64);
    for node in graph.nodes() {
        write_str_pair(&mut a, &mut b, &node.id);
        match positions.get(&node.id) {
            Some(p) => {
                write_u8_pair(&mut a, &mut b, 1);
                write_u64_pair(&mut a, &mut b, p.x.to_bits());
                write_u64_pair(&mut a, &mut b, p.y.to_bits());
            }
            None => write_u8_pair(&mut a, &mut b, 0),
        }
        write_u64_pair(&mut a, &mut b, u64::from(node.rendered_size));
        write_opt_str_pair(&mut a, &mut b, node.style.as_deref());
        write_opt_str_pair(&mut a, &mut b, node.label.as_deref());
        write_u64_pair(&mut a, &mut b, node.classes.len() as u64);
        for class in &node.classes {
            write_str_pair(&mut a, &mut b, class);
        }
    }

    write_u64_pair(&mut a, &mut b, graph.edge_count() as u64);
    for edge in graph.edges() {
        write_str_pair(&mut a, &mut b, &edge.id);
        write_str_pair(&mut a, &mut b, &edge.from);
        write_str_pair(&mut a, &mut b, &edge.to);
        write_u8_pair(&mut a, &mut b, u8::from(edge.directed));
        write_u64_pair(&mut a, &mut b, u64::from(edge.size));
        write_opt_str_pair(&mut a, &mut b, edge.style.as_deref());
    }

    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

fn write_opt_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: Option<&str>) {
    match s {
        Some(s) => {
            write_u8_pair(a, b, 1);
            write_str_pair(a, b, s);
        }
        None => write_u8_pair(a, b, 0),
    }
}
