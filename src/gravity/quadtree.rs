//! Barnes-Hut quadtree over the current body population.
//!
//! Nodes live in a flat arena and reference each other by index. The tree
//! is rebuilt from scratch every step; nothing persists across frames, so
//! merges and deletions can never leave a stale structure behind.

use glam::DVec2;

use crate::config::{MAX_TREE_DEPTH, MIN_TREE_EXTENT, TREE_PADDING};
use crate::core::body::Body;
use crate::gravity::solver::point_force;

/// Square region of space: center plus side length.
#[derive(Debug, Clone, Copy)]
pub struct Quad {
    pub center: DVec2,
    pub size: f64,
}

impl Quad {
    /// Quadrant index for a point: bit 0 = east, bit 1 = north.
    fn quadrant(&self, point: DVec2) -> usize {
        let east = (point.x > self.center.x) as usize;
        let north = (point.y > self.center.y) as usize;
        east | (north << 1)
    }

    /// Region of the given quadrant, half this side length.
    fn child(&self, quadrant: usize) -> Quad {
        let offset = self.size / 4.0;
        let dx = if quadrant & 1 != 0 { offset } else { -offset };
        let dy = if quadrant & 2 != 0 { offset } else { -offset };
        Quad {
            center: self.center + DVec2::new(dx, dy),
            size: self.size / 2.0,
        }
    }
}

/// A node is empty, a leaf, or an internal region.
///
/// Leaf `count` is normally 1; at the depth cutoff further insertions are
/// aggregated as co-located instead of subdividing forever, so an over-deep
/// leaf carries the running mass/COM of everything that landed in it.
#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Empty,
    Leaf {
        body: u32,
        count: u32,
        mass: f64,
        com: DVec2,
    },
    Internal {
        mass: f64,
        com: DVec2,
        children: [u32; 4],
    },
}

#[derive(Debug, Clone, Copy)]
struct TreeNode {
    quad: Quad,
    kind: NodeKind,
}

/// Arena-allocated Barnes-Hut quadtree.
pub struct QuadTree {
    nodes: Vec<TreeNode>,
    root: u32,
}

impl QuadTree {
    /// Builds the tree over the given bodies, which must all be valid
    /// (the engine pre-filters). Black-hole masses are boosted before being
    /// folded into any aggregate, so their influence propagates through
    /// every ancestor node.
    pub fn build(bodies: &[Body]) -> Self {
        let mut tree = QuadTree {
            nodes: Vec::with_capacity(bodies.len().max(1) * 2),
            root: 0,
        };
        tree.nodes.push(TreeNode {
            quad: root_region(bodies),
            kind: NodeKind::Empty,
        });
        for (index, body) in bodies.iter().enumerate() {
            tree.insert(tree.root, index as u32, body.pos, body.gravitational_mass(), 0);
        }
        tree
    }

    fn insert(&mut self, node: u32, body: u32, pos: DVec2, mass: f64, depth: u32) {
        let idx = node as usize;
        match self.nodes[idx].kind {
            NodeKind::Empty => {
                self.nodes[idx].kind = NodeKind::Leaf {
                    body,
                    count: 1,
                    mass,
                    com: pos,
                };
            }
            // Depth cutoff: treat everything landing here as co-located.
            NodeKind::Leaf {
                body: occupant,
                count,
                mass: leaf_mass,
                com,
            } if depth >= MAX_TREE_DEPTH => {
                let total = leaf_mass + mass;
                self.nodes[idx].kind = NodeKind::Leaf {
                    body: occupant,
                    count: count + 1,
                    mass: total,
                    com: (com * leaf_mass + pos * mass) / total,
                };
            }
            NodeKind::Leaf {
                body: occupant,
                mass: occupant_mass,
                com: occupant_pos,
                ..
            } => {
                // Subdivide, then route the old occupant and the new body
                // independently through the fresh children.
                let quad = self.nodes[idx].quad;
                let first = self.nodes.len() as u32;
                for q in 0..4 {
                    self.nodes.push(TreeNode {
                        quad: quad.child(q),
                        kind: NodeKind::Empty,
                    });
                }
                self.nodes[idx].kind = NodeKind::Internal {
                    mass: 0.0,
                    com: DVec2::ZERO,
                    children: [first, first + 1, first + 2, first + 3],
                };
                self.push_down(idx, occupant, occupant_pos, occupant_mass, depth);
                self.push_down(idx, body, pos, mass, depth);
            }
            NodeKind::Internal { .. } => self.push_down(idx, body, pos, mass, depth),
        }
    }

    /// Folds the body into an internal node's aggregates as a running
    /// weighted average, then descends into the matching quadrant.
    fn push_down(&mut self, idx: usize, body: u32, pos: DVec2, mass: f64, depth: u32) {
        let quad = self.nodes[idx].quad;
        let NodeKind::Internal {
            mass: node_mass,
            com,
            children,
        } = &mut self.nodes[idx].kind
        else {
            return;
        };
        let total = *node_mass + mass;
        *com = (*com * *node_mass + pos * mass) / total;
        *node_mass = total;
        let child = children[quad.quadrant(pos)];
        self.insert(child, body, pos, mass, depth + 1);
    }

    /// Net gravitational force on a body at `pos` with mass `body_mass`,
    /// skipping the leaf holding the body itself (`skip`).
    ///
    /// A node is accepted as a single aggregate source when it is a leaf or
    /// when `size / distance < theta`; otherwise its children are summed.
    /// Aggregate masses already carry the black-hole boost.
    pub fn accumulate_force(
        &self,
        pos: DVec2,
        body_mass: f64,
        skip: u32,
        theta: f64,
        softening: f64,
        g_eff: f64,
    ) -> DVec2 {
        self.force_recursive(self.root, pos, body_mass, skip, theta, softening, g_eff)
    }

    #[allow(clippy::too_many_arguments)]
    fn force_recursive(
        &self,
        node: u32,
        pos: DVec2,
        body_mass: f64,
        skip: u32,
        theta: f64,
        softening: f64,
        g_eff: f64,
    ) -> DVec2 {
        let node = &self.nodes[node as usize];
        match node.kind {
            NodeKind::Empty => DVec2::ZERO,
            // No self-force. A co-located cluster (count > 1) is still
            // evaluated; the separation is ~zero so its contribution is too.
            NodeKind::Leaf { body, count: 1, .. } if body == skip => DVec2::ZERO,
            NodeKind::Leaf { mass, com, .. } => {
                point_force(pos, com, mass, body_mass, softening, g_eff)
            }
            NodeKind::Internal { mass, com, children } => {
                let distance = ((com - pos).length_squared() + softening).sqrt();
                if node.quad.size / distance < theta {
                    point_force(pos, com, mass, body_mass, softening, g_eff)
                } else {
                    children.iter().fold(DVec2::ZERO, |acc, &child| {
                        acc + self.force_recursive(
                            child, pos, body_mass, skip, theta, softening, g_eff,
                        )
                    })
                }
            }
        }
    }

    /// Total aggregated (boost-inclusive) mass under the root.
    pub fn total_mass(&self) -> f64 {
        match self.nodes[self.root as usize].kind {
            NodeKind::Empty => 0.0,
            NodeKind::Leaf { mass, .. } => mass,
            NodeKind::Internal { mass, .. } => mass,
        }
    }

    /// Root region covering all inserted bodies.
    pub fn root_region(&self) -> Quad {
        self.nodes[self.root as usize].quad
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Square root region sized to the padded body bounding box, with a floor
/// so sparse or single-body populations still get a sane region.
fn root_region(bodies: &[Body]) -> Quad {
    if bodies.is_empty() {
        return Quad {
            center: DVec2::ZERO,
            size: MIN_TREE_EXTENT,
        };
    }

    let mut min = bodies[0].pos;
    let mut max = bodies[0].pos;
    for body in &bodies[1..] {
        min = min.min(body.pos);
        max = max.max(body.pos);
    }

    let span = (max - min).max_element();
    Quad {
        center: (min + max) / 2.0,
        size: (span * TREE_PADDING).max(MIN_TREE_EXTENT),
    }
}
