//! Splitting every cell of a layer into four.
//!
//! Corner `k` of a parent is opposite edge midpoint `m[k]`, where
//! `m[k] = midpoint(corner[k + 1], corner[k + 2])`. The children of parent
//! `p` are, in order,
//!
//! ```text
//! child 4p + 0 = (c0, m2, m1)
//! child 4p + 1 = (c1, m0, m2)
//! child 4p + 2 = (c2, m1, m0)
//! child 4p + 3 = (m0, m1, m2)   // center
//! ```
//!
//! which keeps every child wound like its parent and puts the center cell in
//! slot 0 of each corner child's neighbor array.

use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use pluvial_math::{SpherePoint, midpoint};
use rayon::prelude::*;

use crate::node::MIDPOINT_CAPACITY;
use crate::{Cell, CellId, Layer, Node, NodeId, NodeOrigin};

/// A midpoint as first registered, before final ids are assigned.
#[derive(Clone, Copy, Debug)]
struct PendingMidpoint {
    tentative: u32,
    edge: (NodeId, NodeId),
}

/// Build the next layer from `parent`, recording child ids on `parent`.
pub(crate) fn subdivide(parent: &mut Layer) -> Layer {
    let old_count = parent.nodes.len();

    let memo: DashMap<SpherePoint, PendingMidpoint> =
        DashMap::with_capacity(parent.cells.len() * 3 / 2);
    let next = AtomicU32::new(0);

    // Midpoints are keyed by their exact coordinates; both cells on an edge
    // compute bit-identical points and so share one entry.
    let tentative: Vec<[u32; 3]> = parent
        .cells
        .par_iter()
        .map(|cell| {
            std::array::from_fn(|k| {
                let a = cell.corners[(k + 1) % 3];
                let b = cell.corners[(k + 2) % 3];
                let point = midpoint(parent.nodes[a.index()].point(), parent.nodes[b.index()].point());
                memo.entry(point)
                    .or_insert_with(|| PendingMidpoint {
                        tentative: next.fetch_add(1, Ordering::Relaxed),
                        edge: if a < b { (a, b) } else { (b, a) },
                    })
                    .tentative
            })
        })
        .collect();

    // Number midpoints by the edge they split so layouts are reproducible
    // regardless of which thread registered an edge first.
    let mut pending: Vec<(SpherePoint, PendingMidpoint)> = memo.into_iter().collect();
    pending.par_sort_unstable_by_key(|(_, m)| m.edge);
    let mut remap = vec![NodeId(0); pending.len()];
    for (rank, (_, m)) in pending.iter().enumerate() {
        remap[m.tentative as usize] = NodeId((old_count + rank) as u32);
    }

    let mut nodes: Vec<Node> = parent
        .nodes
        .iter()
        .map(|n| Node::new(n.point(), n.capacity()))
        .chain(pending.iter().map(|(p, _)| Node::new(*p, MIDPOINT_CAPACITY)))
        .collect();
    let origins: Vec<NodeOrigin> = (0..old_count)
        .map(|i| NodeOrigin::Corner(NodeId(i as u32)))
        .chain(pending.iter().map(|(_, m)| NodeOrigin::Midpoint(m.edge.0, m.edge.1)))
        .collect();
    let mids: Vec<[NodeId; 3]> = tentative
        .into_iter()
        .map(|t| t.map(|id| remap[id as usize]))
        .collect();

    let cells: Vec<Cell> = {
        let nodes = &nodes;
        let parent_cells = &parent.cells;
        parent_cells
            .par_iter()
            .enumerate()
            .map(|(p, cell)| split_cell(p, cell, &mids[p], parent_cells, nodes))
            .collect::<Vec<[Cell; 4]>>()
            .into_iter()
            .flatten()
            .collect()
    };

    for (p, cell) in parent.cells.iter().enumerate() {
        let m = mids[p];
        let c = cell.corners;
        for i in 0..3 {
            let (m1, m2) = (m[(i + 1) % 3], m[(i + 2) % 3]);
            nodes[c[i].index()].connect(m1);
            nodes[c[i].index()].connect(m2);
            let here = &mut nodes[m[i].index()];
            here.connect(m1);
            here.connect(m2);
            here.connect(c[(i + 1) % 3]);
            here.connect(c[(i + 2) % 3]);
        }
    }

    for (p, cell) in parent.cells.iter_mut().enumerate() {
        let id = CellId(p as u32);
        cell.children = Some(std::array::from_fn(|k| id.child(k as u32)));
    }

    Layer {
        nodes,
        cells,
        origins,
    }
}

/// The four children of parent `p`, with inner and cross-parent neighbors.
fn split_cell(
    p: usize,
    cell: &Cell,
    m: &[NodeId; 3],
    parent_cells: &[Cell],
    nodes: &[Node],
) -> [Cell; 4] {
    let parent = CellId(p as u32);
    let c = cell.corners;
    let corners: [[NodeId; 3]; 4] = [
        [c[0], m[2], m[1]],
        [c[1], m[0], m[2]],
        [c[2], m[1], m[0]],
        [m[0], m[1], m[2]],
    ];
    let mut children =
        corners.map(|ids| Cell::new(ids, ids.map(|n| nodes[n.index()].point())));

    for child in children.iter_mut().take(3) {
        child.neighbors[0] = Some(parent.child(3));
    }
    children[3].neighbors = std::array::from_fn(|j| Some(parent.child(j as u32)));

    // Across parent edge i the two children touching it pair up with the
    // two children of the neighbor touching the same edge.
    for i in 0..3 {
        let Some(q) = cell.neighbors[i] else {
            continue;
        };
        let Some(b) = parent_cells[q.index()].neighbor_slot(parent) else {
            continue;
        };
        children[(i + 1) % 3].neighbors[2] = Some(q.child(((b + 2) % 3) as u32));
        children[(i + 2) % 3].neighbors[1] = Some(q.child(((b + 1) % 3) as u32));
    }
    children
}
