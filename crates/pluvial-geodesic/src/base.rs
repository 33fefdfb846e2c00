//! Layer 0: the icosahedron.

use pluvial_math::{Point3, closest_n_points, dodecahedron_vertices, icosahedron_vertices};

use crate::node::BASE_CAPACITY;
use crate::{Cell, CellId, Layer, Node, NodeId, NodeOrigin};

/// Build the 12-node, 20-cell base layer.
///
/// Each vertex is connected to its five nearest vertices. Each face is
/// taken from one dodecahedron vertex (a face center of the icosahedron)
/// and its three nearest icosahedron vertices; face centers are paired
/// with their three nearest other centers as neighbors.
pub(crate) fn base_layer() -> Layer {
    let verts = icosahedron_vertices();
    let centers = dodecahedron_vertices();

    let nodes: Vec<Node> = verts
        .iter()
        .map(|v| {
            let mut node = Node::new(v.to_sphere(), BASE_CAPACITY);
            for i in closest_n_points(*v, usize::from(BASE_CAPACITY), &verts) {
                node.connect(node_id(i));
            }
            node
        })
        .collect();

    let mut cells: Vec<Cell> = centers
        .iter()
        .map(|center| {
            let corners = wind_outward(closest_n_points(*center, 3, &verts), &verts, *center);
            let points = corners.map(|i| nodes[i].point());
            Cell::new(corners.map(node_id), points)
        })
        .collect();

    let neighbor_sets: Vec<Vec<usize>> = centers
        .iter()
        .map(|center| closest_n_points(*center, 3, &centers))
        .collect();
    for (i, near) in neighbor_sets.into_iter().enumerate() {
        for q in near {
            let theirs = cells[q].corners;
            let slot = cells[i].corners.iter().position(|c| !theirs.contains(c));
            if let Some(slot) = slot {
                cells[i].neighbors[slot] = Some(cell_id(q));
            }
        }
    }

    Layer {
        nodes,
        cells,
        origins: vec![NodeOrigin::Base; verts.len()],
    }
}

/// Order three vertex indices counter-clockwise around `center`.
fn wind_outward(near: Vec<usize>, verts: &[Point3], center: Point3) -> [usize; 3] {
    let (a, mut b, mut c) = (near[0], near[1], near[2]);
    let pa = verts[a].to_dvec3();
    let normal = (verts[b].to_dvec3() - pa).cross(verts[c].to_dvec3() - pa);
    if normal.dot(center.to_dvec3()) < 0.0 {
        std::mem::swap(&mut b, &mut c);
    }
    [a, b, c]
}

fn node_id(i: usize) -> NodeId {
    NodeId(i as u32)
}

fn cell_id(i: usize) -> CellId {
    CellId(i as u32)
}
