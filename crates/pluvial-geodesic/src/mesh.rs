//! The layered geodesic mesh.

use tracing::{debug, info};

use crate::base::base_layer;
use crate::subdivide::subdivide;
use crate::{Layer, MeshError, NodeOrigin};

/// Deepest supported subdivision. Depth 8 already holds 655 362 nodes.
pub const MAX_DEPTH: usize = 8;

/// An icosahedron refined `depth` times, keeping every intermediate layer.
///
/// Layer `d` has `10 * 4^d + 2` nodes and `20 * 4^d` cells. Node ids persist
/// from a layer into all deeper layers, and every cell of a non-final layer
/// records the ids of its four children in the next layer.
#[derive(Clone, Debug)]
pub struct Mesh {
    layers: Vec<Layer>,
}

impl Mesh {
    /// Build the base icosahedron and subdivide it `depth` times.
    pub fn new(depth: usize) -> Result<Self, MeshError> {
        if depth > MAX_DEPTH {
            return Err(MeshError::DepthTooLarge {
                requested: depth,
                max: MAX_DEPTH,
            });
        }
        let mut layers = Vec::with_capacity(depth + 1);
        layers.push(base_layer());
        for d in 1..=depth {
            let next = match layers.last_mut() {
                Some(parent) => subdivide(parent),
                None => break,
            };
            debug!(
                depth = d,
                nodes = next.node_count(),
                cells = next.cell_count(),
                "subdivided mesh layer"
            );
            layers.push(next);
        }
        let mesh = Self { layers };
        info!(
            depth,
            nodes = mesh.finest().node_count(),
            cells = mesh.finest().cell_count(),
            "mesh built"
        );
        Ok(mesh)
    }

    /// Number of subdivisions applied to the base layer.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn layer(&self, depth: usize) -> Option<&Layer> {
        self.layers.get(depth)
    }

    /// The most refined layer.
    #[must_use]
    pub fn finest(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Carry one value per base node down through every layer.
    ///
    /// Surviving nodes keep their value; each midpoint takes the mean of the
    /// two nodes whose edge it split. Returns one vector per layer, indexed
    /// by node id.
    pub fn propagate(&self, base_values: &[f64]) -> Result<Vec<Vec<f64>>, MeshError> {
        let base = &self.layers[0];
        if base_values.len() != base.node_count() {
            return Err(MeshError::ValueCountMismatch {
                expected: base.node_count(),
                actual: base_values.len(),
            });
        }
        let mut out: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len());
        out.push(base_values.to_vec());
        for layer in &self.layers[1..] {
            let prev = &out[out.len() - 1];
            let values = layer
                .origins()
                .iter()
                .enumerate()
                .map(|(i, origin)| match *origin {
                    NodeOrigin::Base => prev[i],
                    NodeOrigin::Corner(id) => prev[id.index()],
                    NodeOrigin::Midpoint(a, b) => 0.5 * (prev[a.index()] + prev[b.index()]),
                })
                .collect();
            out.push(values);
        }
        Ok(out)
    }
}
