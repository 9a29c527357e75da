// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Non-leafy BSP tree over polygon boundaries
//!
//! Every node, internal or terminal, may hold the polygons lying on its
//! splitting plane; that coplanar storage is what makes overlapping coplanar
//! faces of two solids come out right under the Boolean scripts.
//!
//! All traversals run on explicit work stacks. Two interacting high-density
//! primitives easily produce trees more than a thousand nodes deep, which is
//! past the default host stack for recursive descent.

use super::{Plane, Polygon, SplitLists};

/// Node of a BSP tree built from a polygon collection.
///
/// A node picks the supporting plane of its first polygon as the splitting
/// plane; coplanar polygons are stored at the node and the rest are pushed
/// into the front and back subtrees. `plane` is `None` only for a freshly
/// created empty node.
#[derive(Debug, Clone)]
pub struct BSPNode<S = ()> {
    plane: Option<Plane>,
    front: Option<Box<BSPNode<S>>>,
    back: Option<Box<BSPNode<S>>>,
    polygons: Vec<Polygon<S>>,
}

impl<S> Default for BSPNode<S> {
    fn default() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }
}

impl<S: Clone> BSPNode<S> {
    /// Empty node with no splitting plane.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a polygon list.
    pub fn from_polygons(polygons: Vec<Polygon<S>>) -> Self {
        let mut node = Self::new();
        node.build(polygons);
        node
    }

    /// Insert `polygons` into the tree, extending it where needed.
    ///
    /// The first call on an empty node fixes every splitting plane; calling
    /// again with additional polygons extends the tree consistently against
    /// the planes already chosen.
    pub fn build(&mut self, polygons: Vec<Polygon<S>>) {
        let mut pending: Vec<(&mut BSPNode<S>, Vec<Polygon<S>>)> = vec![(self, polygons)];
        while let Some((node, polygons)) = pending.pop() {
            if polygons.is_empty() {
                continue;
            }
            let mut polygons = polygons.into_iter();
            if node.plane.is_none() {
                // The polygon that fixes the splitting plane is stored at
                // this node directly. A polygon non-planar beyond EPSILON
                // would otherwise classify behind its own plane and be
                // re-queued forever.
                if let Some(first) = polygons.next() {
                    node.plane = Some(first.plane);
                    node.polygons.push(first);
                }
            }
            let Some(plane) = node.plane else {
                continue;
            };

            let mut lists = SplitLists::default();
            let mut front_polys = Vec::new();
            let mut back_polys = Vec::new();
            for polygon in polygons {
                plane.split_polygon(&polygon, &mut lists);
                // Coplanar polygons of either orientation fold into this
                // node, in classification order.
                node.polygons.append(&mut lists.coplanar_front);
                node.polygons.append(&mut lists.coplanar_back);
                front_polys.append(&mut lists.front);
                back_polys.append(&mut lists.back);
            }

            let BSPNode { front, back, .. } = node;
            if !front_polys.is_empty() {
                let child = front.get_or_insert_with(|| Box::new(BSPNode::new()));
                pending.push((child.as_mut(), front_polys));
            }
            if !back_polys.is_empty() {
                let child = back.get_or_insert_with(|| Box::new(BSPNode::new()));
                pending.push((child.as_mut(), back_polys));
            }
        }
    }

    /// Convert solid space to empty space and empty space to solid space:
    /// flips every polygon and plane and swaps the front/back subtrees.
    pub fn invert(&mut self) {
        let mut pending: Vec<&mut BSPNode<S>> = vec![self];
        while let Some(node) = pending.pop() {
            for polygon in &mut node.polygons {
                polygon.flip();
            }
            if let Some(plane) = &mut node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
            let BSPNode { front, back, .. } = node;
            if let Some(child) = front {
                pending.push(child.as_mut());
            }
            if let Some(child) = back {
                pending.push(child.as_mut());
            }
        }
    }

    /// Remove from `polygons` everything inside the solid this tree
    /// represents, splitting spanning polygons along the way.
    pub fn clip_polygons(&self, polygons: Vec<Polygon<S>>) -> Vec<Polygon<S>> {
        let mut kept = Vec::new();
        let mut pending: Vec<(&BSPNode<S>, Vec<Polygon<S>>)> = vec![(self, polygons)];
        while let Some((node, polygons)) = pending.pop() {
            let Some(plane) = node.plane else {
                // no splitting plane, nothing to clip against
                kept.extend(polygons);
                continue;
            };

            let mut lists = SplitLists::default();
            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in &polygons {
                plane.split_polygon(polygon, &mut lists);
                // Coplanar fragments travel with the half-space their
                // orientation points into.
                front.append(&mut lists.front);
                front.append(&mut lists.coplanar_front);
                back.append(&mut lists.back);
                back.append(&mut lists.coplanar_back);
            }

            // Push the back task first so the whole front subtree drains
            // ahead of it; the kept list then reads front-to-back, matching
            // the recursive formulation.
            if let Some(child) = &node.back {
                pending.push((child.as_ref(), back));
            }
            // No back child: the back half-space is solid interior and
            // those fragments are discarded.
            match &node.front {
                Some(child) => pending.push((child.as_ref(), front)),
                None => kept.extend(front),
            }
        }
        kept
    }

    /// Remove every polygon in this tree that is inside the solid
    /// represented by `bsp`.
    pub fn clip_to(&mut self, bsp: &BSPNode<S>) {
        let mut pending: Vec<&mut BSPNode<S>> = vec![self];
        while let Some(node) = pending.pop() {
            let polygons = std::mem::take(&mut node.polygons);
            node.polygons = bsp.clip_polygons(polygons);
            let BSPNode { front, back, .. } = node;
            if let Some(child) = front {
                pending.push(child.as_mut());
            }
            if let Some(child) = back {
                pending.push(child.as_mut());
            }
        }
    }

    /// Flat enumeration of every polygon in the tree.
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut polygons = Vec::new();
        let mut pending: Vec<&BSPNode<S>> = vec![self];
        while let Some(node) = pending.pop() {
            polygons.extend(node.polygons.iter().cloned());
            // Back pushed first: the enumeration reads node, front subtree,
            // back subtree.
            if let Some(child) = &node.back {
                pending.push(child.as_ref());
            }
            if let Some(child) = &node.front {
                pending.push(child.as_ref());
            }
        }
        polygons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Vertex, EPSILON};
    use nalgebra::Point3;

    fn quad(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            Vertex::from_position(Point3::new(0.0, 0.0, z)),
            Vertex::from_position(Point3::new(1.0, 0.0, z)),
            Vertex::from_position(Point3::new(1.0, 1.0, z)),
            Vertex::from_position(Point3::new(0.0, 1.0, z)),
        ])
    }

    #[test]
    fn test_empty_build() {
        let node: BSPNode = BSPNode::from_polygons(Vec::new());
        assert!(node.plane.is_none());
        assert!(node.polygons.is_empty());
        assert!(node.front.is_none() && node.back.is_none());
    }

    #[test]
    fn test_single_polygon_build() {
        let node = BSPNode::from_polygons(vec![quad(0.0)]);
        assert!(node.plane.is_some());
        assert_eq!(node.polygons.len(), 1);
        assert!(node.front.is_none() && node.back.is_none());
    }

    #[test]
    fn test_build_sorts_into_subtrees() {
        let node = BSPNode::from_polygons(vec![quad(0.0), quad(1.0), quad(-1.0)]);
        assert_eq!(node.polygons.len(), 1);
        assert_eq!(node.front.as_ref().unwrap().polygons.len(), 1);
        assert_eq!(node.back.as_ref().unwrap().polygons.len(), 1);
        assert_eq!(node.all_polygons().len(), 3);
    }

    #[test]
    fn test_incremental_build_extends_tree() {
        let mut node = BSPNode::from_polygons(vec![quad(0.0)]);
        node.build(vec![quad(2.0)]);
        assert_eq!(node.all_polygons().len(), 2);
        assert_eq!(node.front.as_ref().unwrap().polygons.len(), 1);
    }

    #[test]
    fn test_nonplanar_polygon_terminates() {
        // Slightly non-planar quad: classified against its own supporting
        // plane it falls outside EPSILON, which once caused unbounded
        // recursion. Storing the plane-fixing polygon at its node bounds
        // the construction.
        let polygon = Polygon::from_vertices(vec![
            Vertex::from_position(Point3::new(0.12, -0.24, 1.50)),
            Vertex::from_position(Point3::new(0.01, 0.00, 1.75)),
            Vertex::from_position(Point3::new(-0.03, 0.05, 1.79)),
            Vertex::from_position(Point3::new(-0.13, -0.08, 1.5)),
        ]);
        let node = BSPNode::from_polygons(vec![polygon]);
        assert_eq!(node.all_polygons().len(), 1);
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let original = BSPNode::from_polygons(vec![quad(0.0), quad(1.0), quad(-1.0)]);
        let mut node = original.clone();
        node.invert();
        node.invert();
        assert_eq!(node.all_polygons(), original.all_polygons());
    }

    #[test]
    fn test_invert_flips_polygons() {
        let mut node = BSPNode::from_polygons(vec![quad(0.0)]);
        node.invert();
        let flipped = node.all_polygons();
        assert_eq!(flipped[0].plane.normal.z, -1.0);
    }

    #[test]
    fn test_clip_polygons_without_plane_is_passthrough() {
        let node: BSPNode = BSPNode::new();
        let kept = node.clip_polygons(vec![quad(3.0)]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_clip_drops_interior_fragments() {
        let cube = crate::geometry::Primitive::cube(
            Point3::origin(),
            nalgebra::Vector3::repeat(1.0),
        )
        .to_solid()
        .unwrap();
        let tree = BSPNode::from_polygons(cube.polygons().to_vec());

        // Strictly inside the cube: removed entirely.
        let inside = quad(0.5);
        assert!(tree.clip_polygons(vec![inside]).is_empty());

        // Strictly outside: kept unchanged.
        let outside = quad(4.0);
        assert_eq!(tree.clip_polygons(vec![outside]).len(), 1);
    }

    #[test]
    fn test_clip_splits_spanning_polygon() {
        let cube = crate::geometry::Primitive::cube(
            Point3::origin(),
            nalgebra::Vector3::repeat(1.0),
        )
        .to_solid()
        .unwrap();
        let tree = BSPNode::from_polygons(cube.polygons().to_vec());

        // Large quad at z = 0 crossing all four side faces: only the parts
        // outside the cube survive.
        let sheet = Polygon::from_vertices(vec![
            Vertex::from_position(Point3::new(-3.0, -3.0, 0.0)),
            Vertex::from_position(Point3::new(3.0, -3.0, 0.0)),
            Vertex::from_position(Point3::new(3.0, 3.0, 0.0)),
            Vertex::from_position(Point3::new(-3.0, 3.0, 0.0)),
        ]);
        let kept = tree.clip_polygons(vec![sheet]);
        assert!(!kept.is_empty());
        for polygon in &kept {
            for vertex in &polygon.vertices {
                let p = vertex.position;
                let inside = p.x.abs() < 1.0 - EPSILON
                    && p.y.abs() < 1.0 - EPSILON
                    && p.z.abs() < 1.0 - EPSILON;
                assert!(!inside, "kept vertex {p} lies inside the solid");
            }
        }
    }

    #[test]
    fn test_clip_to_against_empty_tree_keeps_everything() {
        let mut node = BSPNode::from_polygons(vec![quad(0.0), quad(1.0)]);
        let empty: BSPNode = BSPNode::new();
        node.clip_to(&empty);
        assert_eq!(node.all_polygons().len(), 2);
    }
}
