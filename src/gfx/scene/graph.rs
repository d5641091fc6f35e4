//! Render graph arena
//!
//! Nodes live in a [`SlotMap`] so handles stay valid-or-detectably-stale
//! after removals. Every node except the root has exactly one parent, and
//! removing a node removes its whole subtree.

use cgmath::{Euler, Matrix4, Point3, Rad, SquareMatrix, Transform as _, Vector3, Zero};
use slotmap::{new_key_type, SlotMap};

use crate::audio::PositionalAudio;

use super::{light::Light, mesh::Mesh};

new_key_type! {
    /// Handle to a node in a [`SceneGraph`]
    pub struct NodeKey;
}

/// Local transform of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// XYZ-order Euler angles
    pub rotation: Euler<Rad<f32>>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Euler<Rad<f32>>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Identity rotation as XYZ Euler angles
    pub fn identity_rotation() -> Euler<Rad<f32>> {
        Euler::new(Rad(0.0), Rad(0.0), Rad(0.0))
    }

    /// `T * Rx * Ry * Rz * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(self.rotation.x)
            * Matrix4::from_angle_y(self.rotation.y)
            * Matrix4::from_angle_z(self.rotation.z)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Self::identity_rotation(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Grouping node with no content of its own
    Group,
    Mesh(Mesh),
    Light(Light),
    AudioEmitter(PositionalAudio),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

/// A drawable mesh with its resolved world matrix
#[derive(Debug, Clone, Copy)]
pub struct WorldMesh<'a> {
    pub key: NodeKey,
    pub world: Matrix4<f32>,
    pub mesh: &'a Mesh,
}

/// A light with its resolved world position
#[derive(Debug, Clone, Copy)]
pub struct WorldLight<'a> {
    pub key: NodeKey,
    pub position: Point3<f32>,
    pub light: &'a Light,
}

/// An audio emitter with its resolved world position
#[derive(Debug, Clone, Copy)]
pub struct WorldEmitter<'a> {
    pub key: NodeKey,
    pub position: Point3<f32>,
    pub audio: &'a PositionalAudio,
}

/// Hierarchical scene container
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("root"));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Adds `node` as a direct child of the root
    pub fn add_to_root(&mut self, node: Node) -> NodeKey {
        let root = self.root;
        self.attach(root, node)
    }

    /// Adds `node` under `parent`; a stale `parent` falls back to the root
    pub fn add_child(&mut self, parent: NodeKey, node: Node) -> NodeKey {
        let parent = if self.nodes.contains_key(parent) {
            parent
        } else {
            log::warn!("add_child: parent {:?} is gone, attaching '{}' to root", parent, node.name);
            self.root
        };
        self.attach(parent, node)
    }

    fn attach(&mut self, parent: NodeKey, mut node: Node) -> NodeKey {
        node.parent = Some(parent);
        node.children.clear();
        let key = self.nodes.insert(node);
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(key);
        }
        key
    }

    /// Removes `key` and its whole subtree, returning how many nodes were
    /// dropped. The root cannot be removed.
    pub fn remove(&mut self, key: NodeKey) -> usize {
        if key == self.root || !self.nodes.contains_key(key) {
            return 0;
        }

        if let Some(parent) = self.nodes[key].parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|child| *child != key);
            }
        }

        let mut removed = 0;
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Total node count, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Number of nodes in the subtree rooted at `key`, `key` included
    pub fn subtree_len(&self, key: NodeKey) -> usize {
        let mut count = 0;
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                count += 1;
                stack.extend_from_slice(&node.children);
            }
        }
        count
    }

    /// Composes local transforms from the root down to `key`
    pub fn world_matrix(&self, key: NodeKey) -> Option<Matrix4<f32>> {
        let mut node = self.nodes.get(key)?;
        let mut world = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            world = node.transform.matrix() * world;
        }
        Some(world)
    }

    pub fn world_position(&self, key: NodeKey) -> Option<Point3<f32>> {
        self.world_matrix(key)
            .map(|m| m.transform_point(Point3::new(0.0, 0.0, 0.0)))
    }

    /// Depth-first walk from the root handing each node its world matrix
    fn walk<'a>(&'a self, mut visit: impl FnMut(NodeKey, &'a Node, Matrix4<f32>)) {
        let mut stack = vec![(self.root, Matrix4::identity())];
        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            let world = parent_world * node.transform.matrix();
            visit(key, node, world);
            for child in node.children.iter().rev() {
                stack.push((*child, world));
            }
        }
    }

    pub fn meshes(&self) -> Vec<WorldMesh<'_>> {
        let mut out = Vec::new();
        self.walk(|key, node, world| {
            if let NodeKind::Mesh(mesh) = &node.kind {
                out.push(WorldMesh { key, world, mesh });
            }
        });
        out
    }

    pub fn lights(&self) -> Vec<WorldLight<'_>> {
        let mut out = Vec::new();
        self.walk(|key, node, world| {
            if let NodeKind::Light(light) = &node.kind {
                out.push(WorldLight {
                    key,
                    position: world.transform_point(Point3::new(0.0, 0.0, 0.0)),
                    light,
                });
            }
        });
        out
    }

    pub fn audio_emitters(&self) -> Vec<WorldEmitter<'_>> {
        let mut out = Vec::new();
        self.walk(|key, node, world| {
            if let NodeKind::AudioEmitter(audio) = &node.kind {
                out.push(WorldEmitter {
                    key,
                    position: world.transform_point(Point3::new(0.0, 0.0, 0.0)),
                    audio,
                });
            }
        });
        out
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{material::Material, mesh::Shape};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn sphere() -> NodeKind {
        NodeKind::Mesh(Mesh::new(
            Shape::Sphere {
                radius: 0.2,
                segments: 8,
            },
            Material::default(),
        ))
    }

    #[test]
    fn new_graph_holds_only_the_root() {
        let graph = SceneGraph::new();
        assert_eq!(graph.len(), 1);
        assert!(graph.is_empty());
        assert!(graph.meshes().is_empty());
    }

    #[test]
    fn remove_drops_whole_subtree() {
        let mut graph = SceneGraph::new();
        let group = graph.add_to_root(Node::group("person"));
        let body = graph.add_child(group, Node::new("body", sphere()));
        let head = graph.add_child(group, Node::new("head", sphere()));
        let keep = graph.add_to_root(Node::group("floor"));
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.subtree_len(group), 3);

        assert_eq!(graph.remove(group), 3);
        assert_eq!(graph.len(), 2);
        assert!(!graph.contains(body));
        assert!(!graph.contains(head));
        assert!(graph.contains(keep));
        assert_eq!(graph.get(graph.root()).map(|r| r.children().len()), Some(1));
    }

    #[test]
    fn removing_root_or_stale_key_is_a_no_op() {
        let mut graph = SceneGraph::new();
        let node = graph.add_to_root(Node::group("toy"));
        assert_eq!(graph.remove(graph.root()), 0);
        assert_eq!(graph.remove(node), 1);
        assert_eq!(graph.remove(node), 0);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn stale_parent_falls_back_to_root() {
        let mut graph = SceneGraph::new();
        let gone = graph.add_to_root(Node::group("gone"));
        graph.remove(gone);
        let orphan = graph.add_child(gone, Node::group("orphan"));
        assert_eq!(graph.get(orphan).and_then(Node::parent), Some(graph.root()));
    }

    #[test]
    fn world_matrix_composes_parent_transforms() {
        let mut graph = SceneGraph::new();
        let group = graph.add_to_root(
            Node::group("lamp").with_transform(
                Transform::from_position(Vector3::new(4.0, 0.0, 0.0))
                    .with_rotation(Euler::new(Rad(0.0), Rad(FRAC_PI_2), Rad(0.0))),
            ),
        );
        let bulb = graph.add_child(group, Node::new("bulb", sphere()).at(0.0, 1.5, 1.0));

        let p = graph.world_position(bulb).unwrap();
        // +Z rotated a quarter turn about Y lands on +X
        assert_relative_eq!(p, Point3::new(5.0, 1.5, 0.0), epsilon = 1e-5);

        let meshes = graph.meshes();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].key, bulb);
    }

    #[test]
    fn lights_report_world_positions() {
        let mut graph = SceneGraph::new();
        let lamp = graph.add_to_root(Node::group("lamp").at(-3.0, 0.0, -2.0));
        graph.add_child(
            lamp,
            Node::new("light", NodeKind::Light(Light::point(0xffa95c, 1.0, 5.0))).at(0.0, 1.5, 0.0),
        );

        let lights = graph.lights();
        assert_eq!(lights.len(), 1);
        assert_relative_eq!(lights[0].position, Point3::new(-3.0, 1.5, -2.0), epsilon = 1e-6);
    }
}
