//! # Scene Graph Module
//!
//! The render graph the vignette viewer draws every frame: an arena of nodes
//! with parent/child links, local transforms and a small closed set of node
//! payloads (groups, meshes, lights and audio emitters).
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - node arena rooted at a single group node
//! - [`Node`] / [`NodeKind`] - a node and what it carries
//! - [`Transform`] - position, XYZ Euler rotation and scale
//! - [`Mesh`] / [`Shape`] - a procedural primitive with a [`Material`]
//! - [`Light`] - ambient, directional and point lights
//! - [`Vertex3D`] - GPU vertex format
//!
//! ## Usage
//!
//! ```rust
//! use vignette::gfx::scene::{Material, Mesh, Node, NodeKind, SceneGraph, Shape};
//!
//! let mut graph = SceneGraph::new();
//! let toy = graph.add_to_root(Node::group("SqueekyToy").at(3.0, 0.0, 0.1));
//! graph.add_child(
//!     toy,
//!     Node::new(
//!         "body",
//!         NodeKind::Mesh(Mesh::new(
//!             Shape::Sphere { radius: 0.1, segments: 32 },
//!             Material::from_hex(0xff5252),
//!         )),
//!     ),
//! );
//! assert_eq!(graph.meshes().len(), 1);
//! graph.remove(toy);
//! assert!(graph.is_empty());
//! ```

pub mod graph;
pub mod light;
pub mod material;
pub mod mesh;
pub mod vertex;

pub use graph::{Node, NodeKey, NodeKind, SceneGraph, Transform, WorldEmitter, WorldLight, WorldMesh};
pub use light::{Light, LightKind};
pub use material::Material;
pub use mesh::{Mesh, Shape, ShapeKey};
pub use vertex::Vertex3D;
