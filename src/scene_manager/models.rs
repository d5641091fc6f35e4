//! Procedural models and the static room
//!
//! Each model constructor adds one group node to the graph at the placement
//! position (raised by the model's vertical offset so it rests on the floor)
//! and returns its key.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Euler, Rad, Vector3};

use crate::catalog::ObjectKind;
use crate::gfx::scene::{Light, Material, Mesh, Node, NodeKey, NodeKind, SceneGraph, Shape, Transform};

const SEGMENTS: u32 = 32;

pub const PERSON_OFFSET: f32 = 0.6;
pub const DOG_OFFSET: f32 = 0.15;
pub const COUCH_OFFSET: f32 = 0.25;

/// Builds the model for `kind`; `None` for kinds with no model
pub fn build(graph: &mut SceneGraph, kind: &ObjectKind, name: &str, position: Vector3<f32>) -> Option<NodeKey> {
    let key = match kind {
        ObjectKind::Person => person(graph, name, position),
        ObjectKind::Dog => dog(graph, name, position),
        ObjectKind::Couch => couch(graph, name, position),
        ObjectKind::Lamp => lamp(graph, name, position),
        ObjectKind::Toy => toy(graph, name, position),
        ObjectKind::Unknown(_) => return None,
    };
    Some(key)
}

fn part(name: &str, shape: Shape, color: u32) -> Node {
    Node::new(name, NodeKind::Mesh(Mesh::new(shape, Material::from_hex(color))))
}

fn group_at(graph: &mut SceneGraph, name: &str, position: Vector3<f32>, lift: f32) -> NodeKey {
    graph.add_to_root(Node::group(name).at(position.x, position.y + lift, position.z))
}

pub fn person(graph: &mut SceneGraph, name: &str, position: Vector3<f32>) -> NodeKey {
    let group = group_at(graph, name, position, PERSON_OFFSET);
    graph.add_child(
        group,
        part(
            "body",
            Shape::Cylinder {
                radius_top: 0.2,
                radius_bottom: 0.2,
                height: 1.2,
                segments: SEGMENTS,
            },
            0x3366cc,
        ),
    );
    graph.add_child(
        group,
        part("head", Shape::Sphere { radius: 0.2, segments: SEGMENTS }, 0xffdbac).at(0.0, 0.7, 0.0),
    );
    group
}

pub fn dog(graph: &mut SceneGraph, name: &str, position: Vector3<f32>) -> NodeKey {
    let group = group_at(graph, name, position, DOG_OFFSET);
    graph.add_child(
        group,
        part(
            "body",
            Shape::Box {
                width: 0.4,
                height: 0.3,
                depth: 0.6,
            },
            0x8b4513,
        ),
    );
    graph.add_child(
        group,
        part("head", Shape::Sphere { radius: 0.2, segments: SEGMENTS }, 0x8b4513).at(0.0, 0.1, 0.3),
    );
    group
}

pub fn couch(graph: &mut SceneGraph, name: &str, position: Vector3<f32>) -> NodeKey {
    let group = group_at(graph, name, position, COUCH_OFFSET);
    graph.add_child(
        group,
        part(
            "base",
            Shape::Box {
                width: 2.0,
                height: 0.5,
                depth: 1.0,
            },
            0x666666,
        ),
    );
    graph.add_child(
        group,
        part(
            "back",
            Shape::Box {
                width: 2.0,
                height: 1.0,
                depth: 0.3,
            },
            0x666666,
        )
        .at(0.0, 0.5, -0.35),
    );
    group
}

/// Floor lamp with its own warm point light under the shade
pub fn lamp(graph: &mut SceneGraph, name: &str, position: Vector3<f32>) -> NodeKey {
    let group = group_at(graph, name, position, 0.0);
    graph.add_child(
        group,
        part(
            "base",
            Shape::Cylinder {
                radius_top: 0.2,
                radius_bottom: 0.3,
                height: 0.1,
                segments: SEGMENTS,
            },
            0x333333,
        ),
    );
    graph.add_child(
        group,
        part(
            "stand",
            Shape::Cylinder {
                radius_top: 0.05,
                radius_bottom: 0.05,
                height: 1.5,
                segments: SEGMENTS,
            },
            0x666666,
        )
        .at(0.0, 0.8, 0.0),
    );
    let shade = Mesh::new(
        Shape::Cone {
            radius: 0.3,
            height: 0.4,
            segments: SEGMENTS,
            open_ended: true,
        },
        Material::from_hex(0xeeeeee).double_sided(),
    );
    graph.add_child(group, Node::new("shade", NodeKind::Mesh(shade)).at(0.0, 1.6, 0.0));
    graph.add_child(
        group,
        Node::new("light", NodeKind::Light(Light::point(0xffa95c, 1.0, 5.0))).at(0.0, 1.5, 0.0),
    );
    group
}

pub fn toy(graph: &mut SceneGraph, name: &str, position: Vector3<f32>) -> NodeKey {
    let group = group_at(graph, name, position, 0.0);
    graph.add_child(
        group,
        part("ball", Shape::Sphere { radius: 0.1, segments: SEGMENTS }, 0xff5252),
    );
    group
}

/// Ambient fill, a sun-like key light and a warm corner light
pub fn add_lights(graph: &mut SceneGraph) {
    graph.add_to_root(Node::new("ambient", NodeKind::Light(Light::ambient(0xffffff, 0.5))));
    graph.add_to_root(
        Node::new("sun", NodeKind::Light(Light::directional(0xffffff, 0.8))).at(5.0, 5.0, 5.0),
    );
    graph.add_to_root(Node::new("warm", NodeKind::Light(Light::point(0xffa95c, 1.0, 0.0))).at(-5.0, 5.0, -5.0));
}

/// Floor plus the back and left walls
pub fn add_room(graph: &mut SceneGraph) {
    let floor = Mesh::new(
        Shape::Plane {
            width: 10.0,
            height: 10.0,
        },
        Material::from_hex(0x808080).with_roughness(0.8).with_metalness(0.2),
    );
    graph.add_to_root(
        Node::new("floor", NodeKind::Mesh(floor))
            .with_transform(Transform::default().with_rotation(Euler::new(Rad(-FRAC_PI_2), Rad(0.0), Rad(0.0)))),
    );

    let wall = Material::from_hex(0xf0f0f0).with_roughness(0.9).with_metalness(0.1);
    let wall_shape = Shape::Plane {
        width: 10.0,
        height: 8.0,
    };
    graph.add_to_root(
        Node::new("back_wall", NodeKind::Mesh(Mesh::new(wall_shape, wall))).at(0.0, 4.0, -5.0),
    );
    let left_wall = Transform::from_position(Vector3::new(-5.0, 4.0, 0.0))
        .with_rotation(Euler::new(Rad(0.0), Rad(FRAC_PI_2), Rad(0.0)));
    graph.add_to_root(
        Node::new("left_wall", NodeKind::Mesh(Mesh::new(wall_shape, wall)))
            .with_transform(left_wall),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Point3;

    #[test]
    fn models_rest_at_their_offsets() {
        let mut graph = SceneGraph::new();
        let origin = Vector3::new(1.0, 0.0, 2.0);
        let cases = [
            (ObjectKind::Person, 0.6),
            (ObjectKind::Dog, 0.15),
            (ObjectKind::Couch, 0.25),
            (ObjectKind::Lamp, 0.0),
            (ObjectKind::Toy, 0.0),
        ];
        for (kind, lift) in cases {
            let key = build(&mut graph, &kind, kind.as_str(), origin).unwrap();
            assert_relative_eq!(
                graph.world_position(key).unwrap(),
                Point3::new(1.0, lift, 2.0),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn unknown_kind_builds_nothing() {
        let mut graph = SceneGraph::new();
        let built = build(&mut graph, &ObjectKind::Unknown("sofa".into()), "Sofa", Vector3::new(0.0, 0.0, 0.0));
        assert!(built.is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn only_the_lamp_adds_light() {
        let mut graph = SceneGraph::new();
        let origin = Vector3::new(0.0, 0.0, 0.0);
        for kind in [ObjectKind::Person, ObjectKind::Dog, ObjectKind::Couch, ObjectKind::Toy] {
            build(&mut graph, &kind, "x", origin);
        }
        assert!(graph.lights().is_empty());

        let lamp = lamp(&mut graph, "FloorLamp", Vector3::new(4.0, 0.0, 0.0));
        let lights = graph.lights();
        assert_eq!(lights.len(), 1);
        assert_relative_eq!(lights[0].position, Point3::new(4.0, 1.5, 0.0), epsilon = 1e-6);
        assert_eq!(graph.subtree_len(lamp), 5);
    }

    #[test]
    fn room_is_three_planes_and_three_lights() {
        let mut graph = SceneGraph::new();
        add_room(&mut graph);
        add_lights(&mut graph);
        assert_eq!(graph.meshes().len(), 3);
        assert_eq!(graph.lights().len(), 3);

        let floor_normal = graph.meshes()[0].world * cgmath::Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(floor_normal.y, 1.0, epsilon = 1e-6);
    }
}
