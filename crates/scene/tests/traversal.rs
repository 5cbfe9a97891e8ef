//! End-to-end traversal scenarios against a recording device.

use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use lumen_assets::{Material, Mesh, MeshPart};
use lumen_math::{Mat4, PI, Vec3, scale, translate};
use lumen_render::{DeviceCall, GraphicsDevice, RecordingDevice, ShaderHandle, TextureHandle, Uniform};
use lumen_scene::{
    Camera, Children, Model, NodeBehavior, NodeId, NodeKind, RenderState, SceneGraph, Skybox,
    UpdateChildren,
};

const SKY_SHADER: ShaderHandle = ShaderHandle(1);
const MODEL_SHADER: ShaderHandle = ShaderHandle(2);
const CUBE_MAP: TextureHandle = TextureHandle(7);

/// Records the state it is handed, optionally overrides `world` for its
/// subtree.
struct Witness {
    seen: Rc<RefCell<Vec<RenderState>>>,
    world: Option<Mat4>,
}

impl NodeBehavior for Witness {
    fn draw(&self, mut state: RenderState, device: &mut dyn GraphicsDevice, children: Children<'_>) {
        self.seen.borrow_mut().push(state);
        if let Some(world) = self.world {
            state.world = world;
        }
        children.draw(state, device);
    }
}

struct Explode;

impl NodeBehavior for Explode {
    fn draw(&self, _: RenderState, _: &mut dyn GraphicsDevice, _: Children<'_>) {
        panic!("device lost");
    }
}

fn witness(graph: &mut SceneGraph, world: Option<Mat4>) -> (NodeId, Rc<RefCell<Vec<RenderState>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let id = graph.insert(NodeKind::custom(Witness {
        seen: Rc::clone(&seen),
        world,
    }));
    (id, seen)
}

fn two_part_mesh() -> Mesh {
    let part = |count: usize, material: Material| MeshPart {
        positions: vec![Vec3::zero(); count],
        normals: vec![Vec3::new(0.0, 1.0, 0.0); count],
        material,
    };
    Mesh::new(vec![
        part(3, Material::default()),
        part(
            6,
            Material {
                albedo: Vec3::new(1.0, 0.0, 0.0),
                roughness: 0.8,
                metalness: 1.0,
            },
        ),
    ])
}

fn viewer() -> Camera {
    Camera {
        position: Vec3::new(-5.0, 2.0, -3.0),
        direction: Vec3::new(5.0, 0.0, 3.0),
        ..Camera::default()
    }
}

fn printed(calls: &[DeviceCall]) -> Vec<String> {
    calls.iter().map(ToString::to_string).collect()
}

fn uniform(calls: &[DeviceCall], shader: ShaderHandle, name: &str) -> Uniform {
    let start = calls
        .iter()
        .position(|c| *c == DeviceCall::BindAndUse(shader))
        .expect("shader bound");
    calls[start..]
        .iter()
        .find_map(|c| match c {
            DeviceCall::SetUniform { name: n, value } if n == name => Some(*value),
            _ => None,
        })
        .expect("uniform set")
}

const SKYBOX_CALLS: [&str; 8] = [
    "use shader#1",
    "uniform transform = mat4",
    "uniform world = mat4",
    "uniform cube = texture#7",
    "uniform albedo = (1.000, 1.000, 1.000)",
    "uniform roughness = 0.400",
    "uniform metalness = 0.000",
    "draw 36 vertices",
];

const MODEL_CALLS: [&str; 11] = [
    "use shader#2",
    "uniform transform = mat4",
    "uniform world = mat4",
    "uniform albedo = (1.000, 1.000, 1.000)",
    "uniform roughness = 0.400",
    "uniform metalness = 0.000",
    "draw 3 vertices",
    "uniform albedo = (1.000, 0.000, 0.000)",
    "uniform roughness = 0.800",
    "uniform metalness = 1.000",
    "draw 6 vertices",
];

#[test]
fn camera_transform_matches_closed_form() {
    let camera = Camera {
        position: Vec3::zero(),
        direction: Vec3::new(0.0, 0.0, 1.0),
        up: Vec3::new(0.0, 1.0, 0.0),
        fov: PI / 2.0,
        aspect: 1.0,
        near: 1.0,
        far: 100.0,
    };
    let expected = Mat4::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 100.0 / 99.0, -100.0 / 99.0],
        [0.0, 0.0, 1.0, 0.0],
    ]);
    assert_abs_diff_eq!(camera.transform(), expected, epsilon = 1e-5);
}

#[test]
fn skybox_brackets_its_subtree_with_depth_test_off() {
    let mut graph = SceneGraph::new();
    let root = graph.insert_group();
    let camera = graph.insert(viewer());
    let sky = graph.insert(Skybox::new(SKY_SHADER, CUBE_MAP));
    let model = graph.insert(Model::new(Rc::new(two_part_mesh()), MODEL_SHADER));
    graph.add(root, camera);
    graph.add(camera, sky);
    graph.add(sky, model);

    let mut device = RecordingDevice::new();
    graph.draw(root, RenderState::default(), &mut device);

    let mut expected = vec!["clear color=true depth=true", "depth test off"];
    expected.extend(SKYBOX_CALLS);
    expected.extend(MODEL_CALLS);
    expected.push("depth test on");
    assert_eq!(printed(device.calls()), expected);
    assert!(device.depth_test_enabled());

    // Inside the skybox the view has no translation.
    let cam = graph.camera(camera).unwrap();
    let mut rotation = cam.view();
    for row in 0..3 {
        rotation[(row, 3)] = 0.0;
    }
    let transform = uniform(device.calls(), MODEL_SHADER, "transform");
    assert_eq!(transform, Uniform::Matrix(cam.projection() * rotation));
    assert_eq!(uniform(device.calls(), SKY_SHADER, "transform"), transform);
    assert_eq!(uniform(device.calls(), MODEL_SHADER, "world"), Uniform::Matrix(Mat4::new()));
}

#[test]
fn model_after_skybox_draws_with_depth_test_on() {
    let mut graph = SceneGraph::new();
    let root = graph.insert_group();
    let camera = graph.insert(viewer());
    let sky = graph.insert(Skybox::new(SKY_SHADER, CUBE_MAP));
    let model = graph.insert(Model::new(Rc::new(two_part_mesh()), MODEL_SHADER));
    graph.add(root, camera);
    graph.add(camera, sky);
    graph.add(camera, model);

    let mut device = RecordingDevice::new();
    graph.draw(root, RenderState::default(), &mut device);

    let mut expected = vec!["clear color=true depth=true", "depth test off"];
    expected.extend(SKYBOX_CALLS);
    expected.push("depth test on");
    expected.extend(MODEL_CALLS);
    assert_eq!(printed(device.calls()), expected);

    let cam = graph.camera(camera).unwrap();
    assert_eq!(
        uniform(device.calls(), MODEL_SHADER, "transform"),
        Uniform::Matrix(cam.transform())
    );
}

#[test]
fn sibling_never_sees_mutated_state() {
    let mut graph = SceneGraph::new();
    let root = graph.insert_group();
    let moved = translate(3.0, 0.0, -1.0);
    let (a, seen_a) = witness(&mut graph, Some(moved));
    let (a_child, seen_a_child) = witness(&mut graph, None);
    let (b, seen_b) = witness(&mut graph, None);
    graph.add(root, a);
    graph.add(a, a_child);
    graph.add(root, b);

    let initial = RenderState {
        world: scale(2.0, 2.0, 2.0),
        ..RenderState::default()
    };
    graph.draw(root, initial, &mut RecordingDevice::new());

    assert_eq!(seen_a.borrow().as_slice(), &[initial]);
    assert_eq!(seen_a_child.borrow()[0].world, moved);
    assert_eq!(seen_b.borrow().as_slice(), &[initial]);
}

#[test]
fn model_children_inherit_its_state_and_draw_after_it() {
    /// Records its state, then issues one draw so its place in the call
    /// stream is visible.
    struct Marker {
        seen: Rc<RefCell<Vec<RenderState>>>,
    }

    impl NodeBehavior for Marker {
        fn draw(&self, state: RenderState, device: &mut dyn GraphicsDevice, children: Children<'_>) {
            self.seen.borrow_mut().push(state);
            device.draw_primitives(1);
            children.draw(state, device);
        }
    }

    let mut graph = SceneGraph::new();
    let placed = translate(2.0, -1.0, 5.0) * scale(0.5, 0.5, 0.5);
    let (placer, seen_placer) = witness(&mut graph, Some(placed));
    let model = graph.insert(Model::new(Rc::new(two_part_mesh()), MODEL_SHADER));
    let seen_marker = Rc::new(RefCell::new(Vec::new()));
    let marker = graph.insert(NodeKind::custom(Marker {
        seen: Rc::clone(&seen_marker),
    }));
    graph.add(placer, model);
    graph.add(model, marker);

    let initial = RenderState {
        projection: scale(1.0, 2.0, 3.0),
        view: translate(0.0, 0.0, -4.0),
        world: Mat4::new(),
    };
    let mut device = RecordingDevice::new();
    graph.draw(placer, initial, &mut device);

    let received = RenderState {
        world: placed,
        ..initial
    };
    assert_eq!(seen_placer.borrow().as_slice(), &[initial]);
    assert_eq!(seen_marker.borrow().as_slice(), &[received]);
    assert_eq!(uniform(device.calls(), MODEL_SHADER, "world"), Uniform::Matrix(placed));
    assert_eq!(
        uniform(device.calls(), MODEL_SHADER, "transform"),
        Uniform::Matrix(received.transform())
    );

    let mut expected = MODEL_CALLS.to_vec();
    expected.push("draw 1 vertices");
    assert_eq!(printed(device.calls()), expected);
}

#[test]
fn camera_starts_a_fresh_pass() {
    let mut graph = SceneGraph::new();
    let root = graph.insert_group();
    let camera = graph.insert(viewer());
    let (inside, seen) = witness(&mut graph, None);
    graph.add(root, camera);
    graph.add(camera, inside);

    let inherited = RenderState {
        projection: scale(9.0, 9.0, 9.0),
        view: translate(1.0, 1.0, 1.0),
        world: translate(4.0, 4.0, 4.0),
    };
    graph.draw(root, inherited, &mut RecordingDevice::new());

    let cam = graph.camera(camera).unwrap();
    let state = seen.borrow()[0];
    assert_eq!(state.projection, cam.projection());
    assert_eq!(state.view, cam.view());
    assert_eq!(state.world, Mat4::new());
}

#[test]
fn depth_test_restored_when_a_child_panics() {
    let mut graph = SceneGraph::new();
    let sky = graph.insert(Skybox::new(SKY_SHADER, CUBE_MAP));
    let bomb = graph.insert(NodeKind::custom(Explode));
    graph.add(sky, bomb);

    let mut device = RecordingDevice::new();
    let result = catch_unwind(AssertUnwindSafe(|| {
        graph.draw(sky, RenderState::default(), &mut device);
    }));

    assert!(result.is_err());
    assert!(device.depth_test_enabled());
    assert_eq!(device.calls().last(), Some(&DeviceCall::SetDepthTest(true)));
}

#[test]
fn previously_disabled_depth_test_stays_disabled() {
    let mut graph = SceneGraph::new();
    let sky = graph.insert(Skybox::new(SKY_SHADER, CUBE_MAP));

    let mut device = RecordingDevice::new();
    device.set_depth_test(false);
    graph.draw(sky, RenderState::default(), &mut device);

    assert!(!device.depth_test_enabled());
    assert_eq!(device.calls().last(), Some(&DeviceCall::SetDepthTest(false)));
}

#[test]
fn update_reaches_custom_nodes_before_their_children() {
    struct Clock {
        name: &'static str,
        ticks: Rc<RefCell<Vec<(&'static str, f32)>>>,
    }

    impl NodeBehavior for Clock {
        fn update(&mut self, dt: f32, mut children: UpdateChildren<'_>) {
            self.ticks.borrow_mut().push((self.name, dt));
            children.update(dt);
        }
    }

    let ticks = Rc::new(RefCell::new(Vec::new()));
    let mut graph = SceneGraph::new();
    let root = graph.insert_group();
    let camera = graph.insert(Camera::default());
    let outer = graph.insert(NodeKind::custom(Clock {
        name: "outer",
        ticks: Rc::clone(&ticks),
    }));
    let inner = graph.insert(NodeKind::custom(Clock {
        name: "inner",
        ticks: Rc::clone(&ticks),
    }));
    graph.add(root, camera);
    graph.add(camera, outer);
    graph.add(outer, inner);

    graph.update(root, 0.25);
    graph.update(root, 0.5);
    assert_eq!(
        *ticks.borrow(),
        [("outer", 0.25), ("inner", 0.25), ("outer", 0.5), ("inner", 0.5)]
    );
}
