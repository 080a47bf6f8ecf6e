//! Shared test doubles: an in-memory resource provider and a scene host
//! that records every call.

#![allow(dead_code)]

use std::io::Cursor;

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};
use glam::{Vec3, Vec4};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use configurator::assets::{ResourcePath, ResourceProvider};
use configurator::resources::MeshStandardMaterial;
use configurator::scene::{DollyRange, Light, Model, OrbitLimits, SceneHandle, SceneHost};

pub const MODEL_PATH: &str = "/House.glb";
pub const PAINTABLE: &str = "main_change";

pub const BASE_COLOR: &str = "/Project_textures/01_beachport/textures/beachport_basecolor.jpg";
pub const ARM: &str = "/Project_textures/01_beachport/textures/beachport_arm.jpg";
pub const NORMAL: &str = "/Project_textures/01_beachport/textures/beachport_normal.jpg";
pub const HEIGHT: &str = "/Project_textures/01_beachport/textures/beachport_height.jpg";

/// A house with one paintable mesh and one other mesh.
pub const HOUSE_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [ { "nodes": [0] } ],
    "nodes": [
        { "name": "house", "children": [1, 2] },
        { "name": "main_change", "mesh": 0 },
        { "name": "roof", "mesh": 0 }
    ],
    "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
    "accessors": [
        { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 1.0] }
    ],
    "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
    "buffers": [ { "byteLength": 36, "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA" } ]
}"#;

/// A model authored without a paintable region.
pub const SHED_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [ { "nodes": [0] } ],
    "nodes": [
        { "name": "shed", "mesh": 0 }
    ],
    "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
    "accessors": [
        { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 1.0] }
    ],
    "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
    "buffers": [ { "byteLength": 36, "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA" } ]
}"#;

/// Encodes a 2x2 single-color PNG.
pub fn png_bytes(color: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(color));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

type GateSignal = Shared<oneshot::Receiver<()>>;

struct Gate {
    sender: oneshot::Sender<()>,
    signal: GateSignal,
}

/// In-memory [`ResourceProvider`] that counts fetches per path.
///
/// A held path suspends its fetches until it is released.
#[derive(Default)]
pub struct MemoryProvider {
    files: Mutex<FxHashMap<String, Vec<u8>>>,
    fetches: Mutex<FxHashMap<String, usize>>,
    gates: Mutex<FxHashMap<String, Gate>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// House model plus the four default textures.
    pub fn with_house() -> Self {
        let provider = Self::new();
        provider.insert(MODEL_PATH, HOUSE_GLTF.as_bytes().to_vec());
        provider.insert(BASE_COLOR, png_bytes([200, 180, 150, 255]));
        provider.insert(ARM, png_bytes([255, 200, 0, 255]));
        provider.insert(NORMAL, png_bytes([128, 128, 255, 255]));
        provider.insert(HEIGHT, png_bytes([127, 127, 127, 255]));
        provider
    }

    pub fn insert(&self, path: &str, bytes: Vec<u8>) {
        self.files.lock().insert(path.to_string(), bytes);
    }

    pub fn insert_texture(&self, path: &str) {
        self.insert(path, png_bytes([10, 20, 30, 255]));
    }

    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetches.lock().get(path).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().values().sum()
    }

    /// Suspends fetches of `path` until [`release`](Self::release).
    pub fn hold(&self, path: &str) {
        let (sender, receiver) = oneshot::channel();
        let gate = Gate {
            sender,
            signal: receiver.shared(),
        };
        self.gates.lock().insert(path.to_string(), gate);
    }

    pub fn release(&self, path: &str) {
        if let Some(gate) = self.gates.lock().remove(path) {
            let _ = gate.sender.send(());
        }
    }

    async fn fetch(&self, path: &ResourcePath) -> anyhow::Result<Vec<u8>> {
        *self
            .fetches
            .lock()
            .entry(path.as_str().to_string())
            .or_default() += 1;

        let signal = self.gates.lock().get(path.as_str()).map(|g| g.signal.clone());
        if let Some(signal) = signal {
            let _ = signal.await;
        }

        self.files
            .lock()
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 not found: {path}"))
    }
}

impl ResourceProvider for MemoryProvider {
    async fn fetch_model(&self, path: &ResourcePath) -> anyhow::Result<Vec<u8>> {
        self.fetch(path).await
    }

    async fn fetch_texture(&self, path: &ResourcePath) -> anyhow::Result<Vec<u8>> {
        self.fetch(path).await
    }
}

/// One recorded [`SceneHost`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateScene(Vec4),
    Background(Vec4),
    Camera { position: Vec3, target: Vec3 },
    OrbitLimits(OrbitLimits),
    OrbitDistance(DollyRange),
    OrbitDamping(f32),
    PanEnabled(bool),
    Lights(Vec<Light>),
    AttachModel {
        position: Vec3,
        rotation_y: f32,
        /// Material of the first paintable node at attach time.
        paintable: Option<MeshStandardMaterial>,
    },
    Teardown,
}

/// [`SceneHost`] that records calls, grouped by update batch.
#[derive(Default)]
pub struct RecordingHost {
    scenes: SlotMap<SceneHandle, ()>,
    open: Option<Vec<HostCall>>,
    /// Committed batches, oldest first.
    pub batches: Vec<Vec<HostCall>>,
    /// Calls made outside of a batch.
    pub unbatched: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_batch(&self) -> &[HostCall] {
        self.batches.last().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn live_scenes(&self) -> usize {
        self.scenes.len()
    }

    fn record(&mut self, call: HostCall) {
        match self.open.as_mut() {
            Some(batch) => batch.push(call),
            None => self.unbatched.push(call),
        }
    }
}

/// Camera position and target pushed in `batch`.
pub fn camera_of(batch: &[HostCall]) -> (Vec3, Vec3) {
    batch
        .iter()
        .find_map(|call| match call {
            HostCall::Camera { position, target } => Some((*position, *target)),
            _ => None,
        })
        .expect("batch sets no camera")
}

pub fn lights_of(batch: &[HostCall]) -> Vec<Light> {
    batch
        .iter()
        .find_map(|call| match call {
            HostCall::Lights(lights) => Some(lights.clone()),
            _ => None,
        })
        .expect("batch sets no lights")
}

/// Position, rotation and paintable material of the attached model.
pub fn attach_of(batch: &[HostCall]) -> (Vec3, f32, Option<MeshStandardMaterial>) {
    batch
        .iter()
        .find_map(|call| match call {
            HostCall::AttachModel {
                position,
                rotation_y,
                paintable,
            } => Some((*position, *rotation_y, paintable.clone())),
            _ => None,
        })
        .expect("batch attaches no model")
}

impl SceneHost for RecordingHost {
    fn create_scene(&mut self, background: Vec4) -> SceneHandle {
        self.record(HostCall::CreateScene(background));
        self.scenes.insert(())
    }

    fn set_background(&mut self, _scene: SceneHandle, background: Vec4) {
        self.record(HostCall::Background(background));
    }

    fn set_camera(&mut self, _scene: SceneHandle, position: Vec3, target: Vec3) {
        self.record(HostCall::Camera { position, target });
    }

    fn set_orbit_limits(&mut self, _scene: SceneHandle, limits: OrbitLimits) {
        self.record(HostCall::OrbitLimits(limits));
    }

    fn set_orbit_distance(&mut self, _scene: SceneHandle, range: DollyRange) {
        self.record(HostCall::OrbitDistance(range));
    }

    fn set_orbit_damping(&mut self, _scene: SceneHandle, factor: f32) {
        self.record(HostCall::OrbitDamping(factor));
    }

    fn set_pan_enabled(&mut self, _scene: SceneHandle, enabled: bool) {
        self.record(HostCall::PanEnabled(enabled));
    }

    fn set_lights(&mut self, _scene: SceneHandle, lights: &[Light]) {
        self.record(HostCall::Lights(lights.to_vec()));
    }

    fn attach_model(&mut self, _scene: SceneHandle, model: &Model, position: Vec3, rotation_y: f32) {
        let paintable = model
            .find_meshes_by_name(PAINTABLE)
            .first()
            .and_then(|&h| model.get_node(h))
            .and_then(|node| node.material.clone());
        self.record(HostCall::AttachModel {
            position,
            rotation_y,
            paintable,
        });
    }

    fn teardown(&mut self, scene: SceneHandle) {
        self.record(HostCall::Teardown);
        self.scenes.remove(scene);
    }

    fn begin_update(&mut self, _scene: SceneHandle) {
        assert!(self.open.is_none(), "nested update batch");
        self.open = Some(Vec::new());
    }

    fn commit_update(&mut self, _scene: SceneHandle) {
        let batch = self.open.take().expect("commit without begin");
        self.batches.push(batch);
    }
}
