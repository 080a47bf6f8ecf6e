//! Drives a configurator against assets on disk and logs every host call.
//!
//! ```text
//! RUST_LOG=info cargo run --example headless -- <asset-root> [settings.json]
//! ```

use std::sync::Arc;

use glam::{Vec2, Vec3, Vec4};
use slotmap::SlotMap;

use configurator::configurator::{ApplyOutcome, DeviceClass, RotationPreset, TextureOverrides};
use configurator::resources::TextureSlot;
use configurator::scene::{DollyRange, Light, Model, OrbitLimits, SceneHandle, SceneHost};
use configurator::{Configurator, ConfiguratorSettings, FileResourceProvider, OrbitInput, ResourceCache};

#[derive(Default)]
struct LoggingHost {
    scenes: SlotMap<SceneHandle, ()>,
    batch: usize,
}

impl SceneHost for LoggingHost {
    fn create_scene(&mut self, background: Vec4) -> SceneHandle {
        let scene = self.scenes.insert(());
        log::info!("create_scene {scene:?} background={background}");
        scene
    }

    fn set_background(&mut self, _scene: SceneHandle, background: Vec4) {
        log::info!("  background {background}");
    }

    fn set_camera(&mut self, _scene: SceneHandle, position: Vec3, target: Vec3) {
        log::info!("  camera {position} -> {target}");
    }

    fn set_orbit_limits(&mut self, _scene: SceneHandle, limits: OrbitLimits) {
        log::info!(
            "  orbit azimuth [{:.3}, {:.3}] polar [{:.3}, {:.3}]",
            limits.min_azimuth,
            limits.max_azimuth,
            limits.min_polar,
            limits.max_polar
        );
    }

    fn set_orbit_distance(&mut self, _scene: SceneHandle, range: DollyRange) {
        log::info!("  dolly [{}, {}]", range.min, range.max);
    }

    fn set_orbit_damping(&mut self, _scene: SceneHandle, factor: f32) {
        log::info!("  damping {factor}");
    }

    fn set_pan_enabled(&mut self, _scene: SceneHandle, enabled: bool) {
        log::info!("  pan {enabled}");
    }

    fn set_lights(&mut self, _scene: SceneHandle, lights: &[Light]) {
        for light in lights {
            log::info!("  light {:?} intensity={}", light.kind, light.intensity);
        }
    }

    fn attach_model(&mut self, _scene: SceneHandle, model: &Model, position: Vec3, rotation_y: f32) {
        let painted = model
            .find_meshes_by_name("main_change")
            .iter()
            .filter(|&&h| model.get_node(h).is_some_and(|n| n.material.is_some()))
            .count();
        log::info!(
            "  model {} ({} nodes, {painted} painted) at {position} yaw={rotation_y:.3}",
            model.label,
            model.len()
        );
    }

    fn teardown(&mut self, scene: SceneHandle) {
        self.scenes.remove(scene);
        log::info!("teardown {scene:?}");
    }

    fn begin_update(&mut self, _scene: SceneHandle) {
        self.batch += 1;
        log::info!("batch #{}", self.batch);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let root = args.next().unwrap_or_else(|| "demos/assets".to_string());
    let settings = match args.next() {
        Some(path) => ConfiguratorSettings::from_json_file(path)?,
        None => ConfiguratorSettings::default(),
    };

    let device = DeviceClass::for_viewport_width(1280.0, settings.compact_max_width);
    let cache = Arc::new(ResourceCache::new(FileResourceProvider::new(&root)));
    let mut configurator = Configurator::new(cache, LoggingHost::default(), settings, device);

    for failure in configurator.initialize().await? {
        log::warn!("{failure}");
    }

    configurator.set_rotate_status(RotationPreset::Left);
    configurator.set_zoom_status(true);

    let normal = configurator.settings().default_textures.normal.clone();
    let overrides = TextureOverrides::default().with(TextureSlot::BaseColor, normal);
    let (outcome, failures) = configurator.select_textures(overrides).await;
    if outcome != ApplyOutcome::Applied || !failures.is_empty() {
        log::warn!("Selection {outcome:?}, {} failed slots", failures.len());
    }

    configurator.orbit_input(&OrbitInput {
        rotate: Vec2::new(120.0, -40.0),
        scroll: 2.0,
        screen_height: 720.0,
        ..Default::default()
    });
    for _ in 0..30 {
        configurator.tick(1.0 / 60.0);
    }

    let host = configurator.teardown();
    log::info!("{} update batches pushed", host.batch);
    Ok(())
}
