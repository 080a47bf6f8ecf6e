//! View Control State Machine
//!
//! ```text
//!   Uninitialized ──initialize()──▶ Ready ◀──────────────┐
//!        ▲                            │                   │
//!        │ set_model_path()           │ begin_texture_    │ apply_resolution()
//!        └────────────────────────────┤ selection()       │
//!                                     ▼                   │
//!                                Recomputing ─────────────┘
//! ```
//!
//! [`Configurator`] is the sole writer of the applied texture set and view
//! parameters. Each input change is pushed to the [`SceneHost`] as one
//! batch. Texture selections resolve asynchronously; every selection gets a
//! generation number and only the latest issued generation may be applied,
//! so a slow, superseded selection can never overwrite a newer one.

use std::sync::Arc;

use crate::assets::{ResourceCache, ResourcePath, ResourceProvider};
use crate::configurator::binder::{BindOutcome, apply_material};
use crate::configurator::resolver::{AppliedSelection, Resolution, TextureOverrides, resolve};
use crate::configurator::view::{
    DeviceClass, ORBIT_DAMPING, RotationPreset, ViewParameters, derive_view_parameters,
};
use crate::errors::{ResourceLoadError, Result};
use crate::resources::texture::{TextureSet, TextureSlot};
use crate::scene::host::{SceneHandle, SceneHost};
use crate::scene::model::Model;
use crate::settings::ConfiguratorSettings;
use crate::utils::orbit_control::{OrbitControls, OrbitInput};

/// Externally visible lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Model or initial textures not loaded yet; the host shows nothing.
    Uninitialized,
    /// Host reflects the latest inputs.
    Ready,
    /// A texture selection has been issued and not yet applied.
    Recomputing,
}

/// Result of [`Configurator::apply_resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer selection was issued after this one; discarded.
    Superseded,
    /// The configurator was torn down or re-mounted meanwhile; discarded.
    NotReady,
}

/// Caller-controlled inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguratorInputs {
    pub model_path: ResourcePath,
    pub overrides: TextureOverrides,
    pub zoom: bool,
    pub rotation: RotationPreset,
    pub device: DeviceClass,
}

/// A texture selection waiting to be resolved.
///
/// Holds no borrow of the configurator, so several selections can be in
/// flight while the configurator keeps handling other input.
pub struct PendingSelection<P: ResourceProvider> {
    generation: u64,
    cache: Arc<ResourceCache<P>>,
    overrides: TextureOverrides,
    defaults: TextureSet,
    previous: AppliedSelection,
}

impl<P: ResourceProvider> PendingSelection<P> {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Loads every changed override. Never fails; failed slots use defaults.
    pub async fn resolve(self) -> ResolvedSelection {
        let resolution = resolve(
            &*self.cache,
            &self.overrides,
            &self.defaults,
            Some(&self.previous),
        )
        .await;

        ResolvedSelection {
            generation: self.generation,
            overrides: self.overrides,
            resolution,
        }
    }
}

/// A resolved texture selection, ready to be applied.
#[derive(Debug, Clone)]
pub struct ResolvedSelection {
    pub generation: u64,
    pub overrides: TextureOverrides,
    pub resolution: Resolution,
}

/// Loaded state of a configurator.
struct Session {
    scene: SceneHandle,
    model: Model,
    defaults: TextureSet,
    applied: AppliedSelection,
    params: ViewParameters,
    orbit: OrbitControls,
}

pub struct Configurator<P: ResourceProvider, H: SceneHost> {
    cache: Arc<ResourceCache<P>>,
    host: H,
    settings: ConfiguratorSettings,
    inputs: ConfiguratorInputs,
    session: Option<Session>,
    preload: ViewParameters,
    issued_generation: u64,
    applied_generation: u64,
}

impl<P: ResourceProvider, H: SceneHost> Configurator<P, H> {
    pub fn new(
        cache: Arc<ResourceCache<P>>,
        host: H,
        settings: ConfiguratorSettings,
        device: DeviceClass,
    ) -> Self {
        let inputs = ConfiguratorInputs {
            model_path: settings.model_path.clone(),
            overrides: TextureOverrides::default(),
            zoom: false,
            rotation: RotationPreset::Front,
            device,
        };

        Self {
            cache,
            host,
            settings,
            inputs,
            session: None,
            preload: ViewParameters::preload(device),
            issued_generation: 0,
            applied_generation: 0,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Loads the model, the default textures and the current selection,
    /// then pushes the first batch and enters `Ready`.
    ///
    /// On failure the configurator stays `Uninitialized` and may be retried.
    /// Failed overrides do not fail initialization; they are returned.
    pub async fn initialize(&mut self) -> Result<Vec<ResourceLoadError>> {
        if self.session.is_some() {
            return Ok(Vec::new());
        }

        let model_path = self.inputs.model_path.clone();
        let paths = &self.settings.default_textures;

        let (model_handle, base_color, arm, normal, height) = futures::try_join!(
            self.cache.load_model(&model_path),
            self.cache.load_texture(&paths.base_color),
            self.cache.load_texture(&paths.arm),
            self.cache.load_texture(&paths.normal),
            self.cache.load_texture(&paths.height),
        )?;

        let defaults = TextureSet { base_color, arm, normal, height };

        let Some(asset) = self.cache.model(model_handle) else {
            return Err(ResourceLoadError::new(model_path, "model missing from cache").into());
        };
        let model = Model::instantiate(&asset);

        // Inputs may not change while `&mut self` is held, so this selection
        // is the latest one.
        self.issued_generation += 1;
        let generation = self.issued_generation;
        let overrides = self.inputs.overrides.clone();
        let resolution = resolve(&*self.cache, &overrides, &defaults, None).await;

        let params = self.derive();
        let scene = self.host.create_scene(params.background_color);

        let mut orbit = OrbitControls::new(params.orbit_target, 1.0);
        orbit.sync_from(params.camera_position, params.orbit_target);

        self.session = Some(Session {
            scene,
            model,
            defaults,
            applied: AppliedSelection {
                overrides,
                textures: resolution.textures,
            },
            params,
            orbit,
        });
        self.applied_generation = generation;

        self.rebind_material();
        self.push_view();

        log::info!("Configurator ready: {}", self.inputs.model_path);
        Ok(resolution.failures)
    }

    /// Tears the scene down and returns the host.
    ///
    /// Cached textures and models stay in the shared cache.
    pub fn teardown(mut self) -> H {
        self.unmount();
        self.host
    }

    fn unmount(&mut self) {
        if let Some(session) = self.session.take() {
            self.host.teardown(session.scene);
            log::info!("Configurator torn down: {}", session.model.label);
        }
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    pub fn set_device_class(&mut self, device: DeviceClass) {
        if self.inputs.device != device {
            self.inputs.device = device;
            self.preload = ViewParameters::preload(device);
            self.recompute_view();
        }
    }

    pub fn set_zoom_status(&mut self, zoom: bool) {
        if self.inputs.zoom != zoom {
            self.inputs.zoom = zoom;
            self.recompute_view();
        }
    }

    pub fn set_rotate_status(&mut self, rotation: RotationPreset) {
        if self.inputs.rotation != rotation {
            self.inputs.rotation = rotation;
            self.recompute_view();
        }
    }

    /// Raw preset index from caller input. Unknown values select `Front`.
    pub fn set_rotate_status_raw(&mut self, value: i64) {
        self.set_rotate_status(RotationPreset::from_raw(value));
    }

    /// Switching models unmounts the current scene; call
    /// [`initialize`](Self::initialize) again to show the new one.
    pub fn set_model_path(&mut self, path: impl Into<ResourcePath>) {
        let path = path.into();
        if self.inputs.model_path != path {
            self.unmount();
            self.issued_generation += 1;
            self.inputs.model_path = path;
        }
    }

    /// Records a new texture selection and returns the work to resolve it.
    ///
    /// Returns `None` before `Ready`; the selection is then picked up by
    /// [`initialize`](Self::initialize).
    ///
    /// The phase stays [`Phase::Recomputing`] until the latest selection is
    /// applied. Dropping the returned [`PendingSelection`] without applying
    /// it leaves the machine `Recomputing` until a later selection is.
    pub fn begin_texture_selection(
        &mut self,
        overrides: TextureOverrides,
    ) -> Option<PendingSelection<P>> {
        self.inputs.overrides = overrides.clone();
        self.issued_generation += 1;

        let session = self.session.as_ref()?;
        log::debug!("Texture selection {} issued", self.issued_generation);

        Some(PendingSelection {
            generation: self.issued_generation,
            cache: Arc::clone(&self.cache),
            overrides,
            defaults: session.defaults,
            previous: session.applied.clone(),
        })
    }

    /// Convenience for a single slot, keeping the other selections.
    pub fn begin_slot_selection(
        &mut self,
        slot: TextureSlot,
        path: Option<ResourcePath>,
    ) -> Option<PendingSelection<P>> {
        let mut overrides = self.inputs.overrides.clone();
        overrides.set(slot, path);
        self.begin_texture_selection(overrides)
    }

    /// Applies a resolved selection if it is still the latest one.
    pub fn apply_resolution(&mut self, resolved: ResolvedSelection) -> ApplyOutcome {
        if self.session.is_none() {
            return ApplyOutcome::NotReady;
        }
        if resolved.generation != self.issued_generation {
            log::warn!(
                "Discarding texture selection {} superseded by {}",
                resolved.generation,
                self.issued_generation
            );
            return ApplyOutcome::Superseded;
        }

        if let Some(session) = self.session.as_mut() {
            session.applied = AppliedSelection {
                overrides: resolved.overrides,
                textures: resolved.resolution.textures,
            };
        }
        self.applied_generation = resolved.generation;

        if self.rebind_material() != BindOutcome::Unchanged {
            self.push_view();
        }
        ApplyOutcome::Applied
    }

    /// Issues, resolves and applies a selection in one step.
    pub async fn select_textures(
        &mut self,
        overrides: TextureOverrides,
    ) -> (ApplyOutcome, Vec<ResourceLoadError>) {
        let Some(pending) = self.begin_texture_selection(overrides) else {
            return (ApplyOutcome::NotReady, Vec::new());
        };
        let resolved = pending.resolve().await;
        let failures = resolved.resolution.failures.clone();
        (self.apply_resolution(resolved), failures)
    }

    // ========================================================================
    // User interaction
    // ========================================================================

    /// Feeds pointer input to the orbit controls. Ignored before `Ready`.
    pub fn orbit_input(&mut self, input: &OrbitInput) {
        if let Some(session) = self.session.as_mut() {
            session.orbit.apply_input(input);
        }
    }

    /// Advances damped orbit motion and moves the host camera.
    pub fn tick(&mut self, dt: f32) -> Option<glam::Vec3> {
        let session = self.session.as_mut()?;
        let position = session.orbit.update(dt);
        let target = session.orbit.center;

        self.host.begin_update(session.scene);
        self.host.set_camera(session.scene, position, target);
        self.host.commit_update(session.scene);
        Some(position)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::Uninitialized,
            Some(_) if self.applied_generation != self.issued_generation => Phase::Recomputing,
            Some(_) => Phase::Ready,
        }
    }

    /// Applied view parameters, or the pre-load defaults before `Ready`.
    #[must_use]
    pub fn view_parameters(&self) -> &ViewParameters {
        self.session.as_ref().map_or(&self.preload, |s| &s.params)
    }

    #[must_use]
    pub fn textures(&self) -> Option<&TextureSet> {
        self.session.as_ref().map(|s| &s.applied.textures)
    }

    #[must_use]
    pub fn default_textures(&self) -> Option<&TextureSet> {
        self.session.as_ref().map(|s| &s.defaults)
    }

    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        self.session.as_ref().map(|s| &s.model)
    }

    #[must_use]
    pub fn orbit(&self) -> Option<&OrbitControls> {
        self.session.as_ref().map(|s| &s.orbit)
    }

    #[must_use]
    pub fn inputs(&self) -> &ConfiguratorInputs {
        &self.inputs
    }

    #[must_use]
    pub fn settings(&self) -> &ConfiguratorSettings {
        &self.settings
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ResourceCache<P>> {
        &self.cache
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn derive(&self) -> ViewParameters {
        derive_view_parameters(self.inputs.device, self.inputs.zoom, self.inputs.rotation)
    }

    fn recompute_view(&mut self) {
        if self.session.is_none() {
            log::debug!("View input changed before ready, deferred");
            return;
        }
        let params = self.derive();

        if let Some(session) = self.session.as_mut() {
            session.params = params;
            session.orbit.sync_from(params.camera_position, params.orbit_target);
        }
        self.push_view();
    }

    fn rebind_material(&mut self) -> BindOutcome {
        let paintable = self.settings.paintable_node.as_str();
        match self.session.as_mut() {
            Some(session) => apply_material(&mut session.model, &session.applied.textures, paintable),
            None => BindOutcome::Unchanged,
        }
    }

    /// Pushes the complete view state as one batch and bounds the orbit
    /// controls by it.
    fn push_view(&mut self) {
        let device = self.inputs.device;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let params = session.params;
        let scene = session.scene;

        session.orbit.configure(params.orbit_limits, device.dolly_range(), ORBIT_DAMPING);

        log::debug!(
            "Pushing view: device={device:?} camera={} rotation_y={:.3}",
            params.camera_position,
            params.model_rotation_y
        );

        self.host.begin_update(scene);
        self.host.set_background(scene, params.background_color);
        self.host.set_camera(scene, params.camera_position, params.orbit_target);
        self.host.set_orbit_limits(scene, params.orbit_limits);
        self.host.set_orbit_distance(scene, device.dolly_range());
        self.host.set_orbit_damping(scene, ORBIT_DAMPING);
        self.host.set_pan_enabled(scene, false);
        self.host.set_lights(scene, &params.lights());
        self.host.attach_model(
            scene,
            &session.model,
            params.primitive_position,
            params.model_rotation_y,
        );
        self.host.commit_update(scene);
    }
}
