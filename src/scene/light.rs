use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Light arriving from `position` towards the origin.
    Directional { position: Vec3 },
    /// Uniform light with no direction.
    Ambient,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
    pub cast_shadows: bool,
}

impl Light {
    #[must_use]
    pub const fn new_directional(position: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional { position },
            color: Vec3::ONE,
            intensity,
            cast_shadows: false,
        }
    }

    #[must_use]
    pub const fn new_ambient(color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
            cast_shadows: false,
        }
    }

    #[must_use]
    pub const fn with_shadows(mut self) -> Self {
        self.cast_shadows = true;
        self
    }

    /// Position of a directional light, `None` for ambient lights.
    #[must_use]
    pub fn position(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Directional { position } => Some(position),
            LightKind::Ambient => None,
        }
    }
}
