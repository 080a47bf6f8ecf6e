//! Model Decoders

#[cfg(feature = "gltf")]
pub mod gltf;

use crate::scene::model::ModelAsset;

/// Decodes model bytes (glTF JSON or GLB) into a [`ModelAsset`].
pub fn decode_model(label: &str, bytes: &[u8]) -> anyhow::Result<ModelAsset> {
    #[cfg(feature = "gltf")]
    {
        self::gltf::decode(label, bytes)
    }
    #[cfg(not(feature = "gltf"))]
    {
        let _ = bytes;
        Err(anyhow::anyhow!(
            "Cannot decode {label}: glTF feature is not enabled. Enable it with `features = [\"gltf\"]`"
        ))
    }
}
