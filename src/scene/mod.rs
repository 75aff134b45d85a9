pub mod config;

use thiserror::Error;

use crate::mesh::{FlatMesh, FlattenError, MeshLoadError, flatten, load_indexed_mesh};
use crate::renderer::texture::{TextureData, TextureLoadError};

pub use config::{Attenuation, CameraConfig, LightOrbit, MeshAsset, SceneConfig, SpotlightConfig};

#[derive(Error, Debug)]
pub enum SceneLoadError {
    #[error(transparent)]
    Mesh(#[from] MeshLoadError),
    #[error("mesh '{name}': {source}")]
    Flatten {
        name: &'static str,
        source: FlattenError,
    },
    #[error(transparent)]
    Texture(#[from] TextureLoadError),
}

pub struct LoadedMesh {
    pub name: &'static str,
    pub flat: FlatMesh,
    pub texture: TextureData,
}

pub struct SceneAssets {
    pub meshes: Vec<LoadedMesh>,
}

impl SceneAssets {
    pub fn load(config: &SceneConfig) -> Result<Self, SceneLoadError> {
        let meshes = config
            .meshes
            .iter()
            .map(load_mesh)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { meshes })
    }
}

fn load_mesh(asset: &MeshAsset) -> Result<LoadedMesh, SceneLoadError> {
    let indexed = load_indexed_mesh(&asset.obj)?;
    let flat = flatten(&indexed).map_err(|source| SceneLoadError::Flatten {
        name: asset.name,
        source,
    })?;
    log::info!(
        "loaded mesh '{}' from {}: {} face-vertices",
        asset.name,
        asset.obj.display(),
        flat.vertex_count()
    );

    let texture = TextureData::from_file(&asset.texture)?;

    Ok(LoadedMesh {
        name: asset.name,
        flat,
        texture,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    const TRIANGLE: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    fn write_assets(dir: &Path) -> SceneConfig {
        std::fs::write(dir.join("tri.obj"), TRIANGLE).unwrap();
        image::RgbImage::from_pixel(4, 4, image::Rgb([200, 100, 50]))
            .save(dir.join("tri.png"))
            .unwrap();

        SceneConfig {
            meshes: vec![
                MeshAsset {
                    name: "first",
                    obj: dir.join("tri.obj"),
                    texture: dir.join("tri.png"),
                },
                MeshAsset {
                    name: "second",
                    obj: dir.join("tri.obj"),
                    texture: dir.join("tri.png"),
                },
            ],
            ..SceneConfig::default()
        }
    }

    #[test]
    fn every_configured_mesh_is_loaded_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_assets(dir.path());

        let assets = match SceneAssets::load(&config) {
            Ok(assets) => assets,
            Err(e) => panic!("load failed: {e}"),
        };

        let names: Vec<_> = assets.meshes.iter().map(|m| m.name).collect();
        assert_eq!(names, ["first", "second"]);
        assert!(assets.meshes.iter().all(|m| m.flat.vertex_count() == 3));
        assert_eq!(assets.meshes[0].texture.width, 4);
    }

    #[test]
    fn missing_obj_aborts_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_assets(dir.path());
        config.meshes[1].obj = dir.path().join("nope.obj");

        assert!(matches!(
            SceneAssets::load(&config),
            Err(SceneLoadError::Mesh(MeshLoadError::Io { .. }))
        ));
    }

    #[test]
    fn undecodable_texture_aborts_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_assets(dir.path());
        std::fs::write(dir.path().join("bad.png"), b"garbage").unwrap();
        config.meshes[0].texture = dir.path().join("bad.png");

        assert!(matches!(
            SceneAssets::load(&config),
            Err(SceneLoadError::Texture(_))
        ));
    }
}
