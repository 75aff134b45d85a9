use std::path::PathBuf;

use glam::Vec3;

pub struct MeshAsset {
    pub name: &'static str,
    pub obj: PathBuf,
    pub texture: PathBuf,
}

impl MeshAsset {
    fn new(name: &'static str, obj: &str, texture: &str) -> Self {
        Self {
            name,
            obj: PathBuf::from(obj),
            texture: PathBuf::from(texture),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotlightConfig {
    pub position: Vec3,
    pub direction: Vec3,
    pub cutoff_degrees: f32,
    pub diffuse_color: Vec3,
    pub ambient_color: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightOrbit {
    pub radius: f32,
    pub height: f32,
    pub step: f32,
}

pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

pub struct SceneConfig {
    pub window_title: String,
    pub window_size: (u32, u32),
    pub clear_color: [f64; 3],

    pub meshes: Vec<MeshAsset>,

    pub camera: CameraConfig,
    pub spotlights: [SpotlightConfig; 3],
    pub attenuation: Attenuation,
    pub orbit: LightOrbit,

    pub capture_prefix: String,
    pub capture_dir: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let spotlight = |direction: Vec3, diffuse_color: Vec3| SpotlightConfig {
            position: Vec3::new(0.0, 200.0, 0.0),
            direction,
            cutoff_degrees: 30.0,
            diffuse_color,
            ambient_color: Vec3::splat(0.2),
        };

        Self {
            window_title: "Spotlight Scene".to_string(),
            window_size: (1024, 768),
            clear_color: [0.3, 0.4, 0.5],

            meshes: vec![
                MeshAsset::new("floor", "asset/floor.obj", "asset/floor.jpeg"),
                MeshAsset::new("bucket", "asset/bucket.obj", "asset/bucket.jpg"),
                MeshAsset::new("timmy", "asset/timmy.obj", "asset/timmy.png"),
            ],

            camera: CameraConfig {
                eye: Vec3::new(50.0, 100.0, 200.0),
                target: Vec3::new(0.0, 80.0, 0.0),
                fov_degrees: 60.0,
                near: 0.1,
                far: 1000.0,
            },
            spotlights: [
                spotlight(Vec3::new(50.0, -200.0, -50.0), Vec3::X),
                spotlight(Vec3::new(-50.0, -200.0, -50.0), Vec3::Y),
                spotlight(Vec3::new(0.0, -200.0, 50.0), Vec3::Z),
            ],
            attenuation: Attenuation {
                constant: 1.0,
                linear: 0.35e-4,
                quadratic: 0.44e-4,
            },
            orbit: LightOrbit {
                radius: 150.0,
                height: 200.0,
                step: 0.05,
            },

            capture_prefix: "ss".to_string(),
            capture_dir: PathBuf::from("."),
        }
    }
}
