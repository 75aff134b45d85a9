use glam::{Mat4, Vec3};

use crate::scene::CameraConfig;

pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: config.eye,
            target: config.target,
            fov: config.fov_degrees.to_radians(),
            aspect: 4.0 / 3.0,
            near: config.near,
            far: config.far,
        };
        camera.set_aspect(width as f32, height as f32);
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}
