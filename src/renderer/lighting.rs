use glam::{Mat4, Vec3};

use crate::renderer::camera::Camera;
use crate::scene::{Attenuation, LightOrbit, SpotlightConfig};

pub const SPOTLIGHT_COUNT: usize = 3;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotlightUniform {
    pub position: [f32; 3],
    pub cutoff: f32,
    pub direction: [f32; 3],
    pub _pad0: f32,
    pub diffuse_color: [f32; 3],
    pub _pad1: f32,
    pub ambient_color: [f32; 3],
    pub _pad2: f32,
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    // kc, kl, kq, unused
    pub attenuation: [f32; 4],
    pub spotlights: [SpotlightUniform; SPOTLIGHT_COUNT],
}

impl SceneUniform {
    pub fn new(camera: &Camera, rig: &SpotlightRig, attenuation: Attenuation) -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            attenuation: [
                attenuation.constant,
                attenuation.linear,
                attenuation.quadratic,
                0.0,
            ],
            spotlights: rig.uniforms(),
        }
    }
}

/// Spotlights sweeping a circle above the scene, one step per frame.
pub struct SpotlightRig {
    lights: [SpotlightConfig; SPOTLIGHT_COUNT],
    orbit: LightOrbit,
    theta: f32,
}

impl SpotlightRig {
    pub fn new(lights: [SpotlightConfig; SPOTLIGHT_COUNT], orbit: LightOrbit) -> Self {
        Self {
            lights,
            orbit,
            theta: 0.0,
        }
    }

    pub fn advance(&mut self) {
        self.theta += self.orbit.step;
        let position = Vec3::new(
            self.theta.sin() * self.orbit.radius,
            self.orbit.height,
            self.theta.cos() * self.orbit.radius,
        );
        for light in &mut self.lights {
            light.position = position;
        }
    }

    pub fn uniforms(&self) -> [SpotlightUniform; SPOTLIGHT_COUNT] {
        self.lights.map(|light| SpotlightUniform {
            position: light.position.to_array(),
            cutoff: light.cutoff_degrees.to_radians().cos(),
            direction: light.direction.to_array(),
            _pad0: 0.0,
            diffuse_color: light.diffuse_color.to_array(),
            _pad1: 0.0,
            ambient_color: light.ambient_color.to_array(),
            _pad2: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneConfig;

    fn rig() -> SpotlightRig {
        let config = SceneConfig::default();
        SpotlightRig::new(config.spotlights, config.orbit)
    }

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<SpotlightUniform>(), 64);
        assert_eq!(std::mem::size_of::<SceneUniform>(), 3 * 64 + 16 + 3 * 64);
    }

    #[test]
    fn lights_start_overhead() {
        let lights = rig().uniforms();

        assert!(lights.iter().all(|l| l.position == [0.0, 200.0, 0.0]));
        assert_eq!(lights[0].diffuse_color, [1.0, 0.0, 0.0]);
        assert_eq!(lights[1].diffuse_color, [0.0, 1.0, 0.0]);
        assert_eq!(lights[2].diffuse_color, [0.0, 0.0, 1.0]);
        assert!((lights[0].cutoff - (std::f32::consts::PI / 6.0).cos()).abs() < 1e-6);
    }

    #[test]
    fn advance_moves_every_light_along_the_orbit() {
        let mut rig = rig();
        rig.advance();
        rig.advance();

        let expected = [0.1_f32.sin() * 150.0, 200.0, 0.1_f32.cos() * 150.0];
        for light in rig.uniforms() {
            for (got, want) in light.position.iter().zip(expected) {
                assert!((got - want).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn directions_are_not_animated() {
        let before = rig().uniforms();
        let mut moved = rig();
        moved.advance();

        for (a, b) in before.iter().zip(moved.uniforms()) {
            assert_eq!(a.direction, b.direction);
        }
    }
}
