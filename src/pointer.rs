// Pointer repulsion. Anything within `radius` of the pointer gets pushed
// straight away from it by a fixed amount, however close it is.

extern crate nalgebra_glm as glm;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerForce {
    pub radius: f64,
    pub strength: f64,
}

impl PointerForce {
    pub fn new(radius: f64, strength: f64) -> Self {
        PointerForce { radius, strength }
    }

    /// Velocity change for a particle at `pos` with the pointer at `pointer`.
    ///
    /// `None` when the particle is out of reach, or sits exactly under the
    /// pointer where there is no direction to push it in.
    pub fn impulse(&self, pos: [f64; 2], pointer: [f64; 2]) -> Option<[f64; 2]> {
        let delta = glm::vec2(pos[0] - pointer[0], pos[1] - pointer[1]);
        let distance = glm::length(&delta);
        if distance <= 0.0 || distance >= self.radius {
            return None;
        }
        let push = delta / distance * self.strength;
        Some([push.x, push.y])
    }
}
