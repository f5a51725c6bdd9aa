use glam::Vec3;

use crate::core::record::ParticleRecord;

/// Reflects a particle that left the box `[origin, edge]` back inside.
///
/// The overshoot is mirrored across the wall and the velocity component
/// normal to that wall is reversed and scaled by `restitution`. Returns
/// whether any wall was hit.
pub fn reflect_into_box(
    record: &mut ParticleRecord,
    origin: Vec3,
    edge: Vec3,
    restitution: f32,
) -> bool {
    let mut position = record.position();
    let mut velocity = record.velocity();
    let mut hit = false;

    for axis in 0..3 {
        if position[axis] < origin[axis] {
            position[axis] = origin[axis] - (position[axis] - origin[axis]);
            velocity[axis] *= -restitution;
            hit = true;
        }
        if position[axis] > edge[axis] {
            position[axis] = edge[axis] - (position[axis] - edge[axis]);
            velocity[axis] *= -restitution;
            hit = true;
        }
    }

    if hit {
        record.set_position(position);
        record.set_velocity(velocity);
    }
    hit
}
