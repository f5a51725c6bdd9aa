use approx::assert_relative_eq;
use particle_bridge::*;

fn world(particle_count: usize, gravity: f32, repulsion: f32) -> ParticleWorld {
    ParticleWorld::new(&WorldConfig {
        particle_count,
        gravity,
        repulsion,
        ..WorldConfig::default()
    })
    .expect("world")
}

fn place(world: &mut ParticleWorld, records: &[(Vec3, Vec3)]) {
    let particles = world.particles_mut().expect("particles");
    for (record, &(position, velocity)) in particles.iter_mut().zip(records) {
        *record = ParticleRecord::new(position, velocity);
    }
}

#[test]
fn spawned_particles_lie_inside_the_box() {
    let world = world(500, 9.81, 1.0);
    let edge = world.extents().to_vec3();
    for record in world.particles().expect("particles") {
        let p = record.position();
        assert!(p.cmpge(Vec3::ZERO).all() && p.cmplt(edge).all(), "{p:?}");
        let v = record.velocity();
        assert!(v.cmpge(Vec3::ZERO).all() && v.cmplt(Vec3::splat(10.0)).all(), "{v:?}");
    }
}

#[test]
fn same_seed_same_particles() {
    let a = world(64, 9.81, 1.0);
    let b = world(64, 9.81, 1.0);
    assert_eq!(a.particles().expect("a"), b.particles().expect("b"));
}

#[test]
fn gravity_pulls_velocity_down() {
    let mut world = world(1, 9.81, 0.0);
    place(&mut world, &[(Vec3::splat(100.0), Vec3::ZERO)]);

    world.tick(0.1).expect("tick");

    let record = world.particles().expect("particles")[0];
    assert_relative_eq!(record.velocity().y, -0.981, epsilon = 1e-6);
    assert_relative_eq!(record.position().y, 100.0 - 0.0981, epsilon = 1e-4);
    assert_eq!(record.position().x, 100.0);
}

#[test]
fn nearby_particles_repel_along_their_offset() {
    let mut world = world(2, 0.0, 1.0);
    place(
        &mut world,
        &[
            (Vec3::new(10.0, 10.0, 10.0), Vec3::ZERO),
            (Vec3::new(12.0, 10.0, 10.0), Vec3::ZERO),
        ],
    );

    world.tick(0.1).expect("tick");

    let particles = world.particles().expect("particles");
    assert_relative_eq!(particles[0].velocity().x, -0.25, epsilon = 1e-6);
    assert_relative_eq!(particles[1].velocity().x, 0.25, epsilon = 1e-6);
    assert_eq!(particles[0].velocity().z, 0.0);
}

#[test]
fn repulsion_ignores_distant_and_coincident_particles() {
    let mut world = world(3, 0.0, 5.0);
    place(
        &mut world,
        &[
            (Vec3::splat(20.0), Vec3::ZERO),
            (Vec3::splat(20.0), Vec3::ZERO),
            (Vec3::new(180.0, 20.0, 20.0), Vec3::ZERO),
        ],
    );

    world.tick(0.1).expect("tick");

    for record in world.particles().expect("particles") {
        assert_eq!(record.velocity(), Vec3::ZERO);
    }
}

#[test]
fn collisions_reflect_back_into_the_box() {
    let mut world = world(1, 0.0, 0.0);
    place(&mut world, &[(Vec3::new(150.0, 50.0, 50.0), Vec3::new(4.0, 0.0, 0.0))]);

    world.set_extent(Axis::Width, 100.0);
    world.resolve_collisions().expect("collisions");

    let record = world.particles().expect("particles")[0];
    assert_eq!(record.position().x, 50.0);
    assert_relative_eq!(record.velocity().x, -3.2, epsilon = 1e-6);
}

#[test]
fn particles_stay_contained_over_many_frames() {
    let mut world = world(200, 9.81, 0.0);
    for _ in 0..100 {
        world.tick(0.1).expect("tick");
        world.resolve_collisions().expect("collisions");
    }
    let edge = world.extents().to_vec3();
    for record in world.particles().expect("particles") {
        let p = record.position();
        assert!(p.cmpge(Vec3::ZERO).all() && p.cmple(edge).all(), "{p:?}");
    }
}

#[test]
fn extents_and_force_params_round_trip() {
    let mut world = world(1, 9.81, 1.0);
    world.set_extent(Axis::Depth, 42.0);
    world.set_force_param(ForceParam::Gravity, -2.0);
    world.set_force_param(ForceParam::Repulsion, 7.5);

    assert_eq!(world.extent(Axis::Depth), 42.0);
    assert_eq!(world.extent(Axis::Width), 200.0);
    assert_eq!(world.extents(), Extents::new(200.0, 200.0, 42.0));
    assert_eq!(world.force_param(ForceParam::Gravity), -2.0);
    assert_eq!(world.force_param(ForceParam::Repulsion), 7.5);
}

#[test]
fn serial_and_parallel_passes_agree() {
    let mut serial = world(300, 9.81, 1.0);
    let mut parallel = world(300, 9.81, 1.0);
    serial.set_parallel_enabled(false);
    parallel.set_parallel_enabled(true);

    for _ in 0..3 {
        serial.tick(0.1).expect("tick");
        parallel.tick(0.1).expect("tick");
    }
    assert_eq!(serial.particles().expect("serial"), parallel.particles().expect("parallel"));
}

#[test]
fn tick_fails_cleanly_when_memory_is_capped() {
    let mut world = ParticleWorld::new(&WorldConfig {
        particle_count: 2000,
        initial_pages: 1,
        max_pages: 1,
        ..WorldConfig::default()
    })
    .expect("world");
    let before = world.particles().expect("particles").to_vec();

    let err = world.tick(0.1).unwrap_err();

    assert!(matches!(err, BridgeError::MemoryExhausted { .. }));
    assert_eq!(world.particles().expect("particles"), before.as_slice());
}

#[test]
fn world_config_is_validated_on_creation() {
    let zero_width = WorldConfig {
        extents: Extents::new(0.0, 10.0, 10.0),
        ..WorldConfig::default()
    };
    assert!(matches!(
        ParticleWorld::new(&zero_width),
        Err(BridgeError::InvalidExtent { axis: Axis::Width, .. })
    ));

    let no_pages = WorldConfig {
        initial_pages: 0,
        ..WorldConfig::default()
    };
    assert!(matches!(
        ParticleWorld::new(&no_pages),
        Err(BridgeError::InvalidConfig(_))
    ));
}
