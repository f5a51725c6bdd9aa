use approx::assert_relative_eq;
use particle_bridge::*;

fn spawn(extents: Extents) -> (Scene, BoundaryProxy) {
    let mut scene = Scene::new();
    let boundary = BoundaryProxy::spawn(&mut scene, extents).expect("spawn boundary");
    (scene, boundary)
}

#[test]
fn spawned_box_covers_the_corner_anchored_volume() {
    let (scene, boundary) = spawn(Extents::new(100.0, 50.0, 20.0));
    assert_eq!(boundary.world_min(), Vec3::ZERO);
    assert_eq!(boundary.world_max(), Vec3::new(100.0, 50.0, 20.0));
    assert_eq!(
        scene.transform(boundary.node()).expect("node"),
        boundary.transform()
    );
}

#[test]
fn scenario_b_width_100_to_150() {
    let (mut scene, mut boundary) = spawn(Extents::splat(100.0));
    let before = boundary.transform();

    boundary
        .apply_extent_change(&mut scene, Axis::Width, 100.0, 150.0)
        .expect("resize");

    let after = boundary.transform();
    assert_eq!(after.scale, Vec3::new(1.5, 1.0, 1.0));
    assert_eq!(after.position.x - before.position.x, 25.0);
    assert_eq!(after.position.y, before.position.y);
    assert_eq!(after.position.z, before.position.z);
    assert_eq!(scene.transform(boundary.node()).expect("node"), after);
}

#[test]
fn resize_keeps_the_near_face_fixed() {
    let (mut scene, mut boundary) = spawn(Extents::new(200.0, 80.0, 120.0));
    let cases = [
        (Axis::Height, 80.0, 37.5),
        (Axis::Depth, 120.0, 400.0),
        (Axis::Width, 200.0, 10.0),
        (Axis::Height, 37.5, 999.0),
    ];

    for (axis, old, new) in cases {
        let c = axis.component();
        let min_before = boundary.world_min();
        boundary
            .apply_extent_change(&mut scene, axis, old, new)
            .expect("resize");

        assert_relative_eq!(boundary.world_size()[c], new, max_relative = 1e-5);
        assert_relative_eq!(boundary.world_min()[c], min_before[c], epsilon = 1e-3);
    }
    assert_relative_eq!(boundary.world_max().x, 10.0, max_relative = 1e-5);
    assert_relative_eq!(boundary.world_max().y, 999.0, max_relative = 1e-5);
    assert_relative_eq!(boundary.world_max().z, 400.0, max_relative = 1e-5);
}

#[test]
fn unchanged_extent_leaves_transform_untouched() {
    let (mut scene, mut boundary) = spawn(Extents::new(30.0, 40.0, 50.0));
    boundary
        .apply_extent_change(&mut scene, Axis::Depth, 50.0, 75.0)
        .expect("resize");
    let before = boundary.transform();

    for axis in Axis::ALL {
        let current = boundary.world_size()[axis.component()];
        boundary
            .apply_extent_change(&mut scene, axis, current, current)
            .expect("no-op resize");
    }
    assert_eq!(boundary.transform(), before);
}

#[test]
fn zero_and_negative_extents_are_rejected_without_side_effects() {
    let (mut scene, mut boundary) = spawn(Extents::splat(100.0));
    let before = boundary.transform();

    for (old, new) in [(100.0, 0.0), (0.0, 100.0), (100.0, -5.0), (100.0, f32::NAN)] {
        let err = boundary
            .apply_extent_change(&mut scene, Axis::Height, old, new)
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidExtent { axis: Axis::Height, .. }));
        assert!(!err.is_fatal());
    }

    assert_eq!(boundary.transform(), before);
    assert_eq!(scene.transform(boundary.node()).expect("node"), before);
}

#[test]
fn resync_agrees_with_incremental_edits() {
    let (mut scene, mut boundary) = spawn(Extents::splat(100.0));
    boundary
        .apply_extent_change(&mut scene, Axis::Width, 100.0, 150.0)
        .expect("resize");
    boundary
        .apply_extent_change(&mut scene, Axis::Height, 100.0, 40.0)
        .expect("resize");
    let incremental = boundary.transform();

    let target = Extents::new(150.0, 40.0, 100.0);
    let absolute = box_transform(target, boundary.base()).expect("box transform");
    assert_relative_eq!(incremental.scale.x, absolute.scale.x);
    assert_relative_eq!(incremental.scale.y, absolute.scale.y);
    assert_relative_eq!(incremental.position.x, absolute.position.x);
    assert_relative_eq!(incremental.position.y, absolute.position.y);

    boundary.resync(&mut scene, target).expect("resync");
    assert_eq!(boundary.transform(), absolute);
}

#[test]
fn stale_box_is_placed_absolutely() {
    let (mut scene, mut boundary) = spawn(Extents::splat(100.0));

    // simulation already moved width to 120 without the box following
    boundary
        .apply_extent_change(&mut scene, Axis::Width, 120.0, 180.0)
        .expect("resize");

    assert!(boundary.world_min().abs_diff_eq(Vec3::ZERO, 1e-4));
    assert!(boundary
        .world_max()
        .abs_diff_eq(Vec3::new(180.0, 100.0, 100.0), 1e-4));
    assert_eq!(scene.transform(boundary.node()).expect("node"), boundary.transform());
}

#[test]
fn planning_does_not_touch_the_scene() {
    let (scene, boundary) = spawn(Extents::splat(100.0));
    let planned = boundary
        .plan_extent_change(Axis::Depth, 100.0, 50.0)
        .expect("plan");

    assert_eq!(planned.scale, Vec3::new(1.0, 1.0, 0.5));
    assert_eq!(boundary.transform().scale, Vec3::ONE);
    assert_eq!(scene.transform(boundary.node()).expect("node").scale, Vec3::ONE);
}
