mod common;

use common::{init_logger, MockHost};
use particle_bridge::*;

fn session(count: usize) -> Session<MockHost, HeadlessRenderer> {
    Session::new(MockHost::new(count), HeadlessRenderer::new(), &SessionConfig::default())
        .expect("session")
}

#[test]
fn startup_builds_one_proxy_per_particle_plus_the_boundary() {
    let session = session(12);
    assert_eq!(session.mirror().len(), 12);
    assert_eq!(session.scene().len(), 13);
    assert_eq!(session.boundary().world_max(), Vec3::splat(100.0));
    assert_eq!(session.panel().controls().len(), 5);
    assert_eq!(
        session.panel().control(Tunable::Gravity).map(|c| c.value),
        Some(9.81)
    );
}

#[test]
fn startup_rejects_an_empty_simulation() {
    let result = Session::new(MockHost::new(0), HeadlessRenderer::new(), &SessionConfig::default());
    assert!(matches!(result, Err(BridgeError::InvalidConfig(_))));
}

#[test]
fn panel_edits_are_clamped_queued_and_applied_in_order() {
    init_logger();
    let mut session = session(4);

    let queued = session.panel_mut().edit(Tunable::Width, 5000.0).expect("edit");
    assert_eq!(queued, 1000.0);
    session.panel_mut().edit(Tunable::Width, 250.4).expect("edit");
    session.panel_mut().edit(Tunable::Gravity, 1.234).expect("edit");
    assert_eq!(session.queue().len(), 3);

    let summary = session.pump().expect("pump");
    assert_eq!(summary.edits_applied, 3);
    assert_eq!(summary.edits_rejected, 0);
    assert!(session.queue().is_empty());

    assert_eq!(session.host().extents.width, 250.0);
    assert!((session.host().gravity - 1.23).abs() < 1e-4);
    assert!((session.boundary().world_max().x - 250.0).abs() < 1e-3);
    assert_eq!(session.params().applied(), 3);
}

#[test]
fn rejected_queued_edit_is_counted_and_panel_resynced() {
    let mut session = session(2);
    let queue = session.queue();
    queue.push(Command::Edit {
        tunable: Tunable::Depth,
        value: -10.0,
    });
    queue.push(Command::Edit {
        tunable: Tunable::Height,
        value: 60.0,
    });

    let summary = session.pump().expect("pump");
    assert_eq!(summary.edits_rejected, 1);
    assert_eq!(summary.edits_applied, 1);
    assert_eq!(session.host().extents.depth, 100.0);
    assert_eq!(session.host().extents.height, 60.0);
    assert_eq!(
        session.panel().control(Tunable::Depth).map(|c| c.value),
        Some(100.0)
    );
}

#[test]
fn direct_edit_handlers_reach_the_simulation() {
    let mut session = session(2);
    session.edit_height(20.0).expect("height");
    session.edit_width(30.0).expect("width");
    session.edit_depth(40.0).expect("depth");
    session.edit_gravity(-1.0).expect("gravity");
    session.edit_repulsion(3.0).expect("repulsion");

    let host = session.host();
    assert_eq!(host.extents, Extents::new(30.0, 20.0, 40.0));
    assert_eq!(host.gravity, -1.0);
    assert_eq!(host.repulsion, 3.0);
    assert!(session
        .boundary()
        .world_max()
        .abs_diff_eq(Vec3::new(30.0, 20.0, 40.0), 1e-3));
    assert!(matches!(
        session.edit_height(0.0),
        Err(BridgeError::InvalidExtent { .. })
    ));
}

#[test]
fn run_interleaves_edits_between_frames() {
    let mut session = session(3);
    session.queue().push(Command::Frame);
    session.panel_mut().edit(Tunable::Repulsion, 2.0).expect("edit");

    let frames = session.run(&mut FrameBudget::new(4)).expect("run");

    assert_eq!(frames, 5);
    assert_eq!(session.driver().frame_count(), 5);
    assert_eq!(session.renderer().stats().frames, 5);
    assert_eq!(session.host().repulsion, 2.0);
}

#[test]
fn fatal_errors_stop_the_loop() {
    let mut host = MockHost::new(3);
    host.memory = SharedMemory::new(1, 1);
    host.offset = 0;
    host.grow_on_tick = true;
    let mut session =
        Session::new(host, HeadlessRenderer::new(), &SessionConfig::default()).expect("session");

    let err = session.run(&mut FrameBudget::new(3)).unwrap_err();
    assert!(matches!(err, BridgeError::MemoryExhausted { .. }));
    assert!(err.is_fatal());
    assert_eq!(session.driver().frame_count(), 0);
}

#[test]
fn orbit_controls_settle_over_frames() {
    let mut session = session(1);
    let start = *session.camera();
    session.controls_mut().rotate(0.5, 0.0);

    session.run(&mut FrameBudget::new(200)).expect("run");

    assert!(session.controls_mut().is_settled());
    assert_ne!(session.camera().position, start.position);
}

#[test]
fn session_config_from_json() {
    let config = SessionConfig::from_json(
        r#"{
            "world": { "particle_count": 8, "extents": { "width": 50.0, "height": 60.0, "depth": 70.0 } },
            "clock": { "policy": "fixed", "dt": 0.02 }
        }"#,
    )
    .expect("config");
    assert_eq!(config.world.particle_count, 8);
    assert_eq!(config.clock, ClockPolicy::Fixed { dt: 0.02 });

    let world = ParticleWorld::new(&config.world).expect("world");
    let mut session = Session::new(world, HeadlessRenderer::new(), &config).expect("session");
    let report = session.frame().expect("frame");
    assert_eq!(report.dt, 0.02);
    assert_eq!(session.boundary().world_max(), Vec3::new(50.0, 60.0, 70.0));
}

#[test]
fn throttled_run_paces_frames_and_caps_dt() {
    let config = SessionConfig {
        clock: ClockPolicy::Throttled {
            target_fps: 200.0,
            max_dt: 0.1,
        },
        ..SessionConfig::default()
    };
    let mut session =
        Session::new(MockHost::new(2), HeadlessRenderer::new(), &config).expect("session");
    let mut throttle = Throttle::new(200.0).with_limit(3);
    let interval = throttle.interval();
    let started = std::time::Instant::now();

    let frames = session.run(&mut throttle).expect("run");

    assert_eq!(frames, 3);
    assert!(started.elapsed() >= interval * 2);
    assert_eq!(session.driver().frame_count(), 3);
    assert_eq!(session.renderer().stats().frames, 3);
    assert!(!throttle.wait_for_frame());

    let report = session.frame().expect("frame");
    assert!(report.dt > 0.0 && report.dt <= 0.1, "{}", report.dt);
}

#[test]
fn custom_host_ignores_the_world_section() {
    let config = SessionConfig {
        world: WorldConfig {
            particle_count: 0,
            initial_pages: 0,
            ..WorldConfig::default()
        },
        ..SessionConfig::default()
    };
    assert!(config.validate().is_err());

    let session = Session::new(MockHost::new(3), HeadlessRenderer::new(), &config)
        .expect("world section is not the host's config");
    assert_eq!(session.mirror().len(), 3);
}

#[test]
fn invalid_session_section_still_rejects_startup() {
    let config = SessionConfig {
        proxy_radius: 0.0,
        ..SessionConfig::default()
    };
    let result = Session::new(MockHost::new(3), HeadlessRenderer::new(), &config);
    assert!(matches!(result, Err(BridgeError::InvalidConfig(_))));
}
