use particle_bridge::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SessionConfig {
        world: WorldConfig {
            particle_count: 500,
            ..WorldConfig::default()
        },
        ..SessionConfig::default()
    };
    let world = ParticleWorld::new(&config.world)?;
    let mut session = Session::new(world, HeadlessRenderer::new(), &config)?;

    session.run(&mut FrameBudget::new(30))?;

    // slider moves land between frames
    session.panel_mut().edit(Tunable::Width, 320.0)?;
    session.panel_mut().edit(Tunable::Gravity, 3.0)?;
    session.panel_mut().edit(Tunable::Height, 0.0)?;
    session.controls_mut().rotate(0.8, 0.2);

    let frames = session.run(&mut FrameBudget::new(30))?;

    let stats = session.renderer().stats();
    println!("{} frames after edits; {}", frames, stats.format_compact());
    if let Some((min, max)) = stats.proxy_bounds {
        println!("particle bounds: {min:?} .. {max:?}");
    }
    println!(
        "boundary: {:?} .. {:?}",
        session.boundary().world_min(),
        session.boundary().world_max()
    );
    Ok(())
}
