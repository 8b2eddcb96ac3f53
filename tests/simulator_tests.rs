use approx::assert_abs_diff_eq;
use sandbox2d::{
    flip_y, BodyKind, BoxSpec, CircleSpec, Color, ControlSpec, DrawCommand, EdgeSpec, EntitySpec,
    Material, RecordingCanvas, Scene, SimError, Simulator, SimulatorConfig, Vec2,
};

fn simulator() -> Simulator<RecordingCanvas> {
    Simulator::new(SimulatorConfig::default(), RecordingCanvas::new()).expect("valid config")
}

fn frame(sim: &mut Simulator<RecordingCanvas>) {
    sim.draw();
    sim.update();
    sim.render();
}

#[test]
fn first_dynamic_draw_matches_construction_position() {
    let mut sim = simulator();
    let index = sim
        .spawn(&CircleSpec::new(Vec2::new(1.0, 2.0), 0.2, BodyKind::Dynamic, Color::BLUE).into())
        .unwrap();
    let built = sim.entities()[index].as_circle().unwrap().screen_center();
    assert_abs_diff_eq!(built.x, 592.0, epsilon = 1e-3);
    assert_abs_diff_eq!(built.y, 96.0, epsilon = 1e-3);

    frame(&mut sim);
    let (first, _) = sim.canvas().circles().next().unwrap();
    assert_eq!(first, built);

    // The body falls, so it has to move down the screen rather than mirror upward.
    frame(&mut sim);
    let (second, _) = sim.canvas().circles().next().unwrap();
    assert!(second.y > first.y, "{second} should be below {first}");
    assert_abs_diff_eq!(second.x, first.x, epsilon = 1e-3);
}

#[test]
fn dynamic_circle_falls_down_the_screen() {
    let mut sim = simulator();
    sim.spawn(&CircleSpec::new(Vec2::ZERO, 0.1, BodyKind::Dynamic, Color::BLUE).into())
        .unwrap();

    let mut last_y = f32::NEG_INFINITY;
    for _ in 0..30 {
        frame(&mut sim);
        let (center, radius) = sim.canvas().circles().next().unwrap();
        assert_eq!(radius, sim.viewport().meters_to_pixels(0.1));
        assert!(center.y > last_y);
        last_y = center.y;
    }
}

#[test]
fn static_entities_do_not_move() {
    let mut sim = simulator();
    let mut scene = Scene::new();
    scene
        .push(CircleSpec::new(Vec2::new(-2.0, 1.0), 0.3, BodyKind::Static, Color::WHITE))
        .push(EdgeSpec::new(
            Vec2::new(-5.0, -1.0),
            Vec2::new(5.0, -1.5),
            BodyKind::Static,
            Color::BLACK,
        ))
        .push(BoxSpec::new(
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 0.5),
            0.3,
            BodyKind::Static,
            Color::ORANGE,
        ))
        .push(CircleSpec::new(Vec2::new(-2.0, 3.0), 0.2, BodyKind::Dynamic, Color::BLUE));
    sim.populate(&scene).unwrap();

    let circle = sim.entities()[0].as_circle().unwrap().screen_center();
    let edge = sim.entities()[1].as_edge().unwrap().screen_endpoints();
    let rect = sim.entities()[2].as_box().unwrap().screen_rect();

    for _ in 0..120 {
        frame(&mut sim);
    }

    let frame = sim.canvas().last_frame();
    assert_eq!(
        frame[1],
        DrawCommand::FillCircle {
            center: circle,
            radius: sim.viewport().meters_to_pixels(0.3),
            color: Color::WHITE
        }
    );
    assert_eq!(
        frame[2],
        DrawCommand::Line {
            from: edge[0],
            to: edge[1],
            color: Color::BLACK
        }
    );
    let DrawCommand::Texture { dest, .. } = &frame[3] else {
        panic!("expected box texture, got {:?}", frame[3]);
    };
    assert_eq!(*dest, rect);

    // The dynamic circle came to rest above the ledge instead of falling through.
    let (ball, _) = sim.canvas().circles().nth(1).unwrap();
    assert!(ball.y < edge[0].y.min(edge[1].y));
}

#[test]
fn draw_order_follows_insertion_order() {
    let mut sim = simulator();
    let mut scene = Scene::boundary(sim.viewport(), 0.15);
    scene.push(CircleSpec::new(Vec2::ZERO, 0.1, BodyKind::Dynamic, Color::BLUE));
    scene.push(BoxSpec::new(
        Vec2::new(1.0, 0.0),
        Vec2::ONE,
        0.0,
        BodyKind::Dynamic,
        Color::ORANGE,
    ));
    sim.populate(&scene).unwrap();

    frame(&mut sim);
    let frame = sim.canvas().last_frame();
    assert_eq!(frame.len(), 6);
    assert_eq!(frame[0], DrawCommand::Clear(sim.config().background));
    assert!(frame[1..4]
        .iter()
        .all(|cmd| matches!(cmd, DrawCommand::Line { .. })));
    assert!(matches!(frame[4], DrawCommand::FillCircle { .. }));
    assert!(matches!(frame[5], DrawCommand::Texture { .. }));
    assert_eq!(sim.profile().frames, 1);
}

#[test]
fn box_angle_is_drawn_in_degrees() {
    let mut sim = simulator();
    let index = sim
        .spawn(
            &BoxSpec::new(
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 0.5),
                std::f32::consts::FRAC_PI_6,
                BodyKind::Static,
                Color::ORANGE,
            )
            .into(),
        )
        .unwrap();
    let texture = sim.entities()[index].as_box().unwrap().texture().unwrap();
    assert_eq!(
        sim.canvas().texture_size(texture),
        Some(sandbox2d::UVec2::new(80, 40))
    );

    frame(&mut sim);
    let DrawCommand::Texture {
        dest,
        angle_degrees,
        ..
    } = &sim.canvas().last_frame()[1]
    else {
        panic!("expected a texture draw");
    };
    assert_abs_diff_eq!(*angle_degrees, -30.0, epsilon = 1e-4);
    assert_abs_diff_eq!(dest.center().x, 592.0, epsilon = 1e-3);
    assert_abs_diff_eq!(dest.center().y, 176.0, epsilon = 1e-3);
    assert_eq!(dest.size, Vec2::new(80.0, 40.0));
}

#[test]
fn dynamic_box_carries_initial_velocity() {
    let config = SimulatorConfig::default().with_gravity(Vec2::ZERO);
    let mut sim = Simulator::new(config, RecordingCanvas::new()).unwrap();
    let index = sim
        .spawn(
            &BoxSpec::new(Vec2::ZERO, Vec2::splat(0.5), 0.0, BodyKind::Dynamic, Color::BLUE)
                .with_velocity(Vec2::new(1.0, 1.0))
                .into(),
        )
        .unwrap();
    let body = sim.entities()[index].as_box().unwrap().body();
    let velocity = sim.world().linear_velocity(body).unwrap();
    assert_eq!(velocity, flip_y(Vec2::new(1.0, 1.0)));

    let start = sim.entities()[index].as_box().unwrap().screen_rect().center();
    for _ in 0..10 {
        frame(&mut sim);
    }
    let moved = sim.entities()[index].as_box().unwrap().screen_rect().center();
    assert!(moved.x > start.x);
    assert!(moved.y < start.y, "authored +y velocity moves up the screen");
}

#[test]
fn clear_releases_textures_last_first() {
    let mut sim = simulator();
    for i in 0..3 {
        sim.spawn(
            &BoxSpec::new(
                Vec2::new(i as f32, 0.0),
                Vec2::splat(0.5),
                0.0,
                BodyKind::Static,
                Color::ORANGE,
            )
            .into(),
        )
        .unwrap();
    }
    let created: Vec<_> = sim
        .entities()
        .iter()
        .filter_map(|e| e.as_box().and_then(|b| b.texture()))
        .collect();
    assert_eq!(sim.canvas().live_textures(), 3);

    sim.clear();
    assert!(sim.entities().is_empty());
    assert_eq!(sim.canvas().live_textures(), 0);
    assert_eq!(sim.world().body_count(), 0);
    let released: Vec<_> = sim.canvas().released().to_vec();
    assert_eq!(released, created.into_iter().rev().collect::<Vec<_>>());

    // A second clear has nothing left to give back.
    sim.clear();
    assert_eq!(sim.canvas().released().len(), 3);
}

#[test]
fn invalid_geometry_is_rejected() {
    let mut sim = simulator();
    let poisoned = Material::new(-1.0, f32::NAN, -5.0);
    let ball = CircleSpec::new(Vec2::new(0.0, 2.0), 0.15, BodyKind::Dynamic, Color::BLUE);
    let flat_ramp = EdgeSpec::new(Vec2::ONE, Vec2::ONE, BodyKind::Static, Color::ORANGE);
    let ramp = EdgeSpec::new(
        Vec2::new(-5.0, 2.0),
        Vec2::new(-2.0, 0.0),
        BodyKind::Static,
        Color::ORANGE,
    );
    let bad: [EntitySpec; 8] = [
        CircleSpec::new(Vec2::ZERO, 0.0, BodyKind::Dynamic, Color::BLUE).into(),
        CircleSpec::new(Vec2::new(f32::NAN, 0.0), 1.0, BodyKind::Static, Color::BLUE).into(),
        EdgeSpec::new(Vec2::ONE, Vec2::ONE, BodyKind::Static, Color::BLACK).into(),
        BoxSpec::new(Vec2::ZERO, Vec2::new(1.0, -1.0), 0.0, BodyKind::Static, Color::BLUE)
            .into(),
        CircleSpec::new(Vec2::ZERO, 0.2, BodyKind::Dynamic, Color::BLUE)
            .with_material(poisoned)
            .into(),
        BoxSpec::new(Vec2::ZERO, Vec2::ONE, 0.0, BodyKind::Dynamic, Color::BLUE)
            .with_material(poisoned)
            .into(),
        ControlSpec::new(ball, flat_ramp).into(),
        ControlSpec::new(ball.with_material(poisoned), ramp).into(),
    ];
    for spec in &bad {
        assert!(
            matches!(sim.spawn(spec), Err(SimError::InvalidGeometry { .. })),
            "{spec:?} should be rejected"
        );
        assert_eq!(sim.world().body_count(), 0, "{spec:?} left a body behind");
        assert_eq!(sim.world().collider_count(), 0);
    }
    assert!(sim.entities().is_empty());
    assert_eq!(sim.canvas().live_textures(), 0);
}

#[test]
fn clear_removes_bodies_from_the_world() {
    let mut sim = simulator();
    let scene = Scene::ramp(sim.viewport());
    sim.populate(&scene).unwrap();
    assert_eq!(sim.world().body_count(), 5);

    sim.clear();
    assert!(sim.entities().is_empty());
    assert_eq!(sim.world().body_count(), 0);
    assert_eq!(sim.world().collider_count(), 0);
    sim.update();

    sim.populate(&scene).unwrap();
    assert_eq!(sim.entities().len(), 4);
    assert_eq!(sim.world().body_count(), 5);
}

#[test]
fn invalid_config_is_rejected() {
    let config = SimulatorConfig::default().with_time_step(0.0);
    assert!(matches!(
        Simulator::new(config, RecordingCanvas::new()),
        Err(SimError::InvalidConfig(_))
    ));
}
