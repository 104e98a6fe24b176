//! Message-driven scenarios across the shared and client crates.

use egol_client::{interp::FrameClock, WorldView};
use egol_shared::{
    config::ClientConfig,
    math::Vec3,
    net::{decode_from_bytes, encode_to_bytes, Message},
    organism::OrganismId,
    state::{EntityCategory, StateKind, StateSpec},
};
use egol_tests::{record, spec_at, to_jsonl, update};
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Messages survive the JSON codec and drive the view the same way.
#[test]
fn encoded_messages_drive_the_view() -> anyhow::Result<()> {
    init_tracing();

    let messages = vec![
        Message::state(vec![record(
            "wolf",
            EntityCategory::Behavioral,
            spec_at(StateKind::Alive, 0.0, 0.0),
        )]),
        Message::update(vec![update("wolf", spec_at(StateKind::Alive, 4.0, 0.0))]),
    ];

    let mut view = WorldView::new(&ClientConfig::default());
    for msg in &messages {
        let wire = encode_to_bytes(msg)?;
        view.handle_message(decode_from_bytes(&wire)?)?;
    }

    let frame = view.frame(0.5)?;
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0].1.position(), Vec3::new(2.0, 0.0, 0.0));
    Ok(())
}

/// Positions rendered across a tick never jump: each frame moves a bounded step.
#[test]
fn frames_move_smoothly_across_ticks() -> anyhow::Result<()> {
    init_tracing();

    let cfg = ClientConfig {
        tick_ms: 100,
        ..Default::default()
    };
    let clock = FrameClock::from_config(&cfg);
    let mut view = WorldView::new(&cfg);
    view.handle_message(Message::state(vec![record(
        "a",
        EntityCategory::Behavioral,
        spec_at(StateKind::Alive, 0.0, 0.0),
    )]))?;

    let mut last_x = 0.0f32;
    for tick in 1..=5 {
        let x = tick as f32 * 10.0;
        view.apply_updates(vec![update("a", spec_at(StateKind::Alive, x, 0.0))])?;
        for ms in (0..100).step_by(20) {
            let t = clock.factor(Duration::from_millis(ms));
            let frame = view.frame(t)?;
            let px = frame[0].1.position().x;
            assert!(px >= last_x, "frame went backwards: {px} < {last_x}");
            assert!(px - last_x <= 2.0 + 1e-4, "frame jumped: {last_x} -> {px}");
            last_x = px;
        }
    }
    Ok(())
}

/// The in-place view and the snapshot history render the same positions when the
/// server sends full states.
///
/// Their kinds can differ: the history's states are built from each record, while a
/// promoted behavioral state keeps its own kind under the selective policy.
#[test]
fn view_and_history_agree() -> anyhow::Result<()> {
    let mut view = WorldView::new(&ClientConfig::default());
    view.load_population(&[
        record("a", EntityCategory::Behavioral, spec_at(StateKind::Alive, 0.0, 0.0)),
        record("b", EntityCategory::Behavioral, spec_at(StateKind::Fleeing, 1.0, 1.0)),
    ])?;
    view.apply_updates(vec![
        update("a", spec_at(StateKind::Alive, 2.0, 2.0)),
        update("b", spec_at(StateKind::Alive, 3.0, 5.0)),
    ])?;
    view.apply_updates(vec![
        update("a", spec_at(StateKind::Alive, 6.0, 2.0)),
        update("b", spec_at(StateKind::Dead, 9.0, 9.0)),
    ])?;

    for t in [0.0, 0.25, 0.5, 1.0] {
        let frame = view.frame(t)?;
        for (id, state) in &frame {
            let from_history = view
                .snaps
                .interp_organism(id, t)
                .expect("organism in history")?;
            assert_eq!(from_history.position(), state.position(), "{id} at t={t}");
        }
    }

    let b = OrganismId::from("b");
    let rendered = view.frame(0.5)?;
    let (_, in_view) = rendered.iter().find(|(id, _)| *id == b).expect("b rendered");
    let in_history = view.snaps.interp_organism(&b, 0.5).expect("b in history")?;
    assert_eq!(in_view.kind(), Some(StateKind::Fleeing));
    assert_eq!(in_history.kind(), Some(StateKind::Alive));
    Ok(())
}

/// Growth organisms are overwritten wholesale, behavioral ones only where a field is present.
#[test]
fn promotion_follows_each_variant_policy() -> anyhow::Result<()> {
    let mut view = WorldView::new(&ClientConfig::default());
    view.load_population(&[
        record("b", EntityCategory::Behavioral, spec_at(StateKind::Alive, 1.0, 1.0)),
        record(
            "g",
            EntityCategory::Growth,
            StateSpec {
                size: Some(3.0),
                maturity: Some(0.5),
                ..spec_at(StateKind::Alive, 1.0, 1.0)
            },
        ),
    ])?;

    let partial = StateSpec {
        size: Some(5.0),
        ..Default::default()
    };
    view.apply_updates(vec![update("b", partial.clone()), update("g", partial)])?;
    view.apply_updates(Vec::new())?;

    let b = view.organism(&OrganismId::from("b")).expect("b");
    assert_eq!(b.state.position(), Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(b.state.kind(), Some(StateKind::Alive));

    let g = view.organism(&OrganismId::from("g")).expect("g");
    assert_eq!(g.state.position(), Vec3::ZERO);
    assert_eq!(g.state.kind(), None);
    Ok(())
}

#[test]
fn jsonl_roundtrip_through_view() -> anyhow::Result<()> {
    let messages = vec![
        Message::state(vec![record(
            "a",
            EntityCategory::Growth,
            StateSpec {
                size: Some(10.0),
                maturity: Some(0.0),
                ..spec_at(StateKind::Alive, 0.0, 0.0)
            },
        )]),
        Message::update(vec![update(
            "a",
            StateSpec {
                size: Some(20.0),
                maturity: Some(1.0),
                ..spec_at(StateKind::Alive, 0.0, 0.0)
            },
        )]),
    ];
    let text = to_jsonl(&messages)?;

    let mut view = WorldView::new(&ClientConfig::default());
    for line in text.lines() {
        view.handle_message(serde_json::from_str(line)?)?;
    }
    let frame = view.frame(0.5)?;
    let egol_shared::state::EntityState::Growth(g) = &frame[0].1 else {
        anyhow::bail!("expected growth state");
    };
    assert_eq!(g.size, Some(15.0));
    Ok(())
}
