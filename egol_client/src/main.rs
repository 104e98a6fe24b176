//! Replay binary.
//!
//! Usage:
//!   cargo run -p egol_client --bin replay -- [--input updates.jsonl] [--config client.json]
//!   cargo run -p egol_client --bin replay -- --demo 4 --ticks 40
//!
//! A background task feeds simulation messages into a `WorldView` once per
//! server tick and publishes each authoritative snapshot. The main loop renders
//! at the configured frame rate from the latest published pair.
//!
//! `--input` expects one JSON message per line:
//!   {"type":"state","data":[...],"success":true}
//!   {"type":"update","data":[...],"success":true}

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use egol_client::{
    handoff,
    interp::{FrameClock, WorldSnapshot},
    WorldView,
};
use egol_shared::{
    attributes::{AttributesSpec, Family},
    config::ClientConfig,
    math::{PositionSpec, Vec3},
    net::Message,
    organism::{OrganismId, OrganismRecord, OrganismUpdate},
    state::{EntityCategory, StateKind, StateSpec},
};
use rand::Rng;
use tracing::{debug, info};

struct Args {
    cfg: ClientConfig,
    input: Option<PathBuf>,
    demo: usize,
    ticks: u64,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        cfg: ClientConfig::default(),
        input: None,
        demo: 4,
        ticks: 20,
    };
    let argv: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--config" if i + 1 < argv.len() => {
                let raw = std::fs::read_to_string(&argv[i + 1])
                    .with_context(|| format!("read config {}", argv[i + 1]))?;
                args.cfg = ClientConfig::from_json_str(&raw).context("parse config")?;
                i += 2;
            }
            "--input" if i + 1 < argv.len() => {
                args.input = Some(PathBuf::from(&argv[i + 1]));
                i += 2;
            }
            "--demo" if i + 1 < argv.len() => {
                args.demo = argv[i + 1].parse().unwrap_or(4);
                i += 2;
            }
            "--ticks" if i + 1 < argv.len() => {
                args.ticks = argv[i + 1].parse().unwrap_or(20);
                i += 2;
            }
            "--clamp" => {
                args.cfg.clamp_factor = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    Ok(args)
}

async fn load_messages(args: &Args) -> anyhow::Result<Vec<Message>> {
    let Some(path) = &args.input else {
        return Ok(demo_messages(args.demo, args.ticks, &mut rand::thread_rng()));
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str::<Message>(line)
                .with_context(|| format!("parse message on line {}", n + 1))
        })
        .collect()
}

fn random_position(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
        0.0,
    )
}

/// Random-walk population: a full state followed by `ticks` updates.
fn demo_messages(count: usize, ticks: u64, rng: &mut impl Rng) -> Vec<Message> {
    struct Walker {
        record: OrganismRecord,
        position: Vec3,
        energy: f32,
        size: f32,
        maturity: f32,
        kind: StateKind,
    }

    let mut walkers: Vec<Walker> = (0..count)
        .map(|i| {
            let category = if i % 3 == 2 {
                EntityCategory::Growth
            } else {
                EntityCategory::Behavioral
            };
            let position = random_position(rng);
            let size = rng.gen::<f32>();
            let attributes = AttributesSpec {
                family: Family(rng.gen_range(0..3)),
                offense: rng.gen_range(0..10) as f32,
                defense: rng.gen_range(0..10) as f32,
                agility: rng.gen_range(0..10) as f32,
                reproductivity: rng.gen_range(0..10) as f32,
                size,
                range: rng.gen::<f32>() * 100.0,
                perception: rng.gen::<f32>() * 100.0,
                speed: rng.gen_range(1.0..5.0),
            };
            let state = StateSpec {
                kind: Some(StateKind::Alive),
                position: Some(PositionSpec::from(position)),
                size: Some(size),
                maturity: Some(0.0),
                ..Default::default()
            };
            Walker {
                record: OrganismRecord {
                    id: OrganismId(format!("{:08x}", rng.gen::<u32>())),
                    category,
                    attributes: Some(attributes),
                    state: Some(state),
                },
                position,
                energy: 1.0,
                size,
                maturity: 0.0,
                kind: StateKind::Alive,
            }
        })
        .collect();

    let mut messages = vec![Message::state(
        walkers.iter().map(|w| w.record.clone()).collect(),
    )];

    for _ in 0..ticks {
        let updates = walkers
            .iter_mut()
            .map(|w| {
                if w.kind == StateKind::Alive {
                    let step = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
                    w.position = w.position.add(step.scale(5.0));
                    w.size += 0.05;
                    w.maturity = (w.maturity + 0.05).min(1.0);
                    w.energy -= 0.01 + w.size * 0.1;
                    if w.energy <= 0.0 {
                        w.kind = StateKind::Dead;
                    }
                }
                OrganismUpdate {
                    id: w.record.id.clone(),
                    state: Some(StateSpec {
                        kind: Some(w.kind),
                        energy: Some(w.energy),
                        position: Some(PositionSpec::from(w.position)),
                        rotation: Some(step_heading(rng)),
                        size: Some(w.size),
                        maturity: Some(w.maturity),
                        ..Default::default()
                    }),
                }
            })
            .collect();
        messages.push(Message::update(updates));
    }
    messages
}

fn step_heading(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..std::f32::consts::TAU)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args()?;
    let messages = load_messages(&args).await?;
    info!(
        messages = messages.len(),
        tick_ms = args.cfg.tick_ms,
        frame_hz = args.cfg.frame_hz,
        clamp = args.cfg.clamp_factor,
        "Starting replay"
    );

    let mut view = WorldView::new(&args.cfg);
    let (mut publisher, reader) = handoff::channel(WorldSnapshot::default());
    let mut watcher = reader.clone();

    let tick_interval = args.cfg.tick_interval();
    let feed = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(tick_interval);
        for msg in messages {
            ticker.tick().await;
            view.handle_message(msg).context("apply message")?;
            if let Some(last) = view.snaps.last_snapshot() {
                publisher.publish(last.clone());
            }
        }
        // Let the last pair render for a full tick before hanging up.
        ticker.tick().await;
        Ok::<_, anyhow::Error>(view.tick())
    });

    let clock = FrameClock::from_config(&args.cfg);
    let mut frames = tokio::time::interval(args.cfg.frame_interval());
    let mut rendered = 0u64;

    loop {
        tokio::select! {
            _ = frames.tick() => {
                let pair = reader.current();
                let t = clock.factor(pair.published_at.elapsed());
                let states = pair.blend_all(t).context("blend frame")?;
                rendered += 1;
                for (id, state) in &states {
                    debug!(organism = %id, t, position = ?state.position(), kind = ?state.kind(), "Frame");
                }
            }
            changed = watcher.changed() => {
                match changed {
                    Ok(pair) => info!(tick = pair.tick(), organisms = pair.next.organisms.len(), "Snapshot"),
                    Err(_) => break,
                }
            }
        }
    }

    let ticks = feed.await.context("feed task")??;
    info!(ticks, frames = rendered, "Replay finished");
    Ok(())
}
