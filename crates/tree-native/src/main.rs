use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use glam::Vec2;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::{
    hand_landmark_to_vector, FrameClock, FrameInput, Gesture, GestureLabel, InputError, InputHub,
    InputSource, InteractionEvent, InteractionMode, ParticleKind, Scene, SceneConfig,
};

const TICK_HZ: f32 = 60.0;
const SESSION_SEC: f32 = 14.0;
const CAMERA_ON_SEC: f32 = 5.0;

/// Pointer-side script, in session seconds.
#[derive(Clone, Copy, Debug)]
enum Cue {
    Release,
    Press,
    CameraOn,
    ClickTree,
    Drag(f32),
    Close,
}

const SCRIPT: &[(f32, Cue)] = &[
    (0.5, Cue::Release),
    (3.0, Cue::Press),
    (CAMERA_ON_SEC, Cue::CameraOn),
    (10.0, Cue::ClickTree),
    (10.5, Cue::Drag(-300.0)),
    (11.0, Cue::Drag(-300.0)),
    (13.0, Cue::Close),
];

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>().context("seed must be an integer")?,
        None => 42,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new(&SceneConfig::default(), &mut rng)?;
    scene.set_viewport(1280.0, 720.0);

    let hub = Arc::new(InputHub::new());
    let stop = Arc::new(AtomicBool::new(false));
    let producer = spawn_hand_tracker(Arc::clone(&hub), Arc::clone(&stop))?;

    let dt = 1.0 / TICK_HZ;
    let step = Duration::from_secs_f32(dt);
    let total_ticks = (SESSION_SEC * TICK_HZ) as u32;
    let wall_start = Instant::now();
    let mut deadline = wall_start;
    let mut cues = SCRIPT.iter().peekable();
    let mut events: Vec<InteractionEvent> = Vec::new();
    let mut last_mode = scene.mode();

    for tick in 0..total_ticks {
        let elapsed = tick as f32 * dt;
        events.clear();

        while let Some(&&(at, cue)) = cues.peek() {
            if at > elapsed {
                break;
            }
            cues.next();
            log::info!("[script] t={elapsed:.2}s {cue:?}");
            run_cue(cue, &mut scene, &hub, &mut events);
        }
        let gestures = hub.take_gestures();
        events.extend(gestures.into_iter().map(InteractionEvent::Gesture));

        let input = FrameInput::new(FrameClock::new(elapsed, dt))
            .with_source(hub.source())
            .with_interaction(hub.interaction_vector())
            .with_events(&events);
        scene.tick(&input);

        if scene.mode() != last_mode {
            last_mode = scene.mode();
            log::info!("[scene] t={elapsed:.2}s mode -> {last_mode:?}");
        }
        if tick % TICK_HZ as u32 == 0 {
            report(&scene, elapsed);
        }

        deadline += step;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }

    stop.store(true, Ordering::Release);
    if producer.join().is_err() {
        log::warn!("[native] hand tracker thread panicked");
    }
    report(&scene, SESSION_SEC);
    log::info!(
        "[native] {} ticks in {:.2}s wall time",
        total_ticks,
        wall_start.elapsed().as_secs_f32()
    );
    Ok(())
}

fn run_cue(cue: Cue, scene: &mut Scene, hub: &InputHub, events: &mut Vec<InteractionEvent>) {
    match cue {
        Cue::Release => events.push(InteractionEvent::PointerUp),
        Cue::Press => events.push(InteractionEvent::PointerDown),
        Cue::CameraOn => hub.set_source(InputSource::Camera),
        Cue::ClickTree => {
            if scene.hits_tree(Vec2::ZERO) {
                events.push(InteractionEvent::TreeClicked);
            } else {
                log::warn!("[script] click missed the tree");
            }
        }
        Cue::Drag(dx) => {
            // the gallery opens during the tick that consumes the click
            if let Some(carousel) = scene.carousel_mut() {
                carousel.begin_drag(0.0);
                carousel.drag_to(dx);
                carousel.end_drag();
            }
        }
        Cue::Close => events.push(InteractionEvent::CloseOverlay),
    }
}

/// Stand-in for the camera pipeline: waves a hand around and shows an open
/// palm, then a fist, then loses the stream.
fn spawn_hand_tracker(
    hub: Arc<InputHub>,
    stop: Arc<AtomicBool>,
) -> anyhow::Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("hand-tracker".into())
        .spawn(move || {
            let start = Instant::now();
            let mut palm_sent = false;
            let mut fist_sent = false;
            while !stop.load(Ordering::Acquire) {
                let t = start.elapsed().as_secs_f32();
                if hub.source() == InputSource::Camera {
                    let landmark = Vec2::new(0.5 + 0.3 * (t * 1.3).sin(), 0.5 + 0.2 * (t * 0.7).cos());
                    hub.hand_moved(hand_landmark_to_vector(landmark));
                    if !palm_sent && t > CAMERA_ON_SEC + 1.0 {
                        hub.gesture(Gesture::new(GestureLabel::OpenPalm, 0.92));
                        palm_sent = true;
                    }
                    if !fist_sent && t > CAMERA_ON_SEC + 3.0 {
                        hub.gesture(Gesture::new(GestureLabel::ClosedFist, 0.88));
                        fist_sent = true;
                    }
                    if fist_sent && t > CAMERA_ON_SEC + 4.5 {
                        hub.report_failure(&InputError::CameraUnavailable("stream ended".into()));
                    }
                }
                thread::sleep(Duration::from_millis(33));
            }
        })?;
    Ok(handle)
}

fn report(scene: &Scene, elapsed: f32) {
    let Some(foliage) = scene.group(ParticleKind::Foliage) else {
        return;
    };
    let mode = scene.mode();
    let mean = if foliage.is_empty() {
        0.0
    } else {
        let sum: f32 = foliage
            .records()
            .iter()
            .zip(foliage.live_positions())
            .map(|(r, p)| {
                let target = match mode {
                    InteractionMode::TreeShape => r.tree_position,
                    InteractionMode::Scattered => r.scatter_position,
                };
                p.distance(target)
            })
            .sum();
        sum / foliage.len() as f32
    };
    log::info!(
        "[scene] t={elapsed:.1}s mode={mode:?} overlay={} foliage_off_target={mean:.3} carousel={:.3}",
        scene.overlay_open(),
        scene.carousel().progress()
    );
}
