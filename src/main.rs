//! Prey vs Predator - window and headless entry point.

use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use piston_window::*;
use prey_vs_predator::{Command, Config, EntityKind, Phase, SimEvent, Vec2, World, format_clock};
use std::path::PathBuf;
use tracing::{debug, info, warn};

const FONT_PATH: &str = "assets/FiraSans-Regular.ttf";
const FRAME_RATE: u64 = 60;

const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const END_BACKGROUND: [f32; 4] = [0.24, 0.0, 0.0, 1.0];
const PREY_COLOR: [f32; 4] = [0.0, 1.0, 0.6, 1.0];
const PREDATOR_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const TEXT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const HINT_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];

const HINT: &str = "click: PREY | X + click: PREDATOR | space: despawn | P: pause | R: reset";

#[derive(Parser, Debug)]
#[command(name = "prey-vs-predator")]
#[command(about = "Keep prey and predators in balance for as long as you can")]
struct Args {
    /// Tuning file (TOML); defaults are used if it does not exist
    #[arg(short, long, default_value = prey_vs_predator::config::DEFAULT_TUNING_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window and print a summary
    #[arg(long)]
    headless: bool,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Seconds per headless tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = Config::load_or_default(&args.config)
        .with_context(|| format!("loading tuning from {}", args.config.display()))?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "Prey vs Predator");

    let world = World::seeded(config, seed);
    if args.headless {
        run_headless(world, args.ticks, args.dt);
        Ok(())
    } else {
        run_window(world)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn run_headless(mut world: World, ticks: u64, dt: f64) {
    world.apply(Command::StartOrRestart);
    let ran = world.run(ticks, dt);
    for event in world.drain_events() {
        debug!(?event, "event");
    }

    let stats = world.stats();
    info!(
        ticks = ran,
        elapsed = %format_clock(world.elapsed_secs()),
        prey = world.prey_count(),
        predators = world.predator_count(),
        births = stats.total_births,
        deaths = stats.total_deaths,
        eaten = stats.prey_eaten,
        max_population = stats.max_population,
        ended = world.phase() == Phase::Ended,
        "headless run finished"
    );
}

fn run_window(mut world: World) -> Result<()> {
    let bounds = world.bounds();
    let mut window: PistonWindow =
        WindowSettings::new("Prey vs Predator", [bounds.width as u32, bounds.height as u32])
            .exit_on_esc(true)
            .build()
            .map_err(|e| anyhow!("failed to create window: {e}"))?;
    window.set_ups(FRAME_RATE);
    window.set_max_fps(FRAME_RATE);

    let mut glyphs = {
        let font_path = std::path::Path::new(FONT_PATH);
        if font_path.exists() {
            window.load_font(font_path).ok()
        } else {
            warn!(path = %font_path.display(), "font not found, text disabled");
            None
        }
    };

    let mut cursor = [0.0, 0.0];
    let mut predator_modifier = false;

    while let Some(e) = window.next() {
        if let Some(pos) = e.mouse_cursor_args() {
            cursor = pos;
        }

        if let Some(button) = e.press_args() {
            match button {
                Button::Mouse(MouseButton::Left) => {
                    let command = match world.phase() {
                        Phase::Title | Phase::Ended => Command::StartOrRestart,
                        Phase::Running => Command::SpawnEntity {
                            kind: if predator_modifier {
                                EntityKind::Predator
                            } else {
                                EntityKind::Prey
                            },
                            position: Vec2::new(cursor[0], cursor[1]),
                        },
                    };
                    world.apply(command);
                }
                Button::Keyboard(Key::X) => predator_modifier = true,
                Button::Keyboard(Key::Space) => world.apply(Command::DespawnRandom),
                Button::Keyboard(Key::P) => world.apply(Command::TogglePause),
                Button::Keyboard(Key::R) if world.phase() == Phase::Running => {
                    world.apply(Command::StartOrRestart)
                }
                _ => {}
            }
        }

        if let Some(Button::Keyboard(Key::X)) = e.release_args() {
            predator_modifier = false;
        }

        if let Some(args) = e.update_args() {
            world.tick(args.dt);
            for event in world.drain_events() {
                // Stand-in for the sound cues.
                debug!(?event, "event");
                if event == SimEvent::SimulationEnded {
                    info!(survived = %format_clock(world.elapsed_secs()), "balance lost");
                }
            }
        }

        window.draw_2d(&e, |c, g, device| {
            match world.phase() {
                Phase::Title => {
                    clear(BACKGROUND, g);
                    if let Some(ref mut glyphs) = glyphs {
                        let (cx, cy) = (bounds.width / 2.0, bounds.height / 2.0);
                        draw_text(
                            glyphs,
                            c,
                            g,
                            TEXT_COLOR,
                            32,
                            "PREY VS PREDATOR",
                            cx - 150.0,
                            cy - 20.0,
                        );
                        draw_text(
                            glyphs,
                            c,
                            g,
                            TEXT_COLOR,
                            16,
                            "click anywhere to start the simulation",
                            cx - 150.0,
                            cy + 20.0,
                        );
                        glyphs.factory.encoder.flush(device);
                    }
                }
                Phase::Running => {
                    clear(BACKGROUND, g);
                    for view in world.snapshot() {
                        let color = match view.kind {
                            EntityKind::Prey => PREY_COLOR,
                            EntityKind::Predator => PREDATOR_COLOR,
                        };
                        let r = view.size / 2.0;
                        ellipse(
                            color,
                            [view.position.x - r, view.position.y - r, view.size, view.size],
                            c.transform,
                            g,
                        );
                    }
                    if let Some(ref mut glyphs) = glyphs {
                        let hud = world.hud();
                        draw_text(
                            glyphs,
                            c,
                            g,
                            TEXT_COLOR,
                            24,
                            &format!("Prey: {}", hud.prey),
                            10.0,
                            30.0,
                        );
                        draw_text(
                            glyphs,
                            c,
                            g,
                            TEXT_COLOR,
                            24,
                            &format!("Predators: {}", hud.predators),
                            10.0,
                            60.0,
                        );
                        let clock = if world.is_paused() {
                            format!("{} (paused)", format_clock(hud.elapsed_secs))
                        } else {
                            format_clock(hud.elapsed_secs)
                        };
                        draw_text(glyphs, c, g, TEXT_COLOR, 24, &clock, bounds.width - 180.0, 30.0);
                        draw_text(
                            glyphs,
                            c,
                            g,
                            HINT_COLOR,
                            14,
                            HINT,
                            bounds.width / 2.0 - 240.0,
                            bounds.height - 10.0,
                        );
                        glyphs.factory.encoder.flush(device);
                    }
                }
                Phase::Ended => {
                    clear(END_BACKGROUND, g);
                    if let Some(ref mut glyphs) = glyphs {
                        let (cx, cy) = (bounds.width / 2.0, bounds.height / 2.0);
                        let survived = format!(
                            "You maintained balance for: {}",
                            format_clock(world.elapsed_secs())
                        );
                        draw_text(glyphs, c, g, TEXT_COLOR, 60, "Not Bad!", cx - 120.0, cy - 50.0);
                        draw_text(glyphs, c, g, TEXT_COLOR, 32, &survived, cx - 250.0, cy + 50.0);
                        draw_text(
                            glyphs,
                            c,
                            g,
                            TEXT_COLOR,
                            16,
                            "click anywhere to restart",
                            cx - 90.0,
                            bounds.height - 50.0,
                        );
                        glyphs.factory.encoder.flush(device);
                    }
                }
            }
        });
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    glyphs: &mut Glyphs,
    c: Context,
    g: &mut G2d,
    color: [f32; 4],
    size: u32,
    s: &str,
    x: f64,
    y: f64,
) {
    let label = text::Text::new_color(color, size);
    if let Err(e) = label.draw(s, glyphs, &c.draw_state, c.transform.trans(x, y), g) {
        warn!(error = ?e, "failed to draw text");
    }
}
