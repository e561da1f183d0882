//! Messages between the world and its collaborators: commands coming in from
//! input handling, events going out to audio, views going out to the renderer.

use crate::entity::EntityKind;
use crate::vector::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    StartOrRestart,
    SpawnEntity { kind: EntityKind, position: Vec2 },
    DespawnRandom,
    TogglePause,
}

/// Discrete happenings a sound collaborator can map to cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// Simulation started or restarted
    Started,
    /// Placed by a command
    Spawned(EntityKind),
    /// Born from reproduction
    Born(EntityKind),
    /// Expired, starved, or removed by command
    Despawned(EntityKind),
    Eaten,
    SimulationEnded,
}

/// Read-only view of one entity for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub prey: usize,
    pub predators: usize,
    pub elapsed_secs: f64,
}

/// `MM:SS` from seconds, truncating.
pub fn format_clock(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
