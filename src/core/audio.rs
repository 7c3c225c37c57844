//! Audio surface.
//!
//! There is no sound device behind this: the jukebox tracks which looping
//! tracks are playing and keeps a log of every request so frontends can show
//! what would be heard and tests can assert on it.

use std::collections::HashSet;
use std::fmt;

/// Most recent requests kept in the jukebox log.
pub const EVENT_LOG_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SoundName {
    // Music
    BattleStart,
    BattleLoop,
    BattleVictory,
    Route,
    Title,

    // Effects
    BattleDamage,
    BattleRun,
    ExperienceFull,
    ExperienceGain,
    Heal,
    LowHealth,
    MenuOpen,
    PlayerBump,
    Faint,
    SelectionChoice,
    SelectionMove,

    /// A species' cry, keyed by species name.
    Cry(String),
}

impl SoundName {
    pub fn cry(species: &str) -> Self {
        SoundName::Cry(species.to_string())
    }

    /// Looping sounds stay on until stopped; everything else is one-shot.
    pub fn is_looping(&self) -> bool {
        matches!(
            self,
            SoundName::BattleLoop
                | SoundName::BattleVictory
                | SoundName::Route
                | SoundName::Title
                | SoundName::LowHealth
        )
    }
}

impl fmt::Display for SoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoundName::BattleStart => "battle-start",
            SoundName::BattleLoop => "battle-loop",
            SoundName::BattleVictory => "battle-victory",
            SoundName::Route => "route",
            SoundName::Title => "title",
            SoundName::BattleDamage => "battle-damage",
            SoundName::BattleRun => "battle-run",
            SoundName::ExperienceFull => "experience-full",
            SoundName::ExperienceGain => "experience-gain",
            SoundName::Heal => "heal",
            SoundName::LowHealth => "low-health",
            SoundName::MenuOpen => "menu-open",
            SoundName::PlayerBump => "player-bump",
            SoundName::Faint => "pokemon-faint",
            SoundName::SelectionChoice => "selection-choice",
            SoundName::SelectionMove => "selection-move",
            SoundName::Cry(species) => return write!(f, "{}", species.to_lowercase()),
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundEvent {
    Play(SoundName),
    Stop(SoundName),
    Pause(SoundName),
}

#[derive(Debug, Default)]
pub struct Jukebox {
    playing: HashSet<SoundName>,
    paused: HashSet<SoundName>,
    events: Vec<SoundEvent>,
}

impl Jukebox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a sound. Playing a looping sound that is already on does nothing.
    pub fn play(&mut self, sound: SoundName) {
        if sound.is_looping() {
            if self.playing.contains(&sound) {
                return;
            }
            self.paused.remove(&sound);
            self.playing.insert(sound.clone());
        }
        tracing::debug!(%sound, "play");
        self.log(SoundEvent::Play(sound));
    }

    pub fn stop(&mut self, sound: SoundName) {
        let was_on = self.playing.remove(&sound) | self.paused.remove(&sound);
        if was_on {
            tracing::debug!(%sound, "stop");
            self.log(SoundEvent::Stop(sound));
        }
    }

    /// Pauses a looping sound; playing it again resumes it.
    pub fn pause(&mut self, sound: SoundName) {
        if self.playing.remove(&sound) {
            tracing::debug!(%sound, "pause");
            self.paused.insert(sound.clone());
            self.log(SoundEvent::Pause(sound));
        }
    }

    fn log(&mut self, event: SoundEvent) {
        self.events.push(event);
        if self.events.len() > EVENT_LOG_CAPACITY {
            let excess = self.events.len() - EVENT_LOG_CAPACITY;
            self.events.drain(..excess);
        }
    }

    pub fn is_playing(&self, sound: &SoundName) -> bool {
        self.playing.contains(sound)
    }

    pub fn is_paused(&self, sound: &SoundName) -> bool {
        self.paused.contains(sound)
    }

    /// Number of times `sound` was started within the retained log.
    pub fn play_count(&self, sound: &SoundName) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SoundEvent::Play(s) if s == sound))
            .count()
    }

    pub fn events(&self) -> &[SoundEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.events)
    }
}
