//! Audio sink
//!
//! Maps simulation events to sound cues. Playback itself belongs to an
//! [`AudioBackend`]; the core only decides what to play and how loud.

use crate::settings::Settings;
use crate::sim::{EventSink, GameEvent, PickupKind, Tier};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Bullet fired
    Thump,
    /// Large or medium asteroid destroyed
    Kapow,
    /// Small asteroid destroyed
    Pillow,
    /// Shield floater collected
    ShieldUp,
    /// Nuke floater collected
    NukeUp,
    /// Nuke deployed
    Nuke,
    /// Ship respawned
    ShipSpawn,
    /// Thrusters (looped)
    Thruster,
    /// Background theme (looped)
    ThemeMusic,
}

impl SoundEffect {
    /// Asset name an external loader resolves
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Thump => "thump.wav",
            SoundEffect::Kapow => "kapow.wav",
            SoundEffect::Pillow => "pillow.wav",
            SoundEffect::ShieldUp => "shieldup.wav",
            SoundEffect::NukeUp => "nuke-up.wav",
            SoundEffect::Nuke => "nuke.wav",
            SoundEffect::ShipSpawn => "shipspawn.wav",
            SoundEffect::Thruster => "whitenoise_loop.wav",
            SoundEffect::ThemeMusic => "dr_loop.wav",
        }
    }

    pub fn is_loop(self) -> bool {
        matches!(self, SoundEffect::Thruster | SoundEffect::ThemeMusic)
    }
}

/// A cue for the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Play(SoundEffect),
    StartLoop(SoundEffect),
    StopLoop(SoundEffect),
}

/// Sound cue for a simulation event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    let cue = match event {
        GameEvent::BulletFired => Cue::Play(SoundEffect::Thump),
        GameEvent::NukeDeployed => Cue::Play(SoundEffect::Nuke),
        GameEvent::HazardDestroyed { tier, .. } => match tier {
            Tier::Small => Cue::Play(SoundEffect::Pillow),
            Tier::Large | Tier::Medium => Cue::Play(SoundEffect::Kapow),
        },
        GameEvent::PickupCollected(PickupKind::Shield) => Cue::Play(SoundEffect::ShieldUp),
        GameEvent::PickupCollected(PickupKind::Nuke) => Cue::Play(SoundEffect::NukeUp),
        GameEvent::ShipRespawned { .. } => Cue::Play(SoundEffect::ShipSpawn),
        GameEvent::ThrustStarted => Cue::StartLoop(SoundEffect::Thruster),
        GameEvent::ThrustStopped => Cue::StopLoop(SoundEffect::Thruster),
        GameEvent::MusicStarted => Cue::StartLoop(SoundEffect::ThemeMusic),
        GameEvent::MusicStopped => Cue::StopLoop(SoundEffect::ThemeMusic),
        _ => return None,
    };
    Some(cue)
}

/// Device-side playback
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn start_loop(&mut self, effect: SoundEffect, volume: f32);
    fn stop_loop(&mut self, effect: SoundEffect);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("play {} at {:.2}", effect.file_name(), volume);
    }

    fn start_loop(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("loop {} at {:.2}", effect.file_name(), volume);
    }

    fn stop_loop(&mut self, effect: SoundEffect) {
        log::debug!("stop {}", effect.file_name());
    }
}

/// Audio manager for the game
pub struct AudioManager<B> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager configured from user settings
    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Send a cue to the backend; loops always stop, even when muted
    pub fn cue(&mut self, cue: Cue) {
        let vol = self.effective_volume();
        match cue {
            Cue::StopLoop(effect) => self.backend.stop_loop(effect),
            _ if vol <= 0.0 => {}
            Cue::Play(effect) => self.backend.play(effect, vol),
            Cue::StartLoop(effect) => self.backend.start_loop(effect, vol),
        }
    }
}

impl<B: AudioBackend> EventSink for AudioManager<B> {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(cue) = cue_for(event) {
            self.cue(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityId, Team};

    #[derive(Default)]
    struct Recorder {
        cues: Vec<Cue>,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.cues.push(Cue::Play(effect));
        }

        fn start_loop(&mut self, effect: SoundEffect, _volume: f32) {
            self.cues.push(Cue::StartLoop(effect));
        }

        fn stop_loop(&mut self, effect: SoundEffect) {
            self.cues.push(Cue::StopLoop(effect));
        }
    }

    #[test]
    fn test_event_mapping() {
        let mut audio = AudioManager::new(Recorder::default());
        for event in [
            GameEvent::BulletFired,
            GameEvent::HazardDestroyed {
                tier: Tier::Small,
                points: 30,
            },
            GameEvent::HazardDestroyed {
                tier: Tier::Large,
                points: 10,
            },
            GameEvent::PickupCollected(PickupKind::Nuke),
            GameEvent::EntityAdded {
                id: EntityId(3),
                team: Team::Debris,
            },
            GameEvent::ThrustStarted,
        ] {
            audio.on_event(&event);
        }
        assert_eq!(
            audio.backend().cues,
            vec![
                Cue::Play(SoundEffect::Thump),
                Cue::Play(SoundEffect::Pillow),
                Cue::Play(SoundEffect::Kapow),
                Cue::Play(SoundEffect::NukeUp),
                Cue::StartLoop(SoundEffect::Thruster),
            ]
        );
    }

    #[test]
    fn test_muted_still_stops_loops() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(Recorder::default(), &settings);
        audio.on_event(&GameEvent::MusicStarted);
        audio.on_event(&GameEvent::BulletFired);
        audio.on_event(&GameEvent::MusicStopped);
        assert_eq!(
            audio.backend().cues,
            vec![Cue::StopLoop(SoundEffect::ThemeMusic)]
        );
    }

    #[test]
    fn test_loop_assets() {
        assert!(SoundEffect::Thruster.is_loop());
        assert!(SoundEffect::Thruster.file_name().ends_with("_loop.wav"));
        assert!(!SoundEffect::Kapow.is_loop());
    }
}
