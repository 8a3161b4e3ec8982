//! Platform audio probe.
//!
//! Desktop builds do not decode recitation audio natively; the shell's
//! web view owns the actual audio element and reports transitions back
//! to the engine's [`AudioPlayer`](wird_engine::AudioPlayer). The
//! [`NullSink`] accepts every command so the player still tracks
//! playback state faithfully.

use serde::{Deserialize, Serialize};

use wird_engine::audio::{AudioError, AudioSink};

/// Capability report a shell can query before deciding where to play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioStatus {
    pub native_playback: bool,
    pub detail: Option<String>,
}

pub fn status() -> AudioStatus {
    AudioStatus {
        native_playback: false,
        detail: Some("shell-side audio element expected".to_string()),
    }
}

/// Sink that sequences state without producing sound.
#[derive(Debug, Default)]
pub struct NullSink {
    loaded: Option<String>,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded_track(&self) -> Option<&str> {
        self.loaded.as_deref()
    }
}

impl AudioSink for NullSink {
    fn load(&mut self, url: &str) -> Result<(), AudioError> {
        self.loaded = Some(url.to_string());
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        if self.loaded.is_none() {
            return Err(AudioError::Unavailable);
        }
        Ok(())
    }

    fn pause(&mut self) {}

    fn rewind(&mut self) {}
}

#[cfg(test)]
mod tests {
    use wird_engine::AudioPlayer;

    use super::*;

    #[test]
    fn desktop_reports_no_native_playback() {
        assert!(!status().native_playback);
    }

    #[test]
    fn null_sink_drives_the_state_machine() {
        let mut player = AudioPlayer::new(NullSink::new());
        let url = wird_engine::catalog::surah_audio_url("7", 1);

        player.play(&url);
        assert!(player.is_playing());
        assert_eq!(player.current_track(), Some(url.as_str()));

        player.pause();
        assert!(!player.is_playing());
        player.stop();
        assert_eq!(player.current_track(), None);
    }
}
