//! Recitation playback as an explicit state machine.
//!
//! At most one track is active. Transitions are last-call-wins; no
//! correctness property depends on ordering between rapid play/pause
//! calls. Sink rejections (the autoplay-policy case) never propagate to
//! callers: a rejected fresh start resolves to idle, a rejected resume
//! leaves the track paused.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("playback rejected: {0}")]
    Rejected(String),
    #[error("audio sink unavailable")]
    Unavailable,
}

/// Output device abstraction. The engine only sequences commands; the
/// shell decides what actually makes sound.
pub trait AudioSink {
    /// Prepares the sink for a new track.
    fn load(&mut self, url: &str) -> Result<(), AudioError>;
    /// Starts or resumes the loaded track. May be rejected.
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
    /// Seeks the loaded track back to its start.
    fn rewind(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(String),
    Paused(String),
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing(_))
    }

    pub fn current_track(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Playing(url) | Self::Paused(url) => Some(url),
        }
    }
}

pub struct AudioPlayer<S> {
    sink: S,
    state: PlaybackState,
}

impl<S: AudioSink> AudioPlayer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn current_track(&self) -> Option<&str> {
        self.state.current_track()
    }

    /// Starts `url`, resuming in place when it is the already-active
    /// track. A different active track is paused and rewound first.
    pub fn play(&mut self, url: &str) {
        if self.state.current_track() == Some(url) {
            match self.sink.play() {
                Ok(()) => self.state = PlaybackState::Playing(url.to_string()),
                Err(err) => {
                    tracing::warn!(url, error = %err, "resume rejected");
                    self.state = PlaybackState::Paused(url.to_string());
                }
            }
            return;
        }

        if self.state != PlaybackState::Idle {
            self.sink.pause();
            self.sink.rewind();
        }

        if let Err(err) = self.sink.load(url) {
            tracing::warn!(url, error = %err, "track load failed");
            self.state = PlaybackState::Idle;
            return;
        }

        match self.sink.play() {
            Ok(()) => self.state = PlaybackState::Playing(url.to_string()),
            Err(err) => {
                tracing::warn!(url, error = %err, "playback rejected");
                self.state = PlaybackState::Idle;
            }
        }
    }

    /// Pauses the active track, keeping its position.
    pub fn pause(&mut self) {
        if let PlaybackState::Playing(url) = &self.state {
            let url = url.clone();
            self.sink.pause();
            self.state = PlaybackState::Paused(url);
        }
    }

    /// Stops and rewinds; the track is forgotten.
    pub fn stop(&mut self) {
        if self.state != PlaybackState::Idle {
            self.sink.pause();
            self.sink.rewind();
            self.state = PlaybackState::Idle;
        }
    }

    /// Sink callback when the track finishes naturally.
    pub fn on_ended(&mut self) {
        self.state = PlaybackState::Idle;
    }
}
