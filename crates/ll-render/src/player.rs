use anyhow::{Result, bail};
use ll_core::error::CoreError;
use ll_core::video::VideoData;

use crate::cadence::CadenceMeter;
use crate::glyph::GlyphMap;
use crate::surface::Surface;
use crate::ticker::{Ticker, period_for_fps};

/// État du player.
///
/// # Example
/// ```
/// use ll_render::player::PlayerState;
/// let state = PlayerState::Idle;
/// assert!(matches!(state, PlayerState::Idle));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// Données chargées, curseur à 0, aucun tick reçu.
    Idle,
    /// Au moins une frame affichée, il en reste ou le tick final n'est pas arrivé.
    Rendering,
    /// Toutes les frames affichées. Terminal.
    Done,
}

/// Lecture d'une `VideoData` à cadence fixe sur une [`Surface`].
///
/// Each tick renders the frame under the cursor and advances it. The first
/// tick that finds the cursor past the last frame moves to
/// [`PlayerState::Done`], so the last frame stays visible for one period.
///
/// # Example
/// ```
/// use ll_render::player::{Player, PlayerState};
/// use ll_render::surface::TerminalSurface;
/// use ll_core::video::VideoData;
///
/// let video = VideoData { width: 2, height: 1, fps: 1, frames: vec!["AB".parse().unwrap()] };
/// let mut player = Player::new(video).unwrap();
/// let mut surface = TerminalSurface::new(Vec::new());
/// assert_eq!(player.tick(&mut surface).unwrap(), PlayerState::Rendering);
/// assert_eq!(player.tick(&mut surface).unwrap(), PlayerState::Done);
/// ```
pub struct Player {
    video: VideoData,
    glyphs: GlyphMap,
    cursor: usize,
    state: PlayerState,
    /// Reused decode buffer.
    frame_buf: String,
    cadence: CadenceMeter,
}

impl Player {
    /// Prepare playback with the standard glyph map.
    ///
    /// # Errors
    /// Returns the [`VideoData::validate`] error if the video breaks an
    /// invariant. Nothing is rendered in that case.
    pub fn new(video: VideoData) -> Result<Self, CoreError> {
        video.validate()?;
        let cadence = CadenceMeter::new(period_for_fps(video.fps));
        Ok(Self {
            video,
            glyphs: GlyphMap::standard(),
            cursor: 0,
            state: PlayerState::Idle,
            frame_buf: String::new(),
            cadence,
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Index of the next frame to render.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total frames in the video.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.video.frames.len()
    }

    /// Handle one tick.
    ///
    /// Once `Done`, further calls render nothing and stay `Done`.
    ///
    /// # Errors
    /// Returns the surface's I/O error.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> std::io::Result<PlayerState> {
        if self.state == PlayerState::Done {
            return Ok(self.state);
        }
        let Some(frame) = self.video.frames.get(self.cursor) else {
            self.state = PlayerState::Done;
            return Ok(self.state);
        };

        self.glyphs
            .decode_into(frame, self.video.width as usize, &mut self.frame_buf);
        surface.clear()?;
        surface.present(&self.frame_buf)?;

        self.cadence.mark();
        self.cursor += 1;
        self.state = PlayerState::Rendering;
        Ok(self.state)
    }

    /// Drive the player from `ticker` until `Done`, then stop the ticker.
    ///
    /// Returns the number of frames rendered.
    ///
    /// # Errors
    /// Returns a surface I/O error, or an error if the ticker dies before
    /// playback is complete.
    pub fn run<S: Surface>(&mut self, surface: &mut S, ticker: Ticker) -> Result<usize> {
        while self.state != PlayerState::Done {
            if ticker.recv().is_err() {
                bail!(
                    "Source de ticks interrompue à la frame {}/{}",
                    self.cursor,
                    self.frame_count()
                );
            }
            self.tick(surface)?;
        }
        ticker.stop();

        log::info!(
            "Lecture terminée : {} frames, {:.1} fps mesurés (cible {}), {} en retard, pire intervalle {:?}",
            self.cadence.renders(),
            self.cadence.fps(),
            self.video.fps,
            self.cadence.late(),
            self.cadence.worst_interval()
        );
        Ok(self.cursor)
    }

    /// Start a ticker at the video's rate and [`Player::run`] to completion.
    ///
    /// # Errors
    /// See [`Ticker::start`] and [`Player::run`].
    pub fn play<S: Surface>(&mut self, surface: &mut S) -> Result<usize> {
        let ticker = Ticker::start(period_for_fps(self.video.fps))?;
        log::info!(
            "Lecture : {} frames {}×{} @ {}fps ({:.1}s)",
            self.frame_count(),
            self.video.width,
            self.video.height,
            self.video.fps,
            self.video.duration_secs()
        );
        self.run(surface, ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GLYPH_WIDTH;
    use std::io;

    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        frames: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) -> io::Result<()> {
            self.clears += 1;
            Ok(())
        }

        fn present(&mut self, frame: &str) -> io::Result<()> {
            self.frames.push(frame.to_string());
            Ok(())
        }
    }

    fn video(width: u32, height: u32, fps: u32, frames: &[&str]) -> VideoData {
        VideoData {
            width,
            height,
            fps,
            frames: frames.iter().map(|f| f.parse().unwrap()).collect(),
        }
    }

    #[test]
    fn single_frame_renders_once_then_done() {
        let mut player = Player::new(video(2, 1, 1, &["AB"])).unwrap();
        let mut surface = RecordingSurface::default();
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.cursor(), 0);

        assert_eq!(player.tick(&mut surface).unwrap(), PlayerState::Rendering);
        assert_eq!(player.cursor(), 1);
        assert_eq!(player.tick(&mut surface).unwrap(), PlayerState::Done);
        assert_eq!(player.tick(&mut surface).unwrap(), PlayerState::Done);
        assert_eq!(player.cursor(), 1);

        assert_eq!(surface.frames, ["  ░░"]);
        assert_eq!(surface.clears, 1);
    }

    #[test]
    fn invalid_video_never_starts() {
        assert!(Player::new(video(2, 2, 1, &["AB"])).is_err());
        assert!(Player::new(video(2, 1, 0, &["AB"])).is_err());
        assert!(Player::new(video(2, 1, 1, &[])).is_err());
    }

    #[test]
    fn run_renders_exactly_n_frames_of_the_right_shape() {
        let frames = ["ABCDDCBA", "AAAAAAAA", "DDDDABCD"];
        let mut player = Player::new(video(4, 2, 1000, &frames)).unwrap();
        let mut surface = RecordingSurface::default();
        let ticker = Ticker::start(period_for_fps(1000)).unwrap();

        let rendered = player.run(&mut surface, ticker).unwrap();

        assert_eq!(rendered, 3);
        assert_eq!(player.state(), PlayerState::Done);
        assert_eq!(surface.frames.len(), 3);
        assert_eq!(surface.clears, 3);
        for frame in &surface.frames {
            let lines: Vec<&str> = frame.split('\n').collect();
            assert_eq!(lines.len(), 2);
            for line in lines {
                assert_eq!(line.chars().count(), 4 * GLYPH_WIDTH);
            }
        }
        assert_eq!(surface.frames[2], "▓▓▓▓▓▓▓▓\n  ░░▒▒▓▓");
    }

    #[test]
    fn play_uses_the_video_rate() {
        let mut player = Player::new(video(1, 1, 500, &["A", "D"])).unwrap();
        let mut surface = RecordingSurface::default();
        assert_eq!(player.play(&mut surface).unwrap(), 2);
        assert_eq!(surface.frames, ["  ", "▓▓"]);
    }
}
