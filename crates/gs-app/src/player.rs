use std::thread;
use std::time::{Duration, Instant};

use gs_ascii::cache::AnimationCache;
use gs_core::cancel::CancelToken;
use gs_core::diagnostics::Diagnostics;
use gs_core::error::CoreError;
use gs_core::traits::Renderer;

use crate::input::CommandSource;

/// Délai inter-frame par défaut : 40 ms ≈ 25 fps.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(40);

/// État du contrôleur de lecture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Bloqué sur la saisie d'une commande.
    AwaitingInput,
    /// Rendu des frames en cours.
    Playing,
    /// Terminal : plus aucune lecture.
    Stopped,
}

/// Pourquoi le contrôleur s'est arrêté.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// `q` saisi.
    Quit,
    /// Ctrl-C (pendant la saisie ou la lecture).
    Interrupted,
    /// Fin de l'entrée standard.
    EndOfInput,
    /// Un rendu a échoué.
    RenderFailed,
}

/// Nombre de répétitions demandé par l'utilisateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackRequest {
    pub repeat_count: u32,
}

impl PlaybackRequest {
    /// Première suite de chiffres de `input`, sinon 1.
    ///
    /// `"0"` donne 0 répétition (aucun rendu). Une valeur qui dépasse `u32`
    /// est saturée.
    ///
    /// # Example
    /// ```
    /// use gs_app::player::PlaybackRequest;
    /// assert_eq!(PlaybackRequest::parse("").repeat_count, 1);
    /// assert_eq!(PlaybackRequest::parse("play 3 times").repeat_count, 3);
    /// assert_eq!(PlaybackRequest::parse("0").repeat_count, 0);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let repeat_count = first_digit_run(input).map_or(1, |digits| {
            digits.parse::<u32>().unwrap_or(u32::MAX)
        });
        Self { repeat_count }
    }
}

impl Default for PlaybackRequest {
    fn default() -> Self {
        Self { repeat_count: 1 }
    }
}

fn first_digit_run(input: &str) -> Option<&str> {
    let start = input.find(|c: char| c.is_ascii_digit())?;
    let rest = &input[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Commande interactive décodée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Play(PlaybackRequest),
}

/// Décode une ligne saisie : `q` (casse et espaces ignorés) quitte, tout le
/// reste lance une lecture.
///
/// # Example
/// ```
/// use gs_app::player::{parse_command, Command, PlaybackRequest};
/// assert_eq!(parse_command("  Q \n"), Command::Quit);
/// assert_eq!(parse_command("2"), Command::Play(PlaybackRequest { repeat_count: 2 }));
/// ```
#[must_use]
pub fn parse_command(input: &str) -> Command {
    let input = input.trim().to_lowercase();
    if input == "q" {
        Command::Quit
    } else {
        Command::Play(PlaybackRequest::parse(&input))
    }
}

/// Cadence réellement obtenue pendant une lecture. Le délai inter-frame
/// n'est qu'une borne inférieure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackStats {
    pub frames: u64,
    pub elapsed: Duration,
}

impl PlaybackStats {
    /// Frames par seconde sur toute la lecture.
    ///
    /// # Example
    /// ```
    /// use gs_app::player::PlaybackStats;
    /// use std::time::Duration;
    /// let stats = PlaybackStats { frames: 50, elapsed: Duration::from_secs(2) };
    /// assert!((stats.fps() - 25.0).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }
}

enum CycleOutcome {
    Completed,
    Cancelled,
    Failed(CoreError),
}

/// Contrôleur de lecture : boucle de commandes + rendu répété du cache.
///
/// Un seul fil de contrôle. Le seul point de suspension pendant la lecture
/// est le délai inter-frame ; l'annulation est vérifiée à chaque frontière
/// de frame.
pub struct Player<'a, R: Renderer> {
    cache: &'a AnimationCache,
    renderer: R,
    diagnostics: &'a dyn Diagnostics,
    cancel: CancelToken,
    interval: Duration,
    center: bool,
    state: PlaybackState,
    stop_reason: Option<StopReason>,
    frames_shown: u64,
    last_playback: Option<PlaybackStats>,
}

impl<'a, R: Renderer> Player<'a, R> {
    #[must_use]
    pub fn new(
        cache: &'a AnimationCache,
        renderer: R,
        diagnostics: &'a dyn Diagnostics,
        cancel: CancelToken,
    ) -> Self {
        Self {
            cache,
            renderer,
            diagnostics,
            cancel,
            interval: DEFAULT_FRAME_INTERVAL,
            center: false,
            state: PlaybackState::AwaitingInput,
            stop_reason: None,
            frames_shown: 0,
            last_playback: None,
        }
    }

    /// Délai entre deux frames (borne inférieure).
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Statistiques de la dernière lecture, s'il y en a eu une.
    #[must_use]
    pub fn last_playback(&self) -> Option<PlaybackStats> {
        self.last_playback
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn stop(&mut self, reason: StopReason) -> PlaybackState {
        self.state = PlaybackState::Stopped;
        self.stop_reason = Some(reason);
        self.state
    }

    /// Boucle interactive jusqu'à l'état `Stopped`.
    pub fn run(&mut self, commands: &mut dyn CommandSource) -> StopReason {
        loop {
            if let Some(reason) = self.stop_reason {
                return reason;
            }
            if self.cancel.is_cancelled() {
                self.stop(StopReason::Interrupted);
                continue;
            }
            self.state = PlaybackState::AwaitingInput;

            let Some(line) = commands.next_line(&self.cancel) else {
                let reason = if self.cancel.is_cancelled() {
                    StopReason::Interrupted
                } else {
                    StopReason::EndOfInput
                };
                self.stop(reason);
                continue;
            };

            self.handle_input(&line);
        }
    }

    /// Traite une ligne saisie depuis `AwaitingInput`.
    pub fn handle_input(&mut self, line: &str) -> PlaybackState {
        match parse_command(line) {
            Command::Quit => self.stop(StopReason::Quit),
            Command::Play(request) => self.play(request),
        }
    }

    /// Joue `repeat_count × F` frames puis revient en `AwaitingInput`, sauf
    /// annulation ou échec de rendu (→ `Stopped`).
    pub fn play(&mut self, request: PlaybackRequest) -> PlaybackState {
        if request.repeat_count == 0 || self.cache.is_empty() {
            self.state = PlaybackState::AwaitingInput;
            return self.state;
        }

        self.state = PlaybackState::Playing;
        if let Err(e) = self.renderer.begin() {
            self.diagnostics
                .error(&format!("Erreur inattendue pendant l'animation : {e}"));
            return self.stop(StopReason::RenderFailed);
        }

        let started = Instant::now();
        self.frames_shown = 0;
        let outcome = self.play_cycles(request.repeat_count);
        self.renderer.finish();
        let stats = PlaybackStats {
            frames: self.frames_shown,
            elapsed: started.elapsed(),
        };
        log::debug!(
            "lecture terminée : {} frames, {:.1} fps",
            stats.frames,
            stats.fps()
        );
        self.last_playback = Some(stats);

        match outcome {
            CycleOutcome::Completed => {
                self.state = PlaybackState::AwaitingInput;
                self.state
            }
            CycleOutcome::Cancelled => self.stop(StopReason::Interrupted),
            CycleOutcome::Failed(e) => {
                self.diagnostics
                    .error(&format!("Erreur inattendue pendant l'animation : {e}"));
                self.stop(StopReason::RenderFailed)
            }
        }
    }

    fn play_cycles(&mut self, repeat_count: u32) -> CycleOutcome {
        for _ in 0..repeat_count {
            for frame in self.cache {
                if self.cancel.is_cancelled() {
                    return CycleOutcome::Cancelled;
                }
                if let Err(e) = self.renderer.render(frame, self.center) {
                    return CycleOutcome::Failed(e);
                }
                self.frames_shown += 1;
                if !self.interval.is_zero() {
                    thread::sleep(self.interval);
                }
                if self.cancel.is_cancelled() {
                    return CycleOutcome::Cancelled;
                }
            }
        }
        CycleOutcome::Completed
    }
}
