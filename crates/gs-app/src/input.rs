use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError};
use gs_core::cancel::CancelToken;

/// Période de scrutation du drapeau d'annulation pendant l'attente d'une ligne.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Source des commandes interactives (une ligne par commande).
pub trait CommandSource {
    /// Prochaine ligne saisie, sans le saut de ligne.
    ///
    /// Retourne `None` en fin d'entrée ou si `cancel` est levé pendant
    /// l'attente.
    fn next_line(&mut self, cancel: &CancelToken) -> Option<String>;
}

/// Lignes lues sur stdin par un thread lecteur unique, relayées par canal.
///
/// Le thread principal attend sur le canal avec un timeout court pour
/// observer Ctrl-C sans dépendre de l'interruption d'un `read` bloquant.
pub struct StdinCommands {
    lines: Receiver<String>,
    prompt: String,
}

impl StdinCommands {
    /// Spawne le thread lecteur.
    ///
    /// # Errors
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(prompt: impl Into<String>) -> io::Result<Self> {
        let (tx, rx) = flume::bounded(1);
        thread::Builder::new()
            .name("gs-stdin".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            log::debug!("stdin: {e}");
                            break;
                        }
                    }
                }
                // tx droppé : le receveur voit Disconnected (fin d'entrée).
            })?;
        Ok(Self {
            lines: rx,
            prompt: prompt.into(),
        })
    }
}

impl CommandSource for StdinCommands {
    fn next_line(&mut self, cancel: &CancelToken) -> Option<String> {
        write_prompt(&mut io::stdout(), &self.prompt);
        poll_line(&self.lines, cancel)
    }
}

fn write_prompt(out: &mut impl Write, prompt: &str) {
    if let Err(e) = write!(out, "{prompt}").and_then(|()| out.flush()) {
        log::debug!("affichage du prompt impossible : {e}");
    }
}

fn poll_line(lines: &Receiver<String>, cancel: &CancelToken) -> Option<String> {
    loop {
        if cancel.is_cancelled() {
            return None;
        }
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => return Some(line),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
}

/// Commandes pré-enregistrées, pour les tests et les scripts.
///
/// # Example
/// ```
/// use gs_app::input::{CommandSource, ScriptedCommands};
/// use gs_core::cancel::CancelToken;
/// let mut src = ScriptedCommands::new(["3", "q"]);
/// let token = CancelToken::new();
/// assert_eq!(src.next_line(&token).as_deref(), Some("3"));
/// assert_eq!(src.next_line(&token).as_deref(), Some("q"));
/// assert_eq!(src.next_line(&token), None);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedCommands {
    lines: VecDeque<String>,
}

impl ScriptedCommands {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl CommandSource for ScriptedCommands {
    fn next_line(&mut self, cancel: &CancelToken) -> Option<String> {
        if cancel.is_cancelled() {
            return None;
        }
        self.lines.pop_front()
    }
}
