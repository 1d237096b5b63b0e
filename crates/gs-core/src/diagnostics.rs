use std::sync::Mutex;

/// Puits de diagnostics passé explicitement aux composants.
///
/// Reçoit les événements `warn`/`error` du pipeline (frame ignorée, hauteur
/// forcée à 1, échec de rendu) au lieu d'une configuration de log globale.
pub trait Diagnostics: Send + Sync {
    /// Recoverable anomaly.
    fn warn(&self, message: &str);
    /// Failure that aborts the current operation.
    fn error(&self, message: &str);
}

/// Forwards to the `log` facade. Used by the binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}

/// Severity of a recorded message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Warn,
    Error,
}

/// Enregistre les messages en mémoire.
///
/// # Example
/// ```
/// use gs_core::diagnostics::{Diagnostics, MemoryDiagnostics};
/// let diag = MemoryDiagnostics::default();
/// diag.warn("frame 3 ignorée");
/// assert_eq!(diag.warnings(), vec!["frame 3 ignorée".to_string()]);
/// assert!(diag.errors().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<(Level, String)>>,
}

impl MemoryDiagnostics {
    fn push(&self, level: Level, message: &str) {
        // A poisoned lock still holds valid entries.
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.push((level, message.to_string()));
    }

    fn collect(&self, level: Level) -> Vec<String> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Recorded warnings, in order.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.collect(Level::Warn)
    }

    /// Recorded errors, in order.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.collect(Level::Error)
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
