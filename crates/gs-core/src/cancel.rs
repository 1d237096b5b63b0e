use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Drapeau d'annulation partagé (Ctrl-C → lecture interrompue).
///
/// Clonable, `Send + Sync`, sans verrou. Une fois levé, il le reste.
///
/// # Example
/// ```
/// use gs_core::cancel::CancelToken;
/// let token = CancelToken::new();
/// let handler_side = token.clone();
/// assert!(!token.is_cancelled());
/// handler_side.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lève le drapeau. Sûr depuis un handler de signal.
    #[inline]
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
