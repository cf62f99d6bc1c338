use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Lifetime of the visible screen.
///
/// Work started through [`ScreenScope::run`] is abandoned as soon as the
/// screen goes away: the result is dropped and the caller gets `None`.
#[derive(Debug, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

/// Cloneable handle that lets another task dismiss the current screen.
#[derive(Debug, Clone)]
pub struct ScreenHandle {
    token: CancellationToken,
}

impl ScreenHandle {
    pub fn dismiss(&self) {
        self.token.cancel();
    }

    pub fn is_dismissed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScreenHandle {
        ScreenHandle {
            token: self.token.clone(),
        }
    }

    /// Cancel whatever the old screen still has in flight and start a new lifetime.
    pub fn renew(&mut self) {
        self.token.cancel();
        self.token = CancellationToken::new();
    }

    pub fn is_dismissed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => Some(out),
        }
    }
}
