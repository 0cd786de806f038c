use std::future::Future;

#[derive(Debug, Clone, Default)]
pub(crate) struct RateLimit {}

impl RateLimit {
    pub(crate) async fn check<F, R>(&self, fut: F) -> R
    where
        F: Future<Output = R>,
    {
        fut.await
    }
}
