use async_trait::async_trait;

/// Admission seam for components that pace outbound work without caring
/// which limiter sits behind it.
#[async_trait]
pub trait AdmissionPort: Send + Sync {
    async fn acquire(&self);
}
