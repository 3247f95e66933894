use crate::app::ports::AdmissionPort;
use crate::gate::AsyncRateLimiter;
use async_trait::async_trait;

pub struct GateAdapter(pub AsyncRateLimiter);

#[async_trait]
impl AdmissionPort for GateAdapter {
    async fn acquire(&self) {
        self.0.acquire().await;
    }
}
