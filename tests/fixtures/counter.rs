#[spy]
pub trait Counter: Send + Sync {
    fn add(&self, amount: u64);
    async fn total(&self) -> u64;
}
