#[spy]
pub trait Ledger: spygen::runtime::Isolated {
    async fn post(&self, amount: i64) -> bool;
    fn balance(&self) -> i64;
}
