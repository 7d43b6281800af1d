#[spy]
pub trait Codec: std::fmt::Debug {
    type Error;

    fn encode<T: 'static>(&self, value: T) -> Vec<u8>;
    fn decode<T: 'static>(&self, bytes: &[u8]) -> T;
    fn checksum(&self, bytes: Vec<u8>) -> Result<u32, Self::Error>;
}
