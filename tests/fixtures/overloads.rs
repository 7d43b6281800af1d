#[spy]
pub trait Store {
    fn set(&self, flag: bool, key: String);
    fn set(&self, value: i64, key: String);
    fn write(&self, value: u8);
    fn write(&self, value: u8);
    async fn fetch(&self) -> Result<String, std::io::Error>;
    fn fetch(&self) -> String;
}
