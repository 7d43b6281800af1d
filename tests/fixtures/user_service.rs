#[spy]
pub trait UserService {
    fn fetch_user(&self, id: i64) -> String;
    fn log(&self, message: &str);
    fn ping(&self);
}
