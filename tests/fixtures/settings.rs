#[spy]
pub trait Settings {
    #[spy(property)]
    fn name(&self) -> String;
    fn set_name(&mut self, value: String);

    #[spy(property)]
    fn nickname(&self) -> Option<String>;

    #[spy(subscript)]
    fn cell(&self, row: usize, column: usize) -> char;
    fn set_cell(&mut self, row: usize, column: usize, value: char);

    #[cfg(unix)]
    fn sync_to_disk(&self) -> bool;
}
