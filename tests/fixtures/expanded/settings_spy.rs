// @generated by spygen. Do not edit.

#[cfg(test)]
#[doc = " Spy implementation of [`Settings`], recording calls and delegating to configurable handlers."]
#[derive(Default)]
#[allow(dead_code)]
pub struct SettingsSpy {
    underlying_name: ::std::cell::RefCell<::std::option::Option<String>>,
    nickname: ::std::cell::RefCell<Option<String>>,
    subscript_usize_usize_call_count: ::std::cell::Cell<usize>,
    subscript_usize_usize_received_invocations: ::std::cell::RefCell<::std::vec::Vec<(usize, usize)>>,
    subscript_usize_usize_entries: ::std::cell::RefCell<::std::vec::Vec<((usize, usize), char)>>,
    #[cfg(unix)]
    sync_to_disk_call_count: ::std::cell::Cell<usize>,
    #[cfg(unix)]
    sync_to_disk_handler: ::std::cell::RefCell<::std::option::Option<::std::rc::Rc<dyn Fn() -> bool>>>,
}
#[cfg(test)]
#[allow(dead_code)]
impl SettingsSpy {
    /// Creates a spy with empty logs and no handlers or stubbed values.
    pub fn new() -> Self {
        ::std::default::Default::default()
    }
    pub fn stub_name(&self, value: String) {
        *self.underlying_name.borrow_mut() = ::std::option::Option::Some(value);
    }
    pub fn stub_nickname(&self, value: Option<String>) {
        *self.nickname.borrow_mut() = value;
    }
    pub fn subscript_usize_usize_call_count(&self) -> usize {
        self.subscript_usize_usize_call_count.get()
    }
    pub fn subscript_usize_usize_called(&self) -> bool {
        self.subscript_usize_usize_call_count() > 0
    }
    pub fn subscript_usize_usize_received_arguments(&self) -> ::std::option::Option<(usize, usize)> {
        self.subscript_usize_usize_received_invocations.borrow().last().cloned()
    }
    pub fn subscript_usize_usize_received_invocations(&self) -> ::std::vec::Vec<(usize, usize)> {
        self.subscript_usize_usize_received_invocations.borrow().clone()
    }
    pub fn stub_subscript_usize_usize(&self, index: (usize, usize), value: char) {
        ::spygen::runtime::upsert(
            &mut self.subscript_usize_usize_entries.borrow_mut(),
            index,
            value,
        );
    }
    #[cfg(unix)]
    pub fn sync_to_disk_call_count(&self) -> usize {
        self.sync_to_disk_call_count.get()
    }
    #[cfg(unix)]
    pub fn sync_to_disk_called(&self) -> bool {
        self.sync_to_disk_call_count() > 0
    }
    #[cfg(unix)]
    pub fn set_sync_to_disk_handler(&self, handler: impl Fn() -> bool + 'static) {
        let handler: ::std::rc::Rc<dyn Fn() -> bool> = ::std::rc::Rc::new(handler);
        *self.sync_to_disk_handler.borrow_mut() = ::std::option::Option::Some(handler);
    }
    /// Zeroes every counter and clears every log, handler, stubbed value and keyed store.
    pub fn reset(&self) {
        *self.underlying_name.borrow_mut() = ::std::option::Option::None;
        *self.nickname.borrow_mut() = ::std::option::Option::None;
        self.subscript_usize_usize_call_count.set(0);
        self.subscript_usize_usize_received_invocations.borrow_mut().clear();
        self.subscript_usize_usize_entries.borrow_mut().clear();
        #[cfg(unix)]
        {
            self.sync_to_disk_call_count.set(0);
            *self.sync_to_disk_handler.borrow_mut() = ::std::option::Option::None;
        }
    }
}
#[cfg(test)]
impl Settings for SettingsSpy {
    fn name(&self) -> String {
        match self.underlying_name.borrow().clone() {
            ::std::option::Option::Some(__spy_value) => __spy_value,
            ::std::option::Option::None => {
                ::spygen::runtime::unset_value("SettingsSpy", "underlying_name")
            }
        }
    }
    fn set_name(&mut self, value: String) {
        *self.underlying_name.borrow_mut() = ::std::option::Option::Some(value);
    }
    fn nickname(&self) -> Option<String> {
        self.nickname.borrow().clone()
    }
    fn cell(&self, row: usize, column: usize) -> char {
        let __spy_index = (
            ::std::clone::Clone::clone(&row),
            ::std::clone::Clone::clone(&column),
        );
        let __spy_entry = {
            self.subscript_usize_usize_call_count
                .set(self.subscript_usize_usize_call_count.get() + 1);
            self.subscript_usize_usize_received_invocations
                .borrow_mut()
                .push(::std::clone::Clone::clone(&__spy_index));
            ::spygen::runtime::lookup(&self.subscript_usize_usize_entries.borrow(), &__spy_index)
        };
        match __spy_entry {
            ::std::option::Option::Some(__spy_value) => __spy_value,
            ::std::option::Option::None => {
                ::spygen::runtime::unset_value("SettingsSpy", "subscript_usize_usize_entries")
            }
        }
    }
    fn set_cell(&mut self, row: usize, column: usize, value: char) {
        let __spy_index = (
            ::std::clone::Clone::clone(&row),
            ::std::clone::Clone::clone(&column),
        );
        ::spygen::runtime::upsert(
            &mut self.subscript_usize_usize_entries.borrow_mut(),
            __spy_index,
            value,
        );
    }
    #[cfg(unix)]
    fn sync_to_disk(&self) -> bool {
        let __spy_handler = {
            self.sync_to_disk_call_count.set(self.sync_to_disk_call_count.get() + 1);
            self.sync_to_disk_handler.borrow().clone()
        };
        match __spy_handler {
            ::std::option::Option::Some(__spy_handler) => __spy_handler(),
            ::std::option::Option::None => {
                ::spygen::runtime::unconfigured_handler("SettingsSpy", "sync_to_disk_handler")
            }
        }
    }
}
