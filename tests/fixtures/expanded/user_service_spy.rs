// @generated by spygen. Do not edit.

#[cfg(test)]
#[doc = " Spy implementation of [`UserService`], recording calls and delegating to configurable handlers."]
#[derive(Default)]
#[allow(dead_code)]
pub struct UserServiceSpy {
    fetch_user_call_count: ::std::cell::Cell<usize>,
    fetch_user_received_invocations: ::std::cell::RefCell<::std::vec::Vec<i64>>,
    fetch_user_handler: ::std::cell::RefCell<::std::option::Option<::std::rc::Rc<dyn Fn(i64) -> String>>>,
    log_call_count: ::std::cell::Cell<usize>,
    log_received_invocations: ::std::cell::RefCell<::std::vec::Vec<::std::string::String>>,
    log_handler: ::std::cell::RefCell<::std::option::Option<::std::rc::Rc<dyn Fn(&str)>>>,
    ping_call_count: ::std::cell::Cell<usize>,
    ping_handler: ::std::cell::RefCell<::std::option::Option<::std::rc::Rc<dyn Fn()>>>,
}
#[cfg(test)]
#[allow(dead_code)]
impl UserServiceSpy {
    /// Creates a spy with empty logs and no handlers or stubbed values.
    pub fn new() -> Self {
        ::std::default::Default::default()
    }
    pub fn fetch_user_call_count(&self) -> usize {
        self.fetch_user_call_count.get()
    }
    pub fn fetch_user_called(&self) -> bool {
        self.fetch_user_call_count() > 0
    }
    pub fn fetch_user_received_arguments(&self) -> ::std::option::Option<i64> {
        self.fetch_user_received_invocations.borrow().last().cloned()
    }
    pub fn fetch_user_received_invocations(&self) -> ::std::vec::Vec<i64> {
        self.fetch_user_received_invocations.borrow().clone()
    }
    pub fn set_fetch_user_handler(&self, handler: impl Fn(i64) -> String + 'static) {
        let handler: ::std::rc::Rc<dyn Fn(i64) -> String> = ::std::rc::Rc::new(handler);
        *self.fetch_user_handler.borrow_mut() = ::std::option::Option::Some(handler);
    }
    pub fn log_call_count(&self) -> usize {
        self.log_call_count.get()
    }
    pub fn log_called(&self) -> bool {
        self.log_call_count() > 0
    }
    pub fn log_received_arguments(&self) -> ::std::option::Option<::std::string::String> {
        self.log_received_invocations.borrow().last().cloned()
    }
    pub fn log_received_invocations(&self) -> ::std::vec::Vec<::std::string::String> {
        self.log_received_invocations.borrow().clone()
    }
    pub fn set_log_handler(&self, handler: impl Fn(&str) + 'static) {
        let handler: ::std::rc::Rc<dyn Fn(&str)> = ::std::rc::Rc::new(handler);
        *self.log_handler.borrow_mut() = ::std::option::Option::Some(handler);
    }
    pub fn ping_call_count(&self) -> usize {
        self.ping_call_count.get()
    }
    pub fn ping_called(&self) -> bool {
        self.ping_call_count() > 0
    }
    pub fn set_ping_handler(&self, handler: impl Fn() + 'static) {
        let handler: ::std::rc::Rc<dyn Fn()> = ::std::rc::Rc::new(handler);
        *self.ping_handler.borrow_mut() = ::std::option::Option::Some(handler);
    }
    /// Zeroes every counter and clears every log, handler, stubbed value and keyed store.
    pub fn reset(&self) {
        self.fetch_user_call_count.set(0);
        self.fetch_user_received_invocations.borrow_mut().clear();
        *self.fetch_user_handler.borrow_mut() = ::std::option::Option::None;
        self.log_call_count.set(0);
        self.log_received_invocations.borrow_mut().clear();
        *self.log_handler.borrow_mut() = ::std::option::Option::None;
        self.ping_call_count.set(0);
        *self.ping_handler.borrow_mut() = ::std::option::Option::None;
    }
}
#[cfg(test)]
impl UserService for UserServiceSpy {
    fn fetch_user(&self, id: i64) -> String {
        let __spy_handler = {
            self.fetch_user_call_count.set(self.fetch_user_call_count.get() + 1);
            self.fetch_user_received_invocations
                .borrow_mut()
                .push(::std::clone::Clone::clone(&id));
            self.fetch_user_handler.borrow().clone()
        };
        match __spy_handler {
            ::std::option::Option::Some(__spy_handler) => __spy_handler(id),
            ::std::option::Option::None => {
                ::spygen::runtime::unconfigured_handler("UserServiceSpy", "fetch_user_handler")
            }
        }
    }
    fn log(&self, message: &str) {
        let __spy_handler = {
            self.log_call_count.set(self.log_call_count.get() + 1);
            self.log_received_invocations
                .borrow_mut()
                .push(::std::borrow::ToOwned::to_owned(&*message));
            self.log_handler.borrow().clone()
        };
        if let ::std::option::Option::Some(__spy_handler) = __spy_handler {
            __spy_handler(message);
        }
    }
    fn ping(&self) {
        let __spy_handler = {
            self.ping_call_count.set(self.ping_call_count.get() + 1);
            self.ping_handler.borrow().clone()
        };
        if let ::std::option::Option::Some(__spy_handler) = __spy_handler {
            __spy_handler();
        }
    }
}
