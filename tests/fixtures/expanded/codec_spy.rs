// @generated by spygen. Do not edit.

#[cfg(test)]
#[doc = " Spy implementation of [`Codec`], recording calls and delegating to configurable handlers."]
#[derive(Default)]
#[allow(dead_code)]
pub struct CodecSpy {
    encode_call_count: ::std::cell::Cell<usize>,
    encode_received_invocations: ::std::cell::RefCell<
        ::std::vec::Vec<::spygen::runtime::LocalErased>,
    >,
    encode_handler: ::std::cell::RefCell<
        ::std::option::Option<::std::rc::Rc<dyn Fn(::spygen::runtime::LocalErased) -> Vec<u8>>>,
    >,
    decode_call_count: ::std::cell::Cell<usize>,
    decode_received_invocations: ::std::cell::RefCell<::std::vec::Vec<::std::vec::Vec<u8>>>,
    decode_handler: ::std::cell::RefCell<
        ::std::option::Option<::std::rc::Rc<dyn Fn(&[u8]) -> ::spygen::runtime::ErasedReturn>>,
    >,
    checksum_call_count: ::std::cell::Cell<usize>,
    checksum_received_invocations: ::std::cell::RefCell<::std::vec::Vec<Vec<u8>>>,
    checksum_handler: ::std::cell::RefCell<
        ::std::option::Option<
            ::std::rc::Rc<dyn Fn(Vec<u8>) -> Result<u32, ::spygen::runtime::Erased>>,
        >,
    >,
}
#[cfg(test)]
#[allow(dead_code)]
impl CodecSpy {
    /// Creates a spy with empty logs and no handlers or stubbed values.
    pub fn new() -> Self {
        ::std::default::Default::default()
    }
    pub fn encode_call_count(&self) -> usize {
        self.encode_call_count.get()
    }
    pub fn encode_called(&self) -> bool {
        self.encode_call_count() > 0
    }
    pub fn encode_received_arguments(
        &self,
    ) -> ::std::option::Option<::spygen::runtime::LocalErased> {
        self.encode_received_invocations.borrow().last().cloned()
    }
    pub fn encode_received_invocations(
        &self,
    ) -> ::std::vec::Vec<::spygen::runtime::LocalErased> {
        self.encode_received_invocations.borrow().clone()
    }
    pub fn set_encode_handler(
        &self,
        handler: impl Fn(::spygen::runtime::LocalErased) -> Vec<u8> + 'static,
    ) {
        let handler: ::std::rc::Rc<dyn Fn(::spygen::runtime::LocalErased) -> Vec<u8>> = ::std::rc::Rc::new(
            handler,
        );
        *self.encode_handler.borrow_mut() = ::std::option::Option::Some(handler);
    }
    pub fn decode_call_count(&self) -> usize {
        self.decode_call_count.get()
    }
    pub fn decode_called(&self) -> bool {
        self.decode_call_count() > 0
    }
    pub fn decode_received_arguments(&self) -> ::std::option::Option<::std::vec::Vec<u8>> {
        self.decode_received_invocations.borrow().last().cloned()
    }
    pub fn decode_received_invocations(&self) -> ::std::vec::Vec<::std::vec::Vec<u8>> {
        self.decode_received_invocations.borrow().clone()
    }
    pub fn set_decode_handler(
        &self,
        handler: impl Fn(&[u8]) -> ::spygen::runtime::ErasedReturn + 'static,
    ) {
        let handler: ::std::rc::Rc<dyn Fn(&[u8]) -> ::spygen::runtime::ErasedReturn> = ::std::rc::Rc::new(
            handler,
        );
        *self.decode_handler.borrow_mut() = ::std::option::Option::Some(handler);
    }
    pub fn checksum_call_count(&self) -> usize {
        self.checksum_call_count.get()
    }
    pub fn checksum_called(&self) -> bool {
        self.checksum_call_count() > 0
    }
    pub fn checksum_received_arguments(&self) -> ::std::option::Option<Vec<u8>> {
        self.checksum_received_invocations.borrow().last().cloned()
    }
    pub fn checksum_received_invocations(&self) -> ::std::vec::Vec<Vec<u8>> {
        self.checksum_received_invocations.borrow().clone()
    }
    pub fn set_checksum_handler(
        &self,
        handler: impl Fn(Vec<u8>) -> Result<u32, ::spygen::runtime::Erased> + 'static,
    ) {
        let handler: ::std::rc::Rc<
            dyn Fn(Vec<u8>) -> Result<u32, ::spygen::runtime::Erased>,
        > = ::std::rc::Rc::new(handler);
        *self.checksum_handler.borrow_mut() = ::std::option::Option::Some(handler);
    }
    /// Zeroes every counter and clears every log, handler, stubbed value and keyed store.
    pub fn reset(&self) {
        self.encode_call_count.set(0);
        self.encode_received_invocations.borrow_mut().clear();
        *self.encode_handler.borrow_mut() = ::std::option::Option::None;
        self.decode_call_count.set(0);
        self.decode_received_invocations.borrow_mut().clear();
        *self.decode_handler.borrow_mut() = ::std::option::Option::None;
        self.checksum_call_count.set(0);
        self.checksum_received_invocations.borrow_mut().clear();
        *self.checksum_handler.borrow_mut() = ::std::option::Option::None;
    }
}
#[cfg(test)]
impl Codec for CodecSpy {
    type Error = ::spygen::runtime::Erased;
    fn encode<T: 'static>(&self, value: T) -> Vec<u8> {
        let value = ::spygen::runtime::LocalErased::new(value);
        let __spy_handler = {
            self.encode_call_count.set(self.encode_call_count.get() + 1);
            self.encode_received_invocations
                .borrow_mut()
                .push(::std::clone::Clone::clone(&value));
            self.encode_handler.borrow().clone()
        };
        match __spy_handler {
            ::std::option::Option::Some(__spy_handler) => __spy_handler(value),
            ::std::option::Option::None => {
                ::spygen::runtime::unconfigured_handler("CodecSpy", "encode_handler")
            }
        }
    }
    fn decode<T: 'static>(&self, bytes: &[u8]) -> T {
        let __spy_handler = {
            self.decode_call_count.set(self.decode_call_count.get() + 1);
            self.decode_received_invocations
                .borrow_mut()
                .push(::std::borrow::ToOwned::to_owned(&*bytes));
            self.decode_handler.borrow().clone()
        };
        match __spy_handler {
            ::std::option::Option::Some(__spy_handler) => {
                __spy_handler(bytes).downcast::<T>("CodecSpy", "decode_handler")
            }
            ::std::option::Option::None => {
                ::spygen::runtime::unconfigured_handler("CodecSpy", "decode_handler")
            }
        }
    }
    fn checksum(&self, bytes: Vec<u8>) -> Result<u32, ::spygen::runtime::Erased> {
        let __spy_handler = {
            self.checksum_call_count.set(self.checksum_call_count.get() + 1);
            self.checksum_received_invocations
                .borrow_mut()
                .push(::std::clone::Clone::clone(&bytes));
            self.checksum_handler.borrow().clone()
        };
        match __spy_handler {
            ::std::option::Option::Some(__spy_handler) => __spy_handler(bytes),
            ::std::option::Option::None => {
                ::spygen::runtime::unconfigured_handler("CodecSpy", "checksum_handler")
            }
        }
    }
}
#[cfg(test)]
impl ::std::fmt::Debug for CodecSpy {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        f.debug_struct("CodecSpy").finish_non_exhaustive()
    }
}
