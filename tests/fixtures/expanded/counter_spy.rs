// @generated by spygen. Do not edit.

#[cfg(test)]
#[derive(Default)]
#[allow(dead_code)]
struct CounterSpyState {
    add_call_count: usize,
    add_received_invocations: ::std::vec::Vec<u64>,
    add_handler: ::std::option::Option<::std::sync::Arc<dyn Fn(u64) + Send + Sync>>,
    total_call_count: usize,
    total_handler: ::std::option::Option<
        ::std::sync::Arc<dyn Fn() -> ::spygen::runtime::BoxFuture<u64> + Send + Sync>,
    >,
}
#[cfg(test)]
#[cfg(any(unix, windows))]
#[doc = " Spy implementation of [`Counter`], recording calls and delegating to configurable handlers."]
#[derive(Default)]
#[allow(dead_code)]
pub struct CounterSpy {
    state: ::spygen::runtime::FastLock<CounterSpyState>,
}
#[cfg(test)]
#[cfg(not(any(unix, windows)))]
#[doc = " Spy implementation of [`Counter`], recording calls and delegating to configurable handlers."]
#[derive(Default)]
#[allow(dead_code)]
pub struct CounterSpy {
    state: ::spygen::runtime::PortableLock<CounterSpyState>,
}
#[cfg(test)]
#[allow(dead_code)]
impl CounterSpy {
    /// Creates a spy with empty logs and no handlers or stubbed values.
    pub fn new() -> Self {
        ::std::default::Default::default()
    }
    pub fn add_call_count(&self) -> usize {
        self.state.with_lock(|__spy_state| __spy_state.add_call_count)
    }
    pub fn add_called(&self) -> bool {
        self.add_call_count() > 0
    }
    pub fn add_received_arguments(&self) -> ::std::option::Option<u64> {
        self.state
            .with_lock(|__spy_state| __spy_state.add_received_invocations.last().cloned())
    }
    pub fn add_received_invocations(&self) -> ::std::vec::Vec<u64> {
        self.state
            .with_lock(|__spy_state| __spy_state.add_received_invocations.clone())
    }
    pub fn set_add_handler(&self, handler: impl Fn(u64) + Send + Sync + 'static) {
        let handler: ::std::sync::Arc<dyn Fn(u64) + Send + Sync> = ::std::sync::Arc::new(
            handler,
        );
        self.state
            .with_lock(|__spy_state| {
                __spy_state.add_handler = ::std::option::Option::Some(handler);
            });
    }
    pub fn total_call_count(&self) -> usize {
        self.state.with_lock(|__spy_state| __spy_state.total_call_count)
    }
    pub fn total_called(&self) -> bool {
        self.total_call_count() > 0
    }
    pub fn set_total_handler<SpyHandler, SpyFuture>(&self, handler: SpyHandler)
    where
        SpyHandler: Fn() -> SpyFuture + Send + Sync + 'static,
        SpyFuture: ::std::future::Future<Output = u64> + Send + 'static,
    {
        let handler: ::std::sync::Arc<
            dyn Fn() -> ::spygen::runtime::BoxFuture<u64> + Send + Sync,
        > = ::std::sync::Arc::new(move || -> ::spygen::runtime::BoxFuture<u64> {
            ::std::boxed::Box::pin(handler())
        });
        self.state
            .with_lock(|__spy_state| {
                __spy_state.total_handler = ::std::option::Option::Some(handler);
            });
    }
    /// Zeroes every counter and clears every log, handler, stubbed value and keyed store.
    pub fn reset(&self) {
        self.state
            .with_lock(|__spy_state| {
                __spy_state.add_call_count = 0;
                __spy_state.add_received_invocations.clear();
                __spy_state.add_handler = ::std::option::Option::None;
                __spy_state.total_call_count = 0;
                __spy_state.total_handler = ::std::option::Option::None;
            });
    }
}
#[cfg(test)]
impl Counter for CounterSpy {
    fn add(&self, amount: u64) {
        let __spy_handler = self
            .state
            .with_lock(|__spy_state| {
                __spy_state.add_call_count += 1;
                __spy_state.add_received_invocations.push(::std::clone::Clone::clone(&amount));
                __spy_state.add_handler.clone()
            });
        if let ::std::option::Option::Some(__spy_handler) = __spy_handler {
            __spy_handler(amount);
        }
    }
    async fn total(&self) -> u64 {
        let __spy_handler = self
            .state
            .with_lock(|__spy_state| {
                __spy_state.total_call_count += 1;
                __spy_state.total_handler.clone()
            });
        match __spy_handler {
            ::std::option::Option::Some(__spy_handler) => __spy_handler().await,
            ::std::option::Option::None => {
                ::spygen::runtime::unconfigured_handler("CounterSpy", "total_handler")
            }
        }
    }
}
