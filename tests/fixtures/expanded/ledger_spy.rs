// @generated by spygen. Do not edit.

#[cfg(test)]
#[derive(Default)]
#[allow(dead_code)]
struct LedgerSpyState {
    post_call_count: usize,
    post_received_invocations: ::std::vec::Vec<i64>,
    post_handler: ::std::option::Option<
        ::std::sync::Arc<dyn Fn(i64) -> ::spygen::runtime::BoxFuture<bool> + Send + Sync>,
    >,
    balance_call_count: usize,
    balance_handler: ::std::option::Option<::std::sync::Arc<dyn Fn() -> i64 + Send + Sync>>,
}
#[cfg(test)]
#[cfg(any(unix, windows))]
#[doc = " Spy implementation of [`Ledger`], recording calls and delegating to configurable handlers."]
#[derive(Default)]
#[allow(dead_code)]
pub struct LedgerSpy {
    state: ::spygen::runtime::FastLock<LedgerSpyState>,
    isolation: ::spygen::runtime::Isolation,
}
#[cfg(test)]
#[cfg(not(any(unix, windows)))]
#[doc = " Spy implementation of [`Ledger`], recording calls and delegating to configurable handlers."]
#[derive(Default)]
#[allow(dead_code)]
pub struct LedgerSpy {
    state: ::spygen::runtime::PortableLock<LedgerSpyState>,
    isolation: ::spygen::runtime::Isolation,
}
#[cfg(test)]
#[allow(dead_code)]
impl LedgerSpy {
    /// Creates a spy with empty logs and no handlers or stubbed values.
    pub fn new() -> Self {
        ::std::default::Default::default()
    }
    pub fn post_call_count(&self) -> usize {
        self.state.with_lock(|__spy_state| __spy_state.post_call_count)
    }
    pub fn post_called(&self) -> bool {
        self.post_call_count() > 0
    }
    pub fn post_received_arguments(&self) -> ::std::option::Option<i64> {
        self.state
            .with_lock(|__spy_state| __spy_state.post_received_invocations.last().cloned())
    }
    pub fn post_received_invocations(&self) -> ::std::vec::Vec<i64> {
        self.state
            .with_lock(|__spy_state| __spy_state.post_received_invocations.clone())
    }
    pub fn set_post_handler<SpyHandler, SpyFuture>(&self, handler: SpyHandler)
    where
        SpyHandler: Fn(i64) -> SpyFuture + Send + Sync + 'static,
        SpyFuture: ::std::future::Future<Output = bool> + Send + 'static,
    {
        let handler: ::std::sync::Arc<
            dyn Fn(i64) -> ::spygen::runtime::BoxFuture<bool> + Send + Sync,
        > = ::std::sync::Arc::new(move |arg0: i64| -> ::spygen::runtime::BoxFuture<bool> {
            ::std::boxed::Box::pin(handler(arg0))
        });
        self.state
            .with_lock(|__spy_state| {
                __spy_state.post_handler = ::std::option::Option::Some(handler);
            });
    }
    pub fn balance_call_count(&self) -> usize {
        self.state.with_lock(|__spy_state| __spy_state.balance_call_count)
    }
    pub fn balance_called(&self) -> bool {
        self.balance_call_count() > 0
    }
    pub fn set_balance_handler(&self, handler: impl Fn() -> i64 + Send + Sync + 'static) {
        let handler: ::std::sync::Arc<dyn Fn() -> i64 + Send + Sync> = ::std::sync::Arc::new(
            handler,
        );
        self.state
            .with_lock(|__spy_state| {
                __spy_state.balance_handler = ::std::option::Option::Some(handler);
            });
    }
    /// Zeroes every counter and clears every log, handler, stubbed value and keyed store.
    pub fn reset(&self) {
        self.state
            .with_lock(|__spy_state| {
                __spy_state.post_call_count = 0;
                __spy_state.post_received_invocations.clear();
                __spy_state.post_handler = ::std::option::Option::None;
                __spy_state.balance_call_count = 0;
                __spy_state.balance_handler = ::std::option::Option::None;
            });
    }
}
#[cfg(test)]
impl Ledger for LedgerSpy {
    async fn post(&self, amount: i64) -> bool {
        let __spy_handler = {
            let _turn = self.isolation.enter().await;
            self.state
                .with_lock(|__spy_state| {
                    __spy_state.post_call_count += 1;
                    __spy_state.post_received_invocations.push(::std::clone::Clone::clone(&amount));
                    __spy_state.post_handler.clone()
                })
        };
        match __spy_handler {
            ::std::option::Option::Some(__spy_handler) => __spy_handler(amount).await,
            ::std::option::Option::None => {
                ::spygen::runtime::unconfigured_handler("LedgerSpy", "post_handler")
            }
        }
    }
    fn balance(&self) -> i64 {
        let __spy_handler = self
            .state
            .with_lock(|__spy_state| {
                __spy_state.balance_call_count += 1;
                __spy_state.balance_handler.clone()
            });
        match __spy_handler {
            ::std::option::Option::Some(__spy_handler) => __spy_handler(),
            ::std::option::Option::None => {
                ::spygen::runtime::unconfigured_handler("LedgerSpy", "balance_handler")
            }
        }
    }
}
#[cfg(test)]
impl spygen::runtime::Isolated for LedgerSpy {}
