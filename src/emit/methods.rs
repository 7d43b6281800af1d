//! Method templates: counter, argument log and handler.

use super::templates::{GeneratedMemberSet, MemberContext, Template};
use crate::project::{MethodProjection, ReturnProjection};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Type;

pub(crate) fn method(
    ctx: &MemberContext<'_>,
    method: &MethodProjection,
    template: Template,
) -> GeneratedMemberSet {
    let storage = ctx.storage();
    let count = ctx.idents.call_count();
    let log = ctx.idents.received_invocations();
    let handler = ctx.idents.handler();

    let inputs: Vec<Type> = method
        .arguments
        .iter()
        .map(|argument| argument.handler_type.clone())
        .collect();
    let output = method.returns.handler_output();
    let handler_type = storage.handler_type(&inputs, output.as_ref(), method.may_wait);

    let mut set = GeneratedMemberSet::default();
    set.fields.push(storage.counter_decl(&count));
    if let Some(log_type) = &method.log_type {
        set.fields
            .push(storage.field_decl(&log, &quote!(::std::vec::Vec<#log_type>)));
    }
    set.fields.push(storage.field_decl(
        &handler,
        &quote!(::std::option::Option<#handler_type>),
    ));

    set.impl_items.push(impl_body(ctx, method, template));
    set.accessors.extend(call_accessors(ctx, method.log_type.as_ref()));
    set.accessors
        .push(handler_setter(ctx, method, &inputs, output.as_ref(), &handler_type));

    set.reset.push(storage.reset_counter(&count));
    if method.log_type.is_some() {
        let log_place = storage.borrowed_mut(&log);
        set.reset.push(quote!(#log_place.clear();));
    }
    set.reset
        .push(storage.assign(&handler, quote!(::std::option::Option::None)));
    set
}

/// The trait method: bookkeeping under the state lock, handler call after release.
fn impl_body(ctx: &MemberContext<'_>, method: &MethodProjection, template: Template) -> TokenStream {
    let storage = ctx.storage();
    let signature = &method.signature;
    let count = ctx.idents.call_count();
    let handler = ctx.idents.handler();

    let increment = storage.increment(&count);
    let record = method.log_type.as_ref().map(|_| {
        let log = storage.borrowed_mut(&ctx.idents.received_invocations());
        let value = log_value(method);
        quote!(#log.push(#value);)
    });
    let handler_place = storage.borrowed(&handler);
    let mut fetch = storage.critical_block(quote! {
        #increment
        #record
        #handler_place.clone()
    });
    if method.may_wait && storage.is_isolated() {
        fetch = quote!({
            let _turn = self.isolation.enter().await;
            #fetch
        });
    }

    let arguments = method
        .arguments
        .iter()
        .map(|argument| argument.handler_expr(&argument.binding));
    let mut call = quote!(__spy_handler(#(#arguments),*));
    if method.may_wait {
        call = quote!(#call.await);
    }

    let owner = ctx.owner();
    let field = handler.to_string();
    let dispatch = match (&method.returns, template) {
        (ReturnProjection::Unit, _) | (_, Template::UnitMethod) => quote! {
            if let ::std::option::Option::Some(__spy_handler) = __spy_handler {
                #call;
            }
        },
        (ReturnProjection::Value(_), _) => quote! {
            match __spy_handler {
                ::std::option::Option::Some(__spy_handler) => #call,
                ::std::option::Option::None => ::spygen::runtime::unconfigured_handler(#owner, #field),
            }
        },
        (ReturnProjection::Erased { declared }, _) => quote! {
            match __spy_handler {
                ::std::option::Option::Some(__spy_handler) => #call.downcast::<#declared>(#owner, #field),
                ::std::option::Option::None => ::spygen::runtime::unconfigured_handler(#owner, #field),
            }
        },
    };

    let erase = method.arguments.iter().filter_map(|argument| argument.erase_stmt());

    quote! {
        #signature {
            #(#erase)*
            let __spy_handler = #fetch;
            #dispatch
        }
    }
}

/// Owned log entry: the single argument, or a tuple of all of them.
fn log_value(method: &MethodProjection) -> TokenStream {
    let values: Vec<TokenStream> = method
        .arguments
        .iter()
        .map(|argument| argument.log_expr(&argument.binding))
        .collect();
    match values.as_slice() {
        [single] => single.clone(),
        many => quote!((#(#many),*)),
    }
}

/// `<n>_call_count`, `<n>_called` and, with a log, the argument readers.
pub(crate) fn call_accessors(ctx: &MemberContext<'_>, log_type: Option<&Type>) -> Vec<TokenStream> {
    let storage = ctx.storage();
    let count = ctx.idents.call_count();
    let called = ctx.idents.called();
    let read_count = storage.critical_expr(storage.counter(&count));

    let mut accessors = vec![
        quote! {
            pub fn #count(&self) -> usize {
                #read_count
            }
        },
        quote! {
            pub fn #called(&self) -> bool {
                self.#count() > 0
            }
        },
    ];

    if let Some(log_type) = log_type {
        let log = ctx.idents.received_invocations();
        let arguments = ctx.idents.received_arguments();
        let place = storage.borrowed(&log);
        let last = storage.critical_expr(quote!(#place.last().cloned()));
        let all = storage.critical_expr(quote!(#place.clone()));
        accessors.push(quote! {
            pub fn #arguments(&self) -> ::std::option::Option<#log_type> {
                #last
            }
        });
        accessors.push(quote! {
            pub fn #log(&self) -> ::std::vec::Vec<#log_type> {
                #all
            }
        });
    }

    accessors
}

fn handler_setter(
    ctx: &MemberContext<'_>,
    method: &MethodProjection,
    inputs: &[Type],
    output: Option<&Type>,
    handler_type: &TokenStream,
) -> TokenStream {
    let storage = ctx.storage();
    let setter = ctx.idents.set_handler();
    let pointer = storage.pointer();
    let bounds = storage.thread_bounds();
    let store = storage.critical_stmts(
        storage.assign(&ctx.idents.handler(), quote!(::std::option::Option::Some(handler))),
    );

    if !method.may_wait {
        let arrow = output.map(|ty| quote!(-> #ty));
        return quote! {
            pub fn #setter(&self, handler: impl Fn(#(#inputs),*) #arrow + #bounds 'static) {
                let handler: #handler_type = #pointer::new(handler);
                #store
            }
        };
    }

    let output = output.map_or_else(|| quote!(()), |ty| quote!(#ty));
    let future = storage.boxed_future(&output);
    let future_bounds = storage.future_bounds();
    let parameters: Vec<_> = (0..inputs.len()).map(|i| format_ident!("arg{}", i)).collect();
    quote! {
        pub fn #setter<SpyHandler, SpyFuture>(&self, handler: SpyHandler)
        where
            SpyHandler: Fn(#(#inputs),*) -> SpyFuture + #bounds 'static,
            SpyFuture: ::std::future::Future<Output = #output> + #future_bounds 'static,
        {
            let handler: #handler_type = #pointer::new(
                move |#(#parameters: #inputs),*| -> #future {
                    ::std::boxed::Box::pin(handler(#(#parameters),*))
                },
            );
            #store
        }
    }
}
