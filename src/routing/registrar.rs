//! Route registration for discovered views.
//!
//! # Responsibilities
//! - Register one GET route per URL alias of every view
//! - Build the chain each route runs: context setter, then controller invoker
//!
//! # Design Decisions
//! - The context setter always runs and writes all three fields, removing
//!   asset fields the view does not have
//! - The controller invoker is installed only for views with a controller
//! - A controller that responded itself ends the chain without touching the
//!   context; that is a normal outcome, not an error
//! - No deduplication: colliding URLs are registered as given

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::controller::{ControllerHandle, ControllerRequest, Outcome};
use crate::routing::context::ViewContext;
use crate::routing::middleware::{middleware, Flow, Host, Middleware};
use crate::views::ViewDescriptor;

/// Values the context setter writes for one view.
#[derive(Debug, Clone)]
struct ViewBinding {
    script_property: String,
    script: Option<String>,
    style_property: String,
    style: Option<String>,
    view_property: String,
    view: String,
}

/// Register every descriptor's URLs on `host`. Returns the number of routes.
pub fn register_routes<H: Host + ?Sized>(
    host: &mut H,
    descriptors: &[ViewDescriptor],
    config: &EngineConfig,
) -> usize {
    let mut registered = 0;

    for descriptor in descriptors {
        let chain = chain_for(descriptor, config);
        for url in descriptor.urls() {
            host.register_get(url, chain.clone());
            registered += 1;

            tracing::debug!(
                url = %url,
                view = %descriptor.view_id(),
                controller = descriptor.controller().is_some(),
                script = descriptor.script_asset().is_some(),
                style = descriptor.style_asset().is_some(),
                "Registered view route"
            );
        }
    }

    registered
}

/// The ordered chain installed for each URL of `descriptor`.
pub fn chain_for(descriptor: &ViewDescriptor, config: &EngineConfig) -> Vec<Middleware> {
    let binding = ViewBinding {
        script_property: config.javascripts_location_property.clone(),
        script: descriptor.script_asset().map(str::to_string),
        style_property: config.stylesheets_location_property.clone(),
        style: descriptor.style_asset().map(str::to_string),
        view_property: config.view_location_property.clone(),
        view: descriptor.view_id().to_string(),
    };

    let mut chain = vec![context_setter(binding)];
    if let Some(controller) = descriptor.controller() {
        chain.push(controller_invoker(
            controller.handle().clone(),
            descriptor.view_id(),
            &config.controller_result_property,
        ));
    }
    chain
}

fn context_setter(binding: ViewBinding) -> Middleware {
    let binding = Arc::new(binding);

    middleware(move |mut request: Request<Body>| {
        let binding = binding.clone();
        async move {
            ViewContext::update(request.extensions_mut(), |context| {
                context.set(&binding.script_property, binding.script.clone().map(Value::String));
                context.set(&binding.style_property, binding.style.clone().map(Value::String));
                context.set(&binding.view_property, Some(Value::String(binding.view.clone())));
            });
            Flow::Next(request)
        }
    })
}

fn controller_invoker(controller: ControllerHandle, view: &str, result_property: &str) -> Middleware {
    let view: Arc<str> = Arc::from(view);
    let result_property: Arc<str> = Arc::from(result_property);

    middleware(move |mut request: Request<Body>| {
        let controller = controller.clone();
        let view = view.clone();
        let result_property = result_property.clone();
        async move {
            let call = ControllerRequest::from_request(&request, &view);
            match controller.call(call).await {
                Ok(Outcome::Continue(result)) => {
                    ViewContext::update(request.extensions_mut(), |context| {
                        context.set(&result_property, Some(result));
                    });
                    Flow::Next(request)
                }
                Ok(Outcome::Responded(response)) => {
                    tracing::debug!(view = %view, status = %response.status(), "Controller responded directly");
                    Flow::Respond(response)
                }
                Err(error) => {
                    tracing::debug!(view = %view, error = %error, "Controller failed");
                    Flow::Fail(error)
                }
            }
        }
    })
}
