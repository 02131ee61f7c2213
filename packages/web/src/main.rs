use dioxus::prelude::*;

use ui::{AuthProvider, ToastProvider};
use views::{Guarded, Login, NotFound, RegisterWord, Shell, Signup, WordList};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/login?:next")]
        Login { next: String },
        #[route("/signup")]
        Signup {},
        #[layout(Guarded)]
            #[route("/register-word")]
            RegisterWord {},
            #[route("/word-list")]
            WordList {},
        #[end_layout]
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .try_init();

        match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime.block_on(launch_server()),
            Err(e) => {
                tracing::error!("Failed to start runtime: {}", e);
                std::process::exit(1);
            }
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::middleware::from_fn;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_cookies::CookieManagerLayer;

    // Load settings and build the backend client up front
    if let Err(e) = api::state::get_actions().await {
        tracing::error!("Failed to initialize: {}", e);
        std::process::exit(1);
    }

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        // Guard runs inside the cookie layer so it can read the jar
        .layer(from_fn(route_guard))
        .layer(CookieManagerLayer::new());

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}

/// Send requests for protected pages without a session cookie to the login page.
#[cfg(feature = "server")]
async fn route_guard(
    cookies: tower_cookies::Cookies,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use api::guard::{self, GuardDecision};
    use api::session::SESSION_COOKIE;
    use axum::response::{IntoResponse, Redirect};

    let has_session = cookies
        .get(SESSION_COOKIE)
        .is_some_and(|cookie| !cookie.value().is_empty());

    match guard::check(request.uri().path(), has_session) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(to) => {
            tracing::debug!(path = request.uri().path(), %to, "no session, redirecting");
            Redirect::to(&to).into_response()
        }
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Redirect `/` to `/register-word`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::RegisterWord {});
    rsx! {}
}
