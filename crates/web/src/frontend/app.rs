//! Leptos application with routing.

use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use hirelens_auth::{GuardDecision, IdentityProvider, RedirectPolicy, RouteGuard};
use hirelens_core::{HistoryMode, RouteKey};

use crate::catalog::FeatureCatalog;
use crate::config::ClientConfig;
use crate::controller::{
    ControllerOptions, ControllerSnapshot, HomeView, NavigationController, activate,
};
use crate::health::HttpHealthProbe;
use crate::navigation::{NavigationAction, Navigator};

/// Shared with every page through context.
#[derive(Clone, Copy)]
struct Shell {
    snapshot: ReadSignal<ControllerSnapshot>,
    policy: RedirectPolicy,
    catalog: FeatureCatalog,
}

impl Shell {
    fn decision(&self, route: RouteKey) -> GuardDecision {
        let guard = RouteGuard::new(route, self.policy);
        self.snapshot.with(|s| guard.evaluate(&s.session))
    }
}

/// [`Navigator`] backed by the router.
#[derive(Clone)]
struct RouterNavigator<F>(F);

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn navigate(&self, action: NavigationAction) {
        (self.0)(action.path(), navigate_options(action.history));
    }
}

fn navigate_options(history: HistoryMode) -> NavigateOptions {
    NavigateOptions {
        replace: history == HistoryMode::Replace,
        ..Default::default()
    }
}

/// Main application component.
#[component]
pub fn App(identity: Rc<dyn IdentityProvider>, config: ClientConfig) -> impl IntoView {
    let (snapshot, set_snapshot) = create_signal(ControllerSnapshot::default());

    let options = ControllerOptions::from_config(&config)
        .observe(move |s: &ControllerSnapshot| set_snapshot.set(s.clone()));
    let (controller, probe) = NavigationController::mount(
        identity.as_ref(),
        HttpHealthProbe::from_config(&config),
        options,
    );
    set_snapshot.set(controller.snapshot());

    provide_context(Shell {
        snapshot,
        policy: controller.policy(),
        catalog: *controller.catalog(),
    });

    spawn_local(probe);
    on_cleanup(move || drop(controller));

    view! {
        <Router>
            <Navbar/>
            <main class="container">
                <Routes>
                    <Route path=RouteKey::Home.path() view=HomePage/>
                    <Route path=RouteKey::Login.path() view=LoginPage/>
                    <Route
                        path=RouteKey::UploadResume.path()
                        view=|| view! { <ProtectedRoute route=RouteKey::UploadResume/> }
                    />
                    <Route
                        path=RouteKey::UploadJob.path()
                        view=|| view! { <ProtectedRoute route=RouteKey::UploadJob/> }
                    />
                    <Route
                        path=RouteKey::MatchResults.path()
                        view=|| view! { <ProtectedRoute route=RouteKey::MatchResults/> }
                    />
                    <Route
                        path=RouteKey::History.path()
                        view=|| view! { <ProtectedRoute route=RouteKey::History/> }
                    />
                    <Route
                        path=RouteKey::Insights.path()
                        view=|| view! { <ProtectedRoute route=RouteKey::Insights/> }
                    />
                    <Route
                        path="/*any"
                        view=|| view! {
                            <Redirect path=RouteKey::Home.path() options=navigate_options(HistoryMode::Replace)/>
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn Navbar() -> impl IntoView {
    let shell = expect_context::<Shell>();
    let account = move || {
        shell.snapshot.with(|s| {
            let name = s
                .session
                .user()
                .map(|u| u.email.clone().unwrap_or_else(|| u.id.to_string()));
            (s.session.is_resolved(), name)
        })
    };

    view! {
        <nav class="navbar">
            <A href=RouteKey::Home.path()>"HireLens"</A>
            <div class="navbar-account">
                {move || match account() {
                    (false, _) => view! { <span class="muted">"..."</span> }.into_view(),
                    (true, Some(name)) => view! { <span class="user">{name}</span> }.into_view(),
                    (true, None) => view! { <A href=RouteKey::Login.path()>"Sign In"</A> }.into_view(),
                }}
            </div>
        </nav>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    let shell = expect_context::<Shell>();
    let navigator = RouterNavigator(use_navigate());
    let home = move || shell.snapshot.with(|s| HomeView::build(s, &shell.catalog));

    view! {
        <section class="hero">
            <h1>"AI-Powered Resume Matching"</h1>
            <p>"Analyze resumes and job descriptions, then find the best matches."</p>
            <Show when=move || home().show_sign_in>
                <A href=RouteKey::Login.path()>"Sign In"</A>
            </Show>
        </section>

        <div class=move || format!("status-indicator {}", shell.snapshot.with(|s| s.status.as_str()))>
            {move || shell.snapshot.with(|s| s.status.indicator_label())}
        </div>

        <section class="features">
            {move || {
                home()
                    .cards
                    .into_iter()
                    .map(|card| {
                        let navigator = navigator.clone();
                        let destination = card.destination;
                        let enabled = card.enabled;
                        view! {
                            <div class="feature-card">
                                <h3>{card.title}</h3>
                                <p>{card.description}</p>
                                <button
                                    class:disabled=!enabled
                                    disabled=!enabled
                                    on:click=move |_| {
                                        let session = shell.snapshot.with_untracked(|s| s.session.clone());
                                        activate(&session, &shell.catalog, shell.policy, destination, &navigator);
                                    }
                                >
                                    {card.label}
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </section>
    }
}

#[component]
fn LoginPage() -> impl IntoView {
    let email = create_rw_signal(String::new());

    // Sign-in is handled by the identity provider's hosted flow.
    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        tracing::debug!(email = %email.get_untracked(), "login form submitted");
    };

    view! {
        <div class="login">
            <h2>"Sign In"</h2>
            <form on:submit=submit>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input type="password" id="password"/>
                </div>
                <button type="submit">"Sign In"</button>
            </form>
        </div>
    }
}

#[component]
fn ProtectedRoute(route: RouteKey) -> impl IntoView {
    let shell = expect_context::<Shell>();

    move || match shell.decision(route) {
        GuardDecision::Loading => view! { <div class="loading">"Loading..."</div> }.into_view(),
        GuardDecision::Render(route) => view! { <FeaturePage route=route/> }.into_view(),
        GuardDecision::Redirect { to, history } => {
            tracing::debug!(from = %route, %to, "redirecting denied route");
            view! { <Redirect path=to.path() options=navigate_options(history)/> }.into_view()
        }
    }
}

#[component]
fn FeaturePage(route: RouteKey) -> impl IntoView {
    let shell = expect_context::<Shell>();
    let feature = shell.catalog.get(route);

    view! {
        <div class="feature-page">
            <h2>{feature.map(|f| f.title).unwrap_or(route.as_str())}</h2>
            <p>{feature.map(|f| f.description).unwrap_or_default()}</p>
            <A href=RouteKey::Home.path()>"Back to Home"</A>
        </div>
    }
}
