use crate::{
    routes::{Access, Route, RouteGuard},
    storage::TokenStorage,
    views::{
        LoginForm, NavBar, RideCreationForm, RideListView, SignUpForm,
        Submission,
    },
    Api, SessionStore,
};

/// A mounted page, ready to be shown or interacted with.
#[derive(Debug)]
pub enum Page {
    Login(LoginForm),
    SignUp(SignUpForm),
    Home {
        navbar: NavBar,
        rides: RideListView,
    },
    CreateRide(RideCreationForm),
}

impl Page {
    pub fn route(&self) -> Route {
        match self {
            Page::Login(_) => Route::Login,
            Page::SignUp(_) => Route::SignUp,
            Page::Home { .. } => Route::Home,
            Page::CreateRide(_) => Route::CreateRide,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Page::Login(form) => form.render(),
            Page::SignUp(form) => form.render(),
            Page::Home { navbar, rides } => {
                format!("{}\n{}", navbar.render(), rides.render())
            },
            Page::CreateRide(form) => form.render(),
        }
    }
}

/// Ties the pages together, the way a browser's router would.
///
/// The [`App`] owns the only [`SessionStore`]. Pages borrow it while they
/// are being mounted or submitted.
#[derive(Debug)]
pub struct App<A, S> {
    api: A,
    sessions: SessionStore<S>,
    route: Route,
    guard: RouteGuard,
}

impl<A, S> App<A, S>
where
    A: Api,
    S: TokenStorage,
{
    pub fn new(api: A, storage: S) -> Self {
        App {
            api,
            sessions: SessionStore::new(storage),
            route: Route::Home,
            guard: RouteGuard,
        }
    }

    /// The route of the most recently opened page.
    pub fn route(&self) -> Route { self.route }

    pub fn sessions(&self) -> &SessionStore<S> { &self.sessions }

    /// Lend out the API and session store, e.g. to submit a form.
    pub fn parts(&mut self) -> (&A, &mut SessionStore<S>) {
        (&self.api, &mut self.sessions)
    }

    /// Navigate to a route, going to the login page instead if it needs a
    /// session we don't have.
    pub async fn open(&mut self, route: Route) -> Page {
        let route = match self.guard.check(&self.sessions, route) {
            Access::Granted => route,
            Access::Redirect(to) => to,
        };

        log::debug!("Opening {}", route);
        self.route = route;

        match route {
            Route::Login => Page::Login(LoginForm::new()),
            Route::SignUp => Page::SignUp(SignUpForm::new()),
            Route::Home => {
                let navbar = NavBar::mount(&self.sessions);
                let mut rides = RideListView::new();
                rides.mount(&self.api).await;

                Page::Home { navbar, rides }
            },
            Route::CreateRide => {
                Page::CreateRide(RideCreationForm::mount(&self.sessions))
            },
        }
    }

    /// Mount just the navigation bar of the home page, without fetching the
    /// ride list.
    ///
    /// Without a session this gives back the page we were redirected to.
    pub async fn open_navbar(&mut self) -> Result<NavBar, Page> {
        match self.guard.check(&self.sessions, Route::Home) {
            Access::Granted => {
                self.route = Route::Home;
                Ok(NavBar::mount(&self.sessions))
            },
            Access::Redirect(to) => Err(self.open(to).await),
        }
    }

    /// Open wherever a submission wants to go, if anywhere.
    pub async fn follow(&mut self, submission: &Submission) -> Option<Page> {
        match submission.navigate_to {
            Some(route) => Some(self.open(route).await),
            None => None,
        }
    }
}
