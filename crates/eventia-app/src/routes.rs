//! The application's route table.
//!
//! | Path            | Page               | Guard                     |
//! |-----------------|--------------------|---------------------------|
//! | `/`             | Home               |                           |
//! | `/login`        | Login              | visitors only             |
//! | `/signup`       | Sign up            | visitors only             |
//! | `/components`   | Component demo     |                           |
//! | `/logout`       | Logout             |                           |
//! | `/admin`        | Admin dashboard    | `ADMIN`                   |
//! | `/organizador`  | Organizer dashboard| `ORGANIZADOR`             |
//! | `/dashboard`    | User dashboard     | `USER`                    |
//! | `/unauthorized` | Access denied      |                           |
//! | `*`             | Not found          |                           |

use eventia_pages::router::{Route, RouteContext, RouteTable, RouteTableError};
use eventia_pages::{Component, ComponentError};

use crate::app::AppContext;
use crate::auth::{Role, auth_guard_with, guest_guard};
use crate::pages::{
	ComponentsDemoPage, DashboardPage, HomePage, LoginPage, LogoutPage, NotFoundPage, SignUpPage,
	UnauthorizedPage,
};

/// Path of the component demo.
pub const COMPONENTS_PATH: &str = "/components";
/// Path of the logout route.
pub const LOGOUT_PATH: &str = "/logout";

fn page<C, F>(
	context: &AppContext,
	build: F,
) -> impl Fn(&RouteContext) -> Result<C, ComponentError> + 'static
where
	C: Component,
	F: Fn(&AppContext, &RouteContext) -> Result<C, ComponentError> + 'static,
{
	let context = context.clone();
	move |route: &RouteContext| build(&context, route)
}

fn dashboard(context: &AppContext, role: Role) -> Route {
	let config = &context.config;
	Route::new(
		role.dashboard_path(),
		page(context, move |context, route| DashboardPage::new(context, route, role)),
	)
	.with_name(role.as_str().to_lowercase())
	.with_guard(auth_guard_with(
		&context.auth,
		&[role],
		&config.login_path,
		&config.unauthorized_path,
	))
}

/// Builds the route table over `context`.
pub fn route_table(context: &AppContext) -> Result<RouteTable, RouteTableError> {
	let config = &context.config;
	RouteTable::builder()
		.add(Route::new("/", page(context, |c, r| Ok(HomePage::new(c, r)))).with_name("home"))
		.add(
			Route::new(&config.login_path, page(context, |c, r| Ok(LoginPage::new(c, r))))
				.with_name("login")
				.with_guard(guest_guard(&context.auth, &config.landing_path)),
		)
		.add(
			Route::new("/signup", page(context, |c, r| Ok(SignUpPage::new(c, r))))
				.with_name("signup")
				.with_guard(guest_guard(&context.auth, &config.landing_path)),
		)
		.add(
			Route::new(COMPONENTS_PATH, |_: &RouteContext| Ok(ComponentsDemoPage::new()))
				.with_name("components"),
		)
		.add(
			Route::new(LOGOUT_PATH, page(context, |c, r| Ok(LogoutPage::new(c, r))))
				.with_name("logout"),
		)
		.add(dashboard(context, Role::Admin))
		.add(dashboard(context, Role::Organizer))
		.add(dashboard(context, Role::User))
		.add(
			Route::new(
				&config.unauthorized_path,
				page(context, |c, r| Ok(UnauthorizedPage::new(c, r))),
			)
			.with_name("unauthorized"),
		)
		.fallback(page(context, |c, r| Ok(NotFoundPage::new(c, r))))
		.build()
}
