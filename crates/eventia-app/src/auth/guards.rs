//! Route guard policies.

use eventia_pages::router::{GuardContext, GuardError};
use eventia_pages::{info_log, warn_log};

use super::{Auth, Role};

/// Redirect target for visitors without a session.
pub const DEFAULT_LOGIN_PATH: &str = "/login";
/// Redirect target for users whose role is not allowed.
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Requires a session and, when `allowed_roles` is not empty, one of those
/// roles.
///
/// Denials redirect through the router: to `/login` without a session, to
/// `/unauthorized` for a role outside the list.
pub fn auth_guard(
	auth: &Auth,
	allowed_roles: &[Role],
) -> impl Fn(&GuardContext<'_>) -> Result<bool, GuardError> + 'static {
	auth_guard_with(auth, allowed_roles, DEFAULT_LOGIN_PATH, DEFAULT_UNAUTHORIZED_PATH)
}

/// [`auth_guard`] with explicit redirect targets.
pub fn auth_guard_with(
	auth: &Auth,
	allowed_roles: &[Role],
	login_path: &str,
	unauthorized_path: &str,
) -> impl Fn(&GuardContext<'_>) -> Result<bool, GuardError> + 'static {
	let auth = auth.clone();
	let allowed_roles = allowed_roles.to_vec();
	let login_path = login_path.to_string();
	let unauthorized_path = unauthorized_path.to_string();

	move |ctx| {
		if !auth.is_authenticated() {
			warn_log!("{} requires a session; redirecting to {}", ctx.path(), login_path);
			ctx.redirect(login_path.as_str());
			return Ok(false);
		}
		if !allowed_roles.is_empty() && !auth.has_any_role(&allowed_roles) {
			warn_log!(
				"access to {} denied for role {:?}; allowed: {:?}",
				ctx.path(),
				auth.user_role(),
				allowed_roles
			);
			ctx.redirect(unauthorized_path.as_str());
			return Ok(false);
		}
		Ok(true)
	}
}

/// Lets only visitors without a session through; signed-in users go to
/// `landing`.
pub fn guest_guard(
	auth: &Auth,
	landing: &str,
) -> impl Fn(&GuardContext<'_>) -> Result<bool, GuardError> + 'static {
	let auth = auth.clone();
	let landing = landing.to_string();

	move |ctx| {
		if auth.is_authenticated() {
			info_log!("already signed in; redirecting from {} to {}", ctx.path(), landing);
			ctx.redirect(landing.as_str());
			return Ok(false);
		}
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::auth::{AuthSession, User};
	use eventia_pages::router::{Redirect, RouteParams};
	use rstest::rstest;

	fn signed_in(role: Role) -> Auth {
		let auth = Auth::in_memory();
		auth.login(&AuthSession {
			access_token: "token".to_string(),
			refresh_token: None,
			user: User {
				id: "1".to_string(),
				name: "Test".to_string(),
				surname: "User".to_string(),
				email: "test@example.com".to_string(),
				role,
			},
		})
		.unwrap();
		auth
	}

	fn evaluate(
		guard: impl Fn(&GuardContext<'_>) -> Result<bool, GuardError>,
		path: &str,
	) -> (bool, Option<Redirect>) {
		let params = RouteParams::new();
		let ctx = GuardContext::new(path, &params);
		let allowed = guard(&ctx).unwrap();
		(allowed, ctx.into_redirect())
	}

	#[rstest]
	fn test_no_session_goes_to_login() {
		let auth = Auth::in_memory();
		let (allowed, redirect) = evaluate(auth_guard(&auth, &[]), "/dashboard");
		assert!(!allowed);
		assert_eq!(redirect, Some(Redirect::Soft("/login".to_string())));
	}

	#[rstest]
	#[case(Role::User, &[Role::Admin], false)]
	#[case(Role::Organizer, &[Role::Admin], false)]
	#[case(Role::Admin, &[Role::Admin], true)]
	#[case(Role::Organizer, &[Role::Admin, Role::Organizer], true)]
	#[case(Role::User, &[], true)]
	fn test_allow_list_membership(
		#[case] role: Role,
		#[case] allowed_roles: &[Role],
		#[case] expected: bool,
	) {
		let auth = signed_in(role);
		let (allowed, redirect) = evaluate(auth_guard(&auth, allowed_roles), "/admin");
		assert_eq!(allowed, expected);
		if !expected {
			assert_eq!(redirect, Some(Redirect::Soft("/unauthorized".to_string())));
		}
	}

	#[rstest]
	fn test_admin_is_not_implicitly_allowed_lower_routes() {
		let auth = signed_in(Role::Admin);
		let (allowed, _) = evaluate(auth_guard(&auth, &[Role::User]), "/dashboard");
		assert!(!allowed);
	}

	#[rstest]
	fn test_custom_targets() {
		let auth = Auth::in_memory();
		let guard = auth_guard_with(&auth, &[Role::Admin], "/signin", "/403");
		let (_, redirect) = evaluate(guard, "/admin");
		assert_eq!(redirect, Some(Redirect::Soft("/signin".to_string())));
	}

	#[rstest]
	fn test_guest_guard() {
		let visitor = Auth::in_memory();
		assert_eq!(evaluate(guest_guard(&visitor, "/"), "/login"), (true, None));

		let member = signed_in(Role::User);
		assert_eq!(
			evaluate(guest_guard(&member, "/"), "/login"),
			(false, Some(Redirect::Soft("/".to_string())))
		);
	}
}
