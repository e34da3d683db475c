//! End-to-end navigation scenarios over an in-memory document.

mod common;

use common::{Harness, login_reply, member, session, visitor};
use eventia_app::api::HttpMethod;
use eventia_app::auth::{MemoryStore, Role};
use eventia_pages::History;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_visitor_home_shows_entry_points() {
	let h = visitor("/");

	assert_eq!(h.page(), Some("HomePage"));
	let text = h.text();
	assert!(text.contains("Log in"));
	assert!(text.contains("Sign up"));
	assert!(!text.contains("Hello,"));
}

#[rstest]
fn test_home_lists_events_from_backend() {
	let h = Harness::build("/", MemoryStore::new());
	h.transport.respond(
		HttpMethod::Get,
		"/eventos",
		200,
		json!({ "data": [
			{ "id": 1, "nombre": "Jazz night", "ubicacion": "Madrid", "fecha": "2025-03-09T20:00:00Z" },
			{ "id": 2, "name": "Book fair" }
		]}),
	);
	let h = h.start();

	assert!(h.document().contains("event-1"));
	assert!(h.document().contains("event-2"));
	let text = h.text();
	assert!(text.contains("Jazz night"));
	assert!(text.contains("09/03/2025"));
	assert_eq!(h.transport.count(HttpMethod::Get, "/eventos"), 1);
}

#[rstest]
fn test_home_to_login_to_unknown_page() {
	let h = visitor("/");

	assert!(h.document().follow_link("/login").unwrap());
	assert_eq!(h.page(), Some("LoginPage"));
	assert_eq!(h.path(), "/login");
	assert!(h.document().contains("login-form"));

	h.app.router().navigate("/no/such/page").unwrap();
	assert_eq!(h.page(), Some("NotFoundPage"));
	assert!(h.text().contains("404"));
	assert_eq!(h.history.entries(), vec!["/", "/login", "/no/such/page"]);

	h.app.router().back().unwrap();
	assert_eq!(h.page(), Some("LoginPage"));
}

#[rstest]
#[case("ORGANIZADOR", "/organizador", "OrganizerDashboard")]
#[case("ADMIN", "/admin", "AdminDashboard")]
#[case("USER", "/dashboard", "UserDashboard")]
fn test_login_continues_to_role_dashboard(
	#[case] role: &str,
	#[case] dashboard: &str,
	#[case] page: &str,
) {
	let h = visitor("/login");
	h.transport
		.respond(HttpMethod::Post, "/auth/login", 200, login_reply(role));

	h.document()
		.submit(
			"login-form",
			[("email", " ana@example.com "), ("password", "secret")],
		)
		.unwrap();

	assert_eq!(
		h.posts_to("/auth/login"),
		vec![json!({ "email": "ana@example.com", "password": "secret" })]
	);
	assert!(h.signed_in());
	assert_eq!(h.page(), Some(page));
	assert_eq!(h.path(), dashboard);
	assert!(h.text().contains("Hello, Ana"));
}

#[rstest]
fn test_rejected_credentials_stay_on_login() {
	let h = visitor("/login");
	h.transport.respond(
		HttpMethod::Post,
		"/auth/login",
		401,
		json!({ "message": "bad credentials" }),
	);

	h.document()
		.submit("login-form", [("email", "ana@example.com"), ("password", "nope")])
		.unwrap();

	assert_eq!(h.page(), Some("LoginPage"));
	assert!(h.text().contains("Invalid email or password"));
	assert!(h.history.assigned().is_empty());
	assert!(!h.signed_in());
	// The email survives the re-render.
	assert!(
		h.document()
			.inner_html("app")
			.unwrap()
			.contains(r#"value="ana@example.com""#)
	);
}

#[rstest]
fn test_login_validation_sends_nothing() {
	let h = visitor("/login");

	h.document()
		.submit("login-form", [("email", "ana@example.com"), ("password", "")])
		.unwrap();

	assert!(h.text().contains("Email and password are required"));
	assert!(h.transport.requests().is_empty());
}

#[rstest]
#[case(&[("name", ""), ("email", "a@b.c"), ("password", "secret1"), ("confirm-password", "secret1")], "Name and email are required")]
#[case(&[("name", "Ana"), ("email", "a@b.c"), ("password", "short"), ("confirm-password", "short")], "Password must be at least 6 characters")]
#[case(&[("name", "Ana"), ("email", "a@b.c"), ("password", "secret1"), ("confirm-password", "secret2")], "Passwords do not match")]
fn test_signup_validation(#[case] values: &[(&str, &str)], #[case] message: &str) {
	let h = visitor("/signup");

	h.document()
		.submit("signup-form", values.iter().copied())
		.unwrap();

	assert_eq!(h.page(), Some("SignUpPage"));
	assert!(h.text().contains(message));
	assert!(h.transport.requests().is_empty());
}

#[rstest]
fn test_signup_registers_then_asks_for_login() {
	let h = visitor("/signup");
	h.transport
		.respond(HttpMethod::Post, "/auth/register", 201, json!({ "success": true }));

	h.document()
		.submit(
			"signup-form",
			[
				("name", "Ana"),
				("email", "ana@example.com"),
				("password", "secret1"),
				("confirm-password", "secret1"),
			],
		)
		.unwrap();

	assert_eq!(
		h.posts_to("/auth/register"),
		vec![json!({ "nombre": "Ana", "email": "ana@example.com", "password": "secret1" })]
	);
	assert_eq!(h.page(), Some("LoginPage"));
	assert!(!h.signed_in());
}

#[rstest]
#[case("/dashboard")]
#[case("/admin")]
#[case("/organizador")]
fn test_protected_pages_send_visitors_to_login(#[case] path: &str) {
	let h = visitor(path);

	assert_eq!(h.page(), Some("LoginPage"));
	assert_eq!(h.path(), "/login");
	assert_eq!(h.history.current_path(), "/login");
	assert_eq!(h.history.entries(), vec!["/login"]);
}

#[rstest]
#[case(Role::User, "/admin")]
#[case(Role::User, "/organizador")]
#[case(Role::Organizer, "/admin")]
#[case(Role::Admin, "/dashboard")]
fn test_wrong_role_is_unauthorized(#[case] role: Role, #[case] path: &str) {
	let h = member("/", role);

	h.app.router().navigate(path).unwrap();

	assert_eq!(h.page(), Some("UnauthorizedPage"));
	assert_eq!(h.path(), "/unauthorized");
	assert!(h.text().contains("Access denied"));
	assert!(h.signed_in());
}

#[rstest]
#[case("/login")]
#[case("/signup")]
fn test_guest_pages_send_members_home(#[case] path: &str) {
	let h = member(path, Role::User);

	assert_eq!(h.page(), Some("HomePage"));
	assert_eq!(h.path(), "/");
}

#[rstest]
fn test_logout_link_ends_session() {
	let h = member("/dashboard", Role::User);
	assert_eq!(h.page(), Some("UserDashboard"));

	assert!(h.document().follow_link("/logout").unwrap());

	assert!(!h.signed_in());
	assert_eq!(h.page(), Some("LoginPage"));
	assert_eq!(h.path(), "/login");
	assert_eq!(h.history.entries(), vec!["/dashboard", "/login"]);
}

#[rstest]
fn test_expired_session_reported_by_backend_signs_out() {
	let store = MemoryStore::new();
	let h = Harness::build("/", store);
	h.auth().login(&session(Role::User)).unwrap();
	h.transport
		.respond(HttpMethod::Get, "/eventos", 401, json!({ "message": "jwt expired" }));
	let h = h.start();

	assert!(!h.signed_in());
	assert_eq!(h.history.assigned(), vec!["/login"]);
}

#[rstest]
fn test_components_demo_is_interactive() {
	let h = visitor("/");
	h.app.router().navigate("/components").unwrap();
	assert_eq!(h.page(), Some("ComponentsDemoPage"));

	for _ in 0..3 {
		h.document().click("demo-counter-1-inc").unwrap();
	}
	assert!(h.text().contains("Count: 3"));
	h.document().click("demo-counter-1-reset").unwrap();
	assert!(h.text().contains("Count: 0"));

	h.document().click("demo-counter-2-inc").unwrap();
	assert!(h.text().contains("Count: 15"));

	// Disabled buttons have no listener.
	assert_eq!(h.document().click("demo-btn-3").unwrap(), 0);
}

#[rstest]
fn test_shutdown_releases_every_listener() {
	let h = visitor("/components");
	assert!(h.document().total_listeners() > 0);

	h.app.shutdown();

	assert_eq!(h.document().total_listeners(), 0);
	assert_eq!(h.page(), None);
}

#[rstest]
fn test_counter_remounts_once_per_update() {
	use eventia_app::components::Counter;
	use eventia_pages::{Component, ComponentId, Document};

	let document = Document::new();
	document.create_root("app");
	let counter = Counter::with_id(ComponentId::fixed("c"), 0, 1);
	document.set_inner_html("app", &counter.render()).unwrap();
	counter.mount(&document).unwrap();

	for _ in 0..3 {
		assert_eq!(document.click("c-inc").unwrap(), 1);
	}
	assert_eq!(document.click("c-reset").unwrap(), 1);

	assert_eq!(counter.count(), 0);
	assert_eq!(counter.lifecycle().mount_count(), 5);
	assert_eq!(counter.lifecycle().unmount_count(), 4);
	assert_eq!(document.text_content("c-value").as_deref(), Some("0"));
	assert_eq!(document.listener_count("c-inc"), 1);
}
