use eventia_pages::dom::markup::escape;
use eventia_pages::{Component, ComponentError, ComponentId, Link, RouteContext};

use crate::app::AppContext;
use crate::auth::{Role, UserInfo};
use crate::components::NavBar;

struct Layout {
	title: &'static str,
	stats: &'static [(&'static str, &'static str)],
	actions: &'static [(&'static str, &'static str, &'static str)],
}

fn layout(role: Role) -> Layout {
	match role {
		Role::Admin => Layout {
			title: "Administration",
			stats: &[
				("Users", "1,234"),
				("Active events", "45"),
				("Organizers", "89"),
				("Monthly revenue", "$25,430"),
			],
			actions: &[
				("/admin/usuarios", "Manage users", "View, edit and administer users"),
				("/admin/eventos", "Manage events", "Approve, edit and remove events"),
				("/reportes", "Reports", "Detailed statistics"),
			],
		},
		Role::Organizer => Layout {
			title: "Organizer panel",
			stats: &[
				("My events", "12"),
				("Attendees", "342"),
				("Upcoming events", "5"),
				("Revenue", "$8,750"),
			],
			actions: &[
				("/organizador/crear-evento", "Create event", "Publish a new event"),
				("/organizador/eventos", "My events", "Edit your events"),
				("/organizador/asistentes", "Attendees", "See who is coming"),
			],
		},
		Role::User => Layout {
			title: "My panel",
			stats: &[
				("Bookings", "8"),
				("Upcoming events", "3"),
				("Past events", "5"),
				("Favorites", "12"),
			],
			actions: &[
				("/eventos", "Explore events", "Discover new events"),
				("/mis-reservas", "My bookings", "Tickets and reservations"),
				("/perfil", "My profile", "Edit personal details"),
			],
		},
	}
}

/// Dashboard of one role, at the role's dashboard path.
#[derive(Debug)]
pub struct DashboardPage {
	id: ComponentId,
	role: Role,
	navbar: NavBar,
	user: UserInfo,
}

impl DashboardPage {
	/// Fails when nobody is signed in.
	pub fn new(context: &AppContext, route: &RouteContext, role: Role) -> Result<Self, ComponentError> {
		let user = context
			.auth
			.user_info()
			.ok_or_else(|| ComponentError::Construction {
				component: "DashboardPage",
				reason: "no signed-in user".to_string(),
			})?;
		Ok(Self {
			id: ComponentId::generate("page-dashboard"),
			role,
			navbar: NavBar::for_session(&context.config.brand, &context.auth, route.path()),
			user,
		})
	}

	/// Role this dashboard was built for.
	pub fn role(&self) -> Role {
		self.role
	}
}

impl Component for DashboardPage {
	fn name(&self) -> &'static str {
		match self.role {
			Role::Admin => "AdminDashboard",
			Role::Organizer => "OrganizerDashboard",
			Role::User => "UserDashboard",
		}
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		let layout = layout(self.role);
		let stats: String = layout
			.stats
			.iter()
			.map(|(label, value)| {
				format!(
					r#"<div class="stat-card"><h3>{}</h3><p class="stat-number">{}</p></div>"#,
					label, value
				)
			})
			.collect();
		let actions: String = layout
			.actions
			.iter()
			.map(|(path, title, description)| {
				Link::new(*path, "")
					.html(format!("<h3>{}</h3><p>{}</p>", title, description))
					.class("action-card")
					.render()
			})
			.collect();
		format!(
			concat!(
				r#"<div id="{id}" class="page dashboard-{role}">{navbar}<div class="page-container">"#,
				r#"<div class="dashboard-header"><h1>{title}</h1><p>Welcome, {name}</p></div>"#,
				r#"<div class="dashboard-content"><div class="stats-grid">{stats}</div>"#,
				r#"<div class="quick-actions"><h2>Quick actions</h2><div class="actions-grid">{actions}</div></div>"#,
				"</div></div></div>"
			),
			id = self.id,
			role = self.role.as_str().to_lowercase(),
			navbar = self.navbar.render(),
			title = layout.title,
			name = escape(&self.user.full_name),
			stats = stats,
			actions = actions
		)
	}
}
