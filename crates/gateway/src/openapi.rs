//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use auth_service_lib::LoginResponse;
use domain::{AuthenticatedIdentity, Role, UserResponse, WeekWindow};
use schedule_service_lib::{ScheduleEntry, WeeklySchedule};

use crate::handlers::admin_handler::CreateUserRequest;
use crate::handlers::auth_handler::LoginRequest;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::logout,
        crate::handlers::auth_handler::me,
        crate::handlers::schedule_handler::current_week,
        crate::handlers::schedule_handler::admin_schedule,
        crate::handlers::schedule_handler::teacher_schedule,
        crate::handlers::schedule_handler::student_schedule,
        crate::handlers::admin_handler::list_users,
        crate::handlers::admin_handler::create_user,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            AuthenticatedIdentity,
            Role,
            WeekWindow,
            ScheduleEntry,
            WeeklySchedule,
            CreateUserRequest,
            UserResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-in and session endpoints"),
        (name = "Schedule", description = "Weekly schedule dashboards"),
        (name = "Admin", description = "Account administration"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("opaque")
                        .build(),
                ),
            );
        }
    }
}
