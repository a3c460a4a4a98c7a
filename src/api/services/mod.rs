pub mod audience;
pub mod catalog;
pub mod events;
pub mod health;
pub mod helpers;
pub mod params;
pub mod types;

pub use audience::{sessions_routes, users_routes};
pub use catalog::{funnels_routes, professions_routes};
pub use events::events_routes;
pub use health::{AppStartTime, HealthService, health_routes};
