pub mod api;
pub mod extract;
pub mod fallback;
pub mod models;
pub mod odds;

pub use api::{LEAGUES, create_http_client, load_upcoming_matches, team_logo_url};
pub use models::{Match, Odds};
