pub mod feed;
pub mod models;
pub mod session;
pub mod timer;

pub use feed::{RefreshMode, SpotEvent, SpotFeed};
pub use models::{ParkingSpot, SpotStatus, now_ms};
pub use session::{Session, SessionStore, SessionUser};
pub use timer::format_remaining;
