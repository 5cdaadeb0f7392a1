pub mod config;
pub mod forms;
pub mod models;
pub mod requests;
pub mod session;
pub mod stats;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use config::ClientConfig;
pub use forms::FormError;
pub use models::{
    AuthResponse, CareStatus, DailyProgress, DashboardData, GoalStatus, GoalType, HealthTip,
    Priority, PreventiveCare, Role, User, WellnessGoal,
};
pub use session::{Session, SessionError, SessionStore};
pub use stats::{CareSummary, ProgressLevel, TodaySummary};
