pub mod memory;
pub mod pool;
pub mod users;
pub mod workouts;

pub use memory::{MemoryUserStore, MemoryWorkoutStore};
pub use pool::create_pool;
pub use users::{PgUserStore, UserStore};
pub use workouts::{PgWorkoutStore, WorkoutStore};
