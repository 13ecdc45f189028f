pub mod user;
pub mod workout;

pub use user::{NewUser, SessionUser, User};
pub use workout::{NewWorkout, Workout, WorkoutForm};
