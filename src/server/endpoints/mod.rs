pub mod meetings;
pub mod periods;
pub mod statistics;
pub mod status;
pub mod students;
