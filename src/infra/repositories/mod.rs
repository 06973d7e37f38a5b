pub mod memory_store;
pub mod memory_activity_repo;
pub mod memory_booking_repo;
pub mod memory_event_repo;
pub mod memory_session_repo;
pub mod memory_user_repo;

pub mod sqlite_activity_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_event_repo;
pub mod sqlite_session_repo;
pub mod sqlite_user_repo;
