pub mod notifications;
pub mod schedule;
pub mod worker;
