pub mod auth;
pub mod probes;
pub mod resumes;
pub mod users;
