pub mod dispatch;
pub mod import;
pub mod projects;
