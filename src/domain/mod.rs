pub mod commit;
pub mod diff;
pub mod prompt;
pub mod repository;
pub mod summary;
pub mod window;
