pub mod models;
pub mod pg_repository;
pub mod repositories;
pub mod statuses;
