pub mod postgres_history;
