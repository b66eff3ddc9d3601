pub mod postgres_user_store;
