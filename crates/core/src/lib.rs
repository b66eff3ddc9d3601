pub mod auth;
pub mod catalog;
pub mod classification;
pub mod detection;
pub mod history;
pub mod pipeline;
pub mod shared;
pub mod snapshot;
