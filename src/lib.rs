pub mod console;
pub mod demo;
pub mod error;
pub mod facts;
pub mod logging;
pub mod resolver;
pub mod responses;
pub mod web;

pub use resolver::QueryResolver;
