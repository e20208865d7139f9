pub mod domain;
pub mod http;
pub mod repository;
pub mod service;
