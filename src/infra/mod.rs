//! Инфраструктурный слой вокруг движка:
//! - RNG-реализации для движка и бота;
//! - загрузка и проверка конфига стола.

pub mod config;
pub mod rng;

pub use config::*;
pub use rng::*;
