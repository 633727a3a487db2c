//! Ядро heads-up Texas Hold'em.
//!
//! Слои:
//! - `domain` – карты, колода, фишки, игроки, стол;
//! - `eval` – оценка лучшей пятёрки и сравнение рук;
//! - `engine` – машина состояний раздачи и контроллер стола;
//! - `opponent` – политика бота;
//! - `api` – снимки состояния и команды;
//! - `infra` – RNG и загрузка конфига.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod opponent;
