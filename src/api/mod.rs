//! Внешний API стола.
//!
//! Здесь описываются:
//! - команды (commands.rs) – всё, что меняет состояние (новая раздача, действие, время);
//! - запросы (queries.rs) – только чтение;
//! - DTO (dto.rs) – снимок стола для внешнего слоя.

pub mod commands;
pub mod dto;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use queries::*;
