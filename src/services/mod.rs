pub mod selection_service;
pub mod session_service;
pub mod catalog_service;
pub mod rates_service;
pub mod conversion_service;
pub mod board_service;
