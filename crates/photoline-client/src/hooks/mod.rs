mod use_config;
mod use_day_timeline;
mod use_document_pointer;
mod use_localstorage;
mod use_positioned_element;
mod use_timeline_service;

pub use use_config::*;
pub use use_day_timeline::*;
pub use use_document_pointer::use_document_pointer;
pub use use_localstorage::use_localstorage;
pub use use_positioned_element::*;
pub use use_timeline_service::use_timeline_service;
