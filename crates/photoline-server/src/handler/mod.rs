pub mod timeline_service;
