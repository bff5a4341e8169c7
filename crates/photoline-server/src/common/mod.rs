pub mod note;
pub mod photo;
pub mod placement;
