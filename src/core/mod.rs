pub mod sync;
pub mod template;
pub mod validate;
