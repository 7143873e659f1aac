//! External-format adapters: OBJ parsing and image I/O.

pub mod image_io;
pub mod obj;
