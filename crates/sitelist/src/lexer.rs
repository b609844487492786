//! Low-level input navigation shared by the XML reader

pub mod cursor;

pub use cursor::Cursor;
