//! One view function per sidebar tab

pub mod dictionary;
pub mod notes;
pub mod practice;
pub mod sidebar;
