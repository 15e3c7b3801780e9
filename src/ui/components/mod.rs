pub mod controls;
pub mod lyrics;
pub mod sidebar;
pub mod spinner;
