pub mod agenda;
pub mod week_view;
