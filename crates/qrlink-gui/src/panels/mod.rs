pub mod helpers;
pub mod main_screen;
pub mod menu_bar;
pub mod result_screen;
pub mod status;
pub mod toasts;
