pub mod canvas;
pub mod chart;
pub mod controls;
pub mod side_menu;
pub mod topology_view;
