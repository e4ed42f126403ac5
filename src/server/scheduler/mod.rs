pub mod points_reset;
