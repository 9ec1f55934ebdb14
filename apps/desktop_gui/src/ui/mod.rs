//! egui front-end for the search widget.

pub mod app;
