pub mod landing_routes;
pub mod stats_routes;
