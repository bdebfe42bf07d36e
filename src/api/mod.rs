pub mod calculate;
pub mod cities;
pub mod results;
pub mod schema;
pub mod upload;
