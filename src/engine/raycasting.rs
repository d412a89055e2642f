mod ray;
mod raycast_params;
mod raycast_result;

pub use ray::Ray;
pub use raycast_params::{
  FilterType,
  RaycastParams
};
pub use raycast_result::RaycastResult;
