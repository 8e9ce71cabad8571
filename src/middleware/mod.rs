pub mod gate;
pub mod response;

pub use gate::{decide, gate_middleware, AuthUser, Disposition};
pub use response::{ApiResponse, ApiResult};
