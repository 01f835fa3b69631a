pub mod category_status;
pub mod request_status;

pub use category_status::CategoryStatus;
pub use request_status::RequestStatus;
