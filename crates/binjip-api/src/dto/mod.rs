mod request;
mod response;

pub use request::RenderForm;
pub use response::{HealthResponse, OptionsResponse, RenderResponse, RenderStatus};
