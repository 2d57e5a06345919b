// Services built on top of template expansion

pub mod template_client;

pub use template_client::{Body, TemplateClient};
