pub mod campaign;
pub mod dispatch;
pub mod handlers;
pub mod mailer;
pub mod template;
