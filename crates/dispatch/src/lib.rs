pub mod cache;
pub mod config;
pub mod mailer;
pub mod resolver;

pub use cache::TemplateCache;
pub use config::MailerConfig;
pub use mailer::Mailer;
pub use resolver::TemplateResolver;
