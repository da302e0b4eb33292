pub mod chat;
pub mod content_ideas;
pub mod dashboard;

pub use chat::ChatPage;
pub use content_ideas::{ContentIdeasPage, QuickTemplate};
pub use dashboard::DashboardPage;
