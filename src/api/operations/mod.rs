pub mod ai;
pub mod question;
pub mod topic;
pub mod user;

pub use ai::AiOperations;
pub use question::QuestionOperations;
pub use topic::TopicOperations;
pub use user::UserOperations;
