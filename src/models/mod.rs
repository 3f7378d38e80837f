mod chat;
mod question;
mod topic;
pub mod user;

pub use chat::ChatForm;
pub use question::{Question, QuestionCategory, QuestionOption};
pub use topic::{Topic, TopicForm, TopicQuery};
pub use user::{LoginForm, LoginPayload, LoginResponse, RegisterForm, User, UserUpdate};
