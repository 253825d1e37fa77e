mod article;
mod follow;
mod todo;
mod user;

pub use article::ArticleService;
pub use follow::FollowService;
pub use todo::TodoService;
pub use user::UserService;
