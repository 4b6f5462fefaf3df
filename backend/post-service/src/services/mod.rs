//! Business logic layer
pub mod comments;
pub mod friendships;
pub mod likes;
pub mod posts;

pub use comments::CommentService;
pub use friendships::FriendshipService;
pub use likes::LikeService;
pub use posts::PostService;
