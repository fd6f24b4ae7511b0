mod post;
mod token;
mod user;

pub use post::{CreatePostInput, Post};
pub use token::{Claims, CredentialToken, TokenKind, TokenPair};
pub use user::{AuthResponse, LoginInput, RegisterInput, User};
