mod crypto;
mod extractor;
mod session;

pub use crypto::{hash_password, verify_password};
pub use extractor::AuthUser;
pub use session::issue_session;
