pub mod error;
pub mod interaction;
pub mod operations;
pub mod session;
pub mod validator;

pub use error::CalcError;
pub use interaction::{Console, Reply};
pub use operations::{Operation, calculate};
pub use session::{Flow, Session, SessionState};
