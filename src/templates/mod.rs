pub mod components;
pub mod dashboard;
pub mod layout;
pub mod login;
pub mod signup;

pub use dashboard::dashboard;
pub use layout::base;
pub use login::login;
pub use signup::{signup, SignupView};
