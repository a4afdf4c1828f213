mod home;
mod transcribe;

pub use home::home_handler;
pub use transcribe::transcribe_handler;
