pub mod effects;
pub mod session;

pub use effects::Effects;
pub use session::Session;
