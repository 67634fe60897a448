pub mod event;
pub mod recipient;

pub use event::Event;
pub use recipient::Recipient;
