pub mod add;
pub mod edit;
pub mod events;
pub mod move_event;
pub mod restore;
pub mod rm;
pub mod skip;
pub mod today;
pub mod week;
