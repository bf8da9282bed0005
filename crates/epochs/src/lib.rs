pub mod chase;
pub mod control;
pub mod dial;
pub mod fader;
pub mod macros;
pub mod panel;
pub mod sched;
pub mod section;
pub mod tween;
pub mod visibility;
